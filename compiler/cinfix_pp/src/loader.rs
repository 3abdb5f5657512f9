//! Where `#include`d text comes from.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

/// Resolves and reads the files named by `#include` directives.
pub trait SourceLoader {
    /// Loads `path` as named in a directive. `from` is the file containing the
    /// directive, if there is one. Returns the resolved path and the text.
    fn load(&self, path: &str, from: Option<&Path>) -> io::Result<(PathBuf, String)>;
}

/// Loads files from disk: first relative to the including file (or the
/// working directory for the top-level file), then from each include
/// directory in order.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    include_dirs: Vec<PathBuf>,
}

impl FsLoader {
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self { include_dirs }
    }

    fn candidates(&self, path: &str, from: Option<&Path>) -> Vec<PathBuf> {
        let requested = Path::new(path);
        if requested.is_absolute() {
            return vec![requested.to_path_buf()];
        }
        let first = match from.and_then(Path::parent) {
            Some(dir) => dir.join(requested),
            None => requested.to_path_buf(),
        };
        std::iter::once(first)
            .chain(self.include_dirs.iter().map(|dir| dir.join(requested)))
            .collect()
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, path: &str, from: Option<&Path>) -> io::Result<(PathBuf, String)> {
        for candidate in self.candidates(path, from) {
            if candidate.is_file() {
                debug!("loading {}", candidate.display());
                let text = fs::read_to_string(&candidate)?;
                return Ok((candidate, text));
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("'{path}' not found in the including directory or include path"),
        ))
    }
}

/// Serves sources from memory, keyed by the exact path used to include them.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, builder style.
    pub fn with_file(mut self, path: &str, text: &str) -> Self {
        self.files.insert(path.to_string(), text.to_string());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str, _from: Option<&Path>) -> io::Result<(PathBuf, String)> {
        self.files
            .get(path)
            .map(|text| (PathBuf::from(path), text.clone()))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("'{path}' not found")))
    }
}
