use std::path::PathBuf;

use cinfix_parser::ParserConfig;

/// Limits and search paths for a [`Preprocessor`](crate::Preprocessor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessorConfig {
    /// Directories searched for `#include "..."` after the including file's own
    /// directory
    pub include_dirs: Vec<PathBuf>,
    /// How many files may be open through nested `#include`s
    pub max_include_depth: usize,
    /// How many `#if`/`#ifdef`/`#ifndef` blocks may be open at once in a file
    pub max_conditional_depth: usize,
    /// Maximum length of a macro body, in characters
    pub max_macro_len: usize,
    /// Limits for `#if`/`#elif` expressions
    pub parser: ParserConfig,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            include_dirs: Vec::new(),
            max_include_depth: 32,
            max_conditional_depth: 64,
            max_macro_len: 512,
            parser: ParserConfig::default(),
        }
    }
}
