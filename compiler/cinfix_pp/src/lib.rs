//! A small C-style preprocessor.
//!
//! Supports `#include "file"`, object-like `#define`/`#undef`, and the
//! conditional directives `#if`, `#ifdef`, `#ifndef`, `#elif`, `#else` and
//! `#endif`. Conditions are evaluated by the cinfix expression engine.
//!
//! ```
//! use cinfix_pp::{Preprocessor, PreprocessorConfig};
//!
//! let mut pp = Preprocessor::new(PreprocessorConfig::default());
//! let out = pp
//!     .process_str("demo", "#define LEVEL 2\n#if LEVEL > 1\nverbose\n#endif\n")
//!     .unwrap();
//! assert_eq!(out, "\n\nverbose\n\n");
//! ```

pub mod conditional;
mod config;
mod error;
mod expression;
pub mod loader;
pub mod macros;
mod preprocessor;

pub use config::PreprocessorConfig;
pub use error::{PreprocessError, PreprocessErrorKind};
pub use loader::{FsLoader, MemoryLoader, SourceLoader};
pub use macros::MacroTable;
pub use preprocessor::Preprocessor;
