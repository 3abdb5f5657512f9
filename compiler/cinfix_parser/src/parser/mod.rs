// Two-pass expression parser: build in textual order, then fix precedence.

mod builder;
mod config;
pub mod diagnostics;
mod error;
mod fixer;

pub use builder::{build, TreeBuilder};
pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use diagnostics::{render_snippet, Diagnostic, Span};
pub use error::ParseError;
pub use fixer::{fix, Fixer};

use cinfix_ast::Node;
use cinfix_lexer::{Lexer, TokenSource};
use log::debug;

/// Builds and fixes one expression from `source`.
///
/// Reading stops at the first end-of-input or newline token at the outermost
/// level, so a source can be parsed one line at a time.
pub fn parse<S: TokenSource>(source: &mut S, config: &ParserConfig) -> Result<Node, ParseError> {
    let provisional = TreeBuilder::new(config.clone()).build(source)?;
    let mut fixer = Fixer::new();
    let fixed = fixer.fix(provisional);
    debug!(
        "parsed {} nodes, {} rotation(s): {}",
        fixed.size(),
        fixer.rotations(),
        fixed
    );
    Ok(fixed)
}

/// Lexes and parses an expression held in a string.
pub fn parse_str(source: &str, config: &ParserConfig) -> Result<Node, ParseError> {
    parse(&mut Lexer::new(source), config)
}

#[cfg(test)]
mod tests;
