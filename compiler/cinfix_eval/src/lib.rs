//! Integer evaluation for cinfix expression trees.
//!
//! [`evaluate`] computes the value of a tree produced by `cinfix_parser`.
//! [`evaluate_source`] and [`evaluate_tokens`] run the whole pipeline: lex,
//! build, fix, evaluate.

mod error;
mod evaluator;

pub use error::{EvalError, ExprError};
pub use evaluator::{evaluate, literal_value};

use cinfix_lexer::{Lexer, TokenSource};
use cinfix_parser::{parse, ParserConfig};
use log::debug;

/// Evaluates the first line of `source` with the default parser
/// configuration.
///
/// ```
/// assert_eq!(cinfix_eval::evaluate_source("2 + 3 * 4"), Ok(14));
/// ```
pub fn evaluate_source(source: &str) -> Result<i32, ExprError> {
    evaluate_tokens(&mut Lexer::new(source), &ParserConfig::default())
}

/// Evaluates the next expression from a token source. Tokens are read up to
/// and including the end-of-input or newline token that ends the expression.
pub fn evaluate_tokens<S: TokenSource>(
    source: &mut S,
    config: &ParserConfig,
) -> Result<i32, ExprError> {
    let tree = parse(source, config)?;
    let value = evaluate(&tree)?;
    debug!("{tree} = {value}");
    Ok(value)
}
