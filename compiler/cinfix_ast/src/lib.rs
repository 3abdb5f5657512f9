//! Expression tree for cinfix.
//!
//! This crate defines the node model shared by the tree builder, the
//! precedence fixer and the evaluator, the arity classifier for tokens, the
//! binary operator precedence table, and helpers for displaying trees.

pub mod ast;
pub mod operators;
pub mod print;

pub use ast::{Node, NodeKind};
pub use operators::{classify, precedence, Arity};
pub use print::TreePrinter;

/// A result type for AST operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Serializes a tree to a JSON string.
///
/// # Example
///
/// ```
/// use cinfix_ast::{to_json, Node};
/// use cinfix_lexer::{Location, Token, TokenType};
///
/// let leaf = Node::Leaf(Token::new(TokenType::IntLiteral, "42", Location::default()));
/// let json = to_json(&leaf).unwrap();
/// assert!(json.contains(r#""lexeme": "42""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Deserializes a tree from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json(json: &str) -> Result<Node> {
    Ok(serde_json::from_str(json)?)
}
