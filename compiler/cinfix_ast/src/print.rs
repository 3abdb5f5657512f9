//! Rendering trees back to text.
//!
//! `Display` reproduces the expression (without whitespace), [`Node::outline`]
//! lists every operator with its operands, and [`TreePrinter`] draws an
//! indented tree.

use std::fmt::{self, Write};

use cinfix_lexer::{Token, TokenType};

use crate::ast::Node;

/// Short label for a token in diagnostic output; end markers print as `E`.
fn label(token: &Token) -> &str {
    match token.token_type {
        TokenType::Eof | TokenType::Newline => "E",
        _ => token.text(),
    }
}

fn is_terminator(token: &Token) -> bool {
    matches!(
        token.token_type,
        TokenType::RightParen | TokenType::Eof | TokenType::Newline
    )
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(token) => f.write_str(token.text()),
            Node::Unary { op, operand } if is_terminator(op) => {
                write!(f, "{operand}")?;
                if op.token_type == TokenType::RightParen {
                    f.write_str(op.text())?;
                }
                Ok(())
            }
            Node::Unary { op, operand } => write!(f, "{}{operand}", op.text()),
            Node::Binary { op, left, right } => write!(f, "{left}{}{right}", op.text()),
        }
    }
}

impl Node {
    /// One line per node, pre-order: `op: left right` for binary nodes,
    /// `op: operand` for unary nodes and the bare lexeme for leaves.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out);
        out
    }

    fn write_outline(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = match self {
            Node::Leaf(token) => writeln!(out, "{}", label(token)),
            Node::Unary { op, operand } => {
                writeln!(out, "{}: {}", label(op), label(operand.token()))
            }
            Node::Binary { op, left, right } => writeln!(
                out,
                "{}: {} {}",
                label(op),
                label(left.token()),
                label(right.token())
            ),
        };
        if let Some(left) = self.left() {
            left.write_outline(out);
        }
        if let Some(right) = self.right() {
            right.write_outline(out);
        }
    }
}

/// A utility for pretty-printing trees with indentation.
#[derive(Debug, Clone)]
pub struct TreePrinter {
    indent: usize,
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl TreePrinter {
    /// Creates a new `TreePrinter` indenting two spaces per level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width.
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    /// Prints a tree to a string, one node per line.
    pub fn print(&self, node: &Node) -> String {
        let mut out = String::new();
        self.print_into(node, 0, &mut out);
        out
    }

    fn print_into(&self, node: &Node, level: usize, out: &mut String) {
        let kind = match node {
            Node::Leaf(_) => "leaf",
            Node::Unary { .. } => "unary",
            Node::Binary { .. } => "binary",
        };
        let token = node.token();
        let _ = writeln!(
            out,
            "{:width$}{kind} {} ({})",
            "",
            label(token),
            token.location,
            width = level * self.indent
        );
        if let Some(left) = node.left() {
            self.print_into(left, level + 1, out);
        }
        if let Some(right) = node.right() {
            self.print_into(right, level + 1, out);
        }
    }
}
