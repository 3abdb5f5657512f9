//! Precedence correction for textual-order trees.
//!
//! A binary node whose right child is a binary operator of equal or lower
//! precedence is rotated so the child becomes the parent:
//!
//! ```text
//!     N                R
//!    / \              / \
//!   a   R     =>     N   c
//!      / \          / \
//!     b   c        a   b
//! ```
//!
//! Applied bottom-up this yields C precedence with left associativity.

use cinfix_ast::{precedence, Node};
use cinfix_lexer::Token;
use log::trace;

/// Rewrites trees into precedence order and counts the rotations it performs.
#[derive(Debug, Default)]
pub struct Fixer {
    rotations: usize,
}

impl Fixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rotations performed since this fixer was created.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Consumes a tree and returns it in precedence order. Fixing a tree that
    /// is already in order returns it unchanged without rotating.
    pub fn fix(&mut self, node: Node) -> Node {
        match node {
            Node::Leaf(_) => node,
            Node::Unary { op, operand } => Node::unary(op, self.fix(*operand)),
            Node::Binary { op, left, right } => self.fix_binary(op, *left, *right),
        }
    }

    fn fix_binary(&mut self, mut op: Token, mut left: Node, right: Node) -> Node {
        let mut right = self.fix(right);
        let mut rotated = false;

        loop {
            let rotate = match &right {
                Node::Binary { op: inner, .. } => binding(&op) >= binding(inner),
                _ => false,
            };
            if !rotate {
                break;
            }
            let Node::Binary {
                op: inner,
                left: inner_left,
                right: inner_right,
            } = right
            else {
                unreachable!("rotation requires a binary right child");
            };
            trace!(
                "fixer: rotate '{}' at {} below '{}' at {}",
                op.text(),
                op.location,
                inner.text(),
                inner.location
            );
            self.rotations += 1;

            // The demoted node takes the old left side and the right child's
            // left side; it may now need rotating itself.
            left = self.fix(Node::binary(op, left, *inner_left));
            op = inner;
            right = *inner_right;
            rotated = true;
        }

        // A rotation already fixed the left side through the demoted node.
        if !rotated {
            left = self.fix(left);
        }
        Node::binary(op, left, right)
    }
}

/// Precedence of the operator of a binary node.
fn binding(op: &Token) -> u8 {
    match precedence(op.token_type) {
        Some(level) => level,
        None => panic!(
            "binary node carries non-binary operator {:?} at {}",
            op.token_type, op.location
        ),
    }
}

/// Fixes a tree with a throwaway [`Fixer`].
pub fn fix(node: Node) -> Node {
    Fixer::new().fix(node)
}
