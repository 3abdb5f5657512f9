// Node model for cinfix expression trees.

use cinfix_lexer::Token;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::operators::precedence;

/// The structural class of a stored node. There is no ambiguous kind: `+`
/// and `-` are resolved to unary or binary before a node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Unary,
    Binary,
}

/// An expression tree node. Children are owned, so a tree has no sharing and
/// no cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// An integer literal.
    Leaf(Token),
    /// A prefix operator, a parenthesis, or the end-of-input token that
    /// terminates an operator chain.
    Unary { op: Token, operand: Box<Node> },
    /// An infix operator.
    Binary {
        op: Token,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn unary(op: Token, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: Token, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Unary { .. } => NodeKind::Unary,
            Node::Binary { .. } => NodeKind::Binary,
        }
    }

    /// The token this node represents.
    pub fn token(&self) -> &Token {
        match self {
            Node::Leaf(token) => token,
            Node::Unary { op, .. } | Node::Binary { op, .. } => op,
        }
    }

    /// The single operand of a unary node or the first operand of a binary node.
    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Unary { operand, .. } => Some(operand),
            Node::Binary { left, .. } => Some(left),
        }
    }

    /// The second operand of a binary node.
    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Binary { right, .. } => Some(right),
            _ => None,
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.left().map_or(0, Node::size) + self.right().map_or(0, Node::size)
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        1 + self
            .left()
            .map_or(0, Node::depth)
            .max(self.right().map_or(0, Node::depth))
    }

    /// Checks that every binary node with a binary right child binds strictly
    /// looser than that child.
    pub fn is_precedence_ordered(&self) -> bool {
        match self {
            Node::Leaf(_) => true,
            Node::Unary { operand, .. } => operand.is_precedence_ordered(),
            Node::Binary { op, left, right } => {
                let ordered_here = match right.as_ref() {
                    Node::Binary { op: inner, .. } => {
                        precedence(op.token_type) < precedence(inner.token_type)
                    }
                    _ => true,
                };
                ordered_here && left.is_precedence_ordered() && right.is_precedence_ordered()
            }
        }
    }

    /// The tokens of the tree in source order, which is the order the builder
    /// read them in.
    pub fn tokens_in_order(&self) -> Vec<&Token> {
        let mut out = Vec::with_capacity(self.size());
        self.collect_in_order(&mut out);
        out
    }

    fn collect_in_order<'a>(&'a self, out: &mut Vec<&'a Token>) {
        use cinfix_lexer::TokenType;
        match self {
            Node::Leaf(token) => out.push(token),
            Node::Unary { op, operand } => {
                // Terminators close what they wrap; everything else prefixes it.
                if matches!(
                    op.token_type,
                    TokenType::RightParen | TokenType::Eof | TokenType::Newline
                ) {
                    operand.collect_in_order(out);
                    out.push(op);
                } else {
                    out.push(op);
                    operand.collect_in_order(out);
                }
            }
            Node::Binary { op, left, right } => {
                left.collect_in_order(out);
                out.push(op);
                right.collect_in_order(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinfix_lexer::{Location, TokenType};

    fn tok(token_type: TokenType, text: &str) -> Token {
        Token::new(token_type, text, Location::default())
    }

    fn leaf(text: &str) -> Node {
        Node::Leaf(tok(TokenType::IntLiteral, text))
    }

    #[test]
    fn test_shape_queries() {
        let tree = Node::binary(
            tok(TokenType::Star, "*"),
            leaf("2"),
            Node::unary(tok(TokenType::Minus, "-"), leaf("3")),
        );
        assert_eq!(tree.kind(), NodeKind::Binary);
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.left().map(Node::kind), Some(NodeKind::Leaf));
        assert_eq!(tree.right().map(Node::kind), Some(NodeKind::Unary));
        assert!(leaf("1").right().is_none());
    }

    #[test]
    fn test_precedence_ordering_check() {
        // 2 * (3 + 4) shaped without parentheses violates the ordering
        let bad = Node::binary(
            tok(TokenType::Star, "*"),
            leaf("2"),
            Node::binary(tok(TokenType::Plus, "+"), leaf("3"), leaf("4")),
        );
        assert!(!bad.is_precedence_ordered());

        let good = Node::binary(
            tok(TokenType::Plus, "+"),
            leaf("2"),
            Node::binary(tok(TokenType::Star, "*"), leaf("3"), leaf("4")),
        );
        assert!(good.is_precedence_ordered());
    }

    #[test]
    fn test_tokens_in_order_puts_terminators_last() {
        let tree = Node::unary(
            tok(TokenType::LeftParen, "("),
            Node::unary(tok(TokenType::RightParen, ")"), leaf("5")),
        );
        let texts: Vec<&str> = tree.tokens_in_order().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["(", "5", ")"]);
    }
}
