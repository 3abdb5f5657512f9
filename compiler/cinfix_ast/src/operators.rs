//! Operator classes and the binary precedence table.

use cinfix_lexer::TokenType;

/// The role a token plays when the tree builder meets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// An operand.
    Leaf,
    /// A prefix operator or a structural token (parentheses, end of input).
    Unary,
    /// An infix operator.
    Binary,
    /// `+` or `-`: unary or binary depending on what precedes it.
    Ambiguous,
}

/// Maps a token type to its arity role.
///
/// Returns `None` for tokens that have no place in an integer expression
/// (identifiers, strings, stray punctuation, unrecognised characters) and for
/// trivia, which the builder drops before classifying.
pub fn classify(token_type: TokenType) -> Option<Arity> {
    use TokenType::*;
    match token_type {
        Star | Slash | Percent | Shl | Shr | Less | Greater | LessEqual | GreaterEqual
        | EqualEqual | NotEqual | BitAnd | BitXor | BitOr | AndAnd | OrOr => Some(Arity::Binary),
        Not | BitNot | LeftParen | RightParen | Eof | Newline => Some(Arity::Unary),
        Plus | Minus => Some(Arity::Ambiguous),
        IntLiteral | HexLiteral => Some(Arity::Leaf),
        StringLiteral | CharLiteral | Identifier | Pound | Backslash | Punct | Whitespace
        | LineComment | BlockComment | UnterminatedComment | Unknown => None,
    }
}

/// Binding strength of a binary operator, from 1 (`||`, loosest) to 10
/// (`*`, `/`, `%`, tightest). Tokens that are never binary have none.
pub fn precedence(token_type: TokenType) -> Option<u8> {
    use TokenType::*;
    let level = match token_type {
        Star | Slash | Percent => 10,
        Plus | Minus => 9,
        Shl | Shr => 8,
        Less | Greater | LessEqual | GreaterEqual => 7,
        EqualEqual | NotEqual => 6,
        BitAnd => 5,
        BitXor => 4,
        BitOr => 3,
        AndAnd => 2,
        OrOr => 1,
        _ => return None,
    };
    Some(level)
}
