//! Tokens, their types and source locations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::string_interner::InternedString;

/// Represents a token's location in the source code.
///
/// Line and column numbers are 1-based, the byte offset is 0-based. Columns
/// count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// The 1-based line number in the source file
    pub line: usize,
    /// The 1-based column number in the source file
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

impl Location {
    /// Creates a location from its parts.
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

/// The type of a token.
///
/// Literal tokens carry no value here; the lexeme keeps the source text and
/// the evaluator interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenType {
    // Literals
    /// Decimal, or octal when the lexeme starts with `0`
    IntLiteral,
    /// Hexadecimal literal with a `0x`/`0X` prefix
    HexLiteral,
    /// `"..."`
    StringLiteral,
    /// `'...'`
    CharLiteral,
    /// Identifier or directive name
    Identifier,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    NotEqual,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Not,
    /// `~`
    BitNot,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `#`
    Pound,
    /// `\`
    Backslash,
    /// Any other punctuation the preprocessor passes through
    Punct,

    // Trivia and structure
    /// Spaces, tabs, carriage returns
    Whitespace,
    /// `\n`
    Newline,
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/*` never closed; runs to the end of input
    UnterminatedComment,
    /// A character no pattern recognises
    Unknown,
    /// End of input
    Eof,
}

impl TokenType {
    /// Returns true for tokens that carry no meaning for the expression engine
    /// and are only kept for text reproduction.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenType::Whitespace | TokenType::LineComment | TokenType::BlockComment
        )
    }

    /// Returns true for integer literal tokens of either base.
    pub fn is_integer_literal(self) -> bool {
        matches!(self, TokenType::IntLiteral | TokenType::HexLiteral)
    }

    /// Returns true for tokens that end an expression line.
    pub fn is_line_end(self) -> bool {
        matches!(self, TokenType::Newline | TokenType::Eof)
    }
}

/// Represents a token in the source code, including its type, lexeme, and location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The type of the token
    pub token_type: TokenType,
    /// The original source text of the token
    pub lexeme: InternedString,
    /// The location of the token in the source code
    pub location: Location,
}

impl Token {
    /// Creates a new token from a string that can be converted to an InternedString.
    pub fn new<S: Into<InternedString>>(
        token_type: TokenType,
        lexeme: S,
        location: Location,
    ) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Creates an end-of-input token. Its lexeme is empty.
    pub fn eof(location: Location) -> Self {
        Self::new(TokenType::Eof, "", location)
    }

    /// Returns the token's source text.
    pub fn text(&self) -> &str {
        self.lexeme.as_str()
    }

    /// Returns true if this token is whitespace or a comment
    pub fn is_trivia(&self) -> bool {
        self.token_type.is_trivia()
    }

    /// Returns a printable form of the token for messages: the lexeme, or a
    /// description for tokens whose text is empty or invisible.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Eof => "end of input".to_string(),
            TokenType::Newline => "end of line".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.token_type, self.location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
