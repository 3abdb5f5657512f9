//! Raw token definitions driven by `logos`.

use logos::Logos;

/// Raw token type recognised by the logos state machine.
///
/// Anything the patterns below do not cover is reported by logos as an error
/// and becomes [`crate::TokenType::Unknown`].
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogosToken {
    // --- Literals ---
    /// `0x` or `0X` followed by hex digits
    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexLiteral,
    /// Decimal literal, or octal when it starts with `0`
    #[regex(r"0[0-7]*")]
    #[regex(r"[1-9][0-9]*")]
    IntLiteral,
    /// Double-quoted string on one line
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,
    /// Single-quoted character constant
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    CharLiteral,

    /// Identifier, keyword or directive name
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // --- Operators (multi-char first) ---
    /// `<<`
    #[token("<<")]
    Shl,
    /// `>>`
    #[token(">>")]
    Shr,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `&`
    #[token("&")]
    BitAnd,
    /// `^`
    #[token("^")]
    BitXor,
    /// `|`
    #[token("|")]
    BitOr,
    /// `!`
    #[token("!")]
    Not,
    /// `~`
    #[token("~")]
    BitNot,

    // --- Delimiters ---
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `#`
    #[token("#")]
    Pound,
    /// `\`
    #[token("\\")]
    Backslash,
    /// Punctuation with no meaning in expressions
    #[token("=")]
    #[token(",")]
    #[token(";")]
    #[token(":")]
    #[token("?")]
    #[token(".")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    Punct,

    // --- Trivia ---
    /// Line break
    #[token("\n")]
    Newline,
    /// Run of blanks other than newlines
    #[regex(r"[ \t\r\x0B\x0C]+")]
    Whitespace,
    /// `// ...` up to the end of the line
    #[regex(r"//[^\n]*")]
    LineComment,
    /// Closed `/* ... */` comment
    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,
    /// `/*` with no closing `*/` before end of input
    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedComment,
}
