//! cinfix lexical analyzer
//!
//! Turns C-like source text into a stream of typed tokens. The expression
//! engine pulls tokens through the [`TokenSource`] trait; the preprocessor
//! additionally needs the whitespace, comment and punctuation tokens so it can
//! reproduce the text it does not rewrite.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod logos_token;
pub mod source;
pub mod string_interner;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{Lexer, LexerConfig};
pub use logos_token::LogosToken;
pub use source::{TokenBuffer, TokenSource};
pub use string_interner::InternedString;
pub use token::{Location, Token, TokenType};

/// Lexes `source` into a vector of tokens, trivia included, ending with the
/// end-of-input token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::with_config(
        source,
        LexerConfig {
            include_trivia: true,
        },
    )
    .collect()
}
