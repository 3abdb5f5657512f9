//! Lexer implementation for cinfix
//! Converts source text into a stream of tokens for the expression engine
//! and the preprocessor.

use logos::Logos;

use crate::source::TokenSource;
use crate::string_interner::InternedString;
use crate::token::{Location, Token, TokenType};
use crate::LogosToken;

/// Configuration for the lexer
#[derive(Debug, Clone, Copy, Default)]
pub struct LexerConfig {
    /// Whether to deliver whitespace and comment tokens. Newlines are always
    /// delivered because they terminate directives and expressions.
    pub include_trivia: bool,
}

/// The main lexer struct that holds the state of the lexing process
pub struct Lexer<'a> {
    /// The source code being lexed
    source: &'a str,
    /// The current line number (1-based)
    line: usize,
    /// The current column number (1-based)
    column: usize,
    /// The byte offset that `line`/`column` describe
    offset: usize,
    /// The inner Logos lexer
    inner: logos::Lexer<'a, LogosToken>,
    config: LexerConfig,
    /// Set once the end-of-input token has been produced
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code. Trivia is skipped.
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    /// Create a new lexer with a custom configuration
    pub fn with_config(source: &'a str, config: LexerConfig) -> Self {
        Self {
            source,
            line: 1,
            column: 1,
            offset: 0,
            inner: LogosToken::lexer(source),
            config,
            finished: false,
        }
    }

    /// Moves the tracked position forward to `target`, counting characters so
    /// multi-byte text keeps columns right.
    fn sync_position_to(&mut self, target: usize) {
        for c in self.source[self.offset..target].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column, self.offset)
    }

    /// Token types whose text is unbounded: literals, trivia and junk.
    fn is_open_ended(token_type: TokenType) -> bool {
        token_type.is_trivia()
            || matches!(
                token_type,
                TokenType::IntLiteral
                    | TokenType::HexLiteral
                    | TokenType::StringLiteral
                    | TokenType::CharLiteral
                    | TokenType::UnterminatedComment
                    | TokenType::Unknown
            )
    }

    /// Convert a LogosToken to our semantic TokenType
    fn convert(raw: LogosToken) -> TokenType {
        match raw {
            LogosToken::HexLiteral => TokenType::HexLiteral,
            LogosToken::IntLiteral => TokenType::IntLiteral,
            LogosToken::StringLiteral => TokenType::StringLiteral,
            LogosToken::CharLiteral => TokenType::CharLiteral,
            LogosToken::Identifier => TokenType::Identifier,

            LogosToken::Shl => TokenType::Shl,
            LogosToken::Shr => TokenType::Shr,
            LogosToken::LessEqual => TokenType::LessEqual,
            LogosToken::GreaterEqual => TokenType::GreaterEqual,
            LogosToken::EqualEqual => TokenType::EqualEqual,
            LogosToken::NotEqual => TokenType::NotEqual,
            LogosToken::AndAnd => TokenType::AndAnd,
            LogosToken::OrOr => TokenType::OrOr,
            LogosToken::Plus => TokenType::Plus,
            LogosToken::Minus => TokenType::Minus,
            LogosToken::Star => TokenType::Star,
            LogosToken::Slash => TokenType::Slash,
            LogosToken::Percent => TokenType::Percent,
            LogosToken::Less => TokenType::Less,
            LogosToken::Greater => TokenType::Greater,
            LogosToken::BitAnd => TokenType::BitAnd,
            LogosToken::BitXor => TokenType::BitXor,
            LogosToken::BitOr => TokenType::BitOr,
            LogosToken::Not => TokenType::Not,
            LogosToken::BitNot => TokenType::BitNot,

            LogosToken::LeftParen => TokenType::LeftParen,
            LogosToken::RightParen => TokenType::RightParen,
            LogosToken::Pound => TokenType::Pound,
            LogosToken::Backslash => TokenType::Backslash,
            LogosToken::Punct => TokenType::Punct,

            LogosToken::Newline => TokenType::Newline,
            LogosToken::Whitespace => TokenType::Whitespace,
            LogosToken::LineComment => TokenType::LineComment,
            LogosToken::BlockComment => TokenType::BlockComment,
            LogosToken::UnterminatedComment => TokenType::UnterminatedComment,
        }
    }

    /// Get the next token from the source code.
    ///
    /// After the input is exhausted this keeps returning end-of-input tokens
    /// positioned at the end of the source.
    pub fn next_token(&mut self) -> Token {
        loop {
            let raw = match self.inner.next() {
                Some(raw) => raw,
                None => {
                    self.sync_position_to(self.source.len());
                    self.finished = true;
                    return Token::eof(self.location());
                }
            };

            let span = self.inner.span();
            self.sync_position_to(span.start);
            let source = self.source;
            let lexeme = &source[span];

            let token_type = match raw {
                Ok(raw) => Self::convert(raw),
                Err(()) => {
                    #[cfg(feature = "logging")]
                    log::debug!("unrecognised input {:?} at {}", lexeme, self.location());
                    TokenType::Unknown
                }
            };

            if token_type.is_trivia() && !self.config.include_trivia {
                continue;
            }

            // Only names and operators go through the shared table.
            let lexeme = if Self::is_open_ended(token_type) {
                InternedString::unshared(lexeme)
            } else {
                InternedString::new(lexeme)
            };
            let token = Token::new(token_type, lexeme, self.location());
            #[cfg(feature = "logging")]
            log::trace!("lexed {}", token);
            return token;
        }
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

/// Yields every token up to and including the end-of-input token.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            None
        } else {
            Some(self.next_token())
        }
    }
}
