//! Pull-based token sources consumed by the expression engine.

use std::collections::VecDeque;

use crate::token::{Location, Token, TokenType};

/// Something that hands out tokens one at a time.
///
/// Once the input is exhausted a source returns end-of-input tokens forever.
/// Consumers never look ahead more than one token.
pub trait TokenSource {
    /// Produces the next token.
    fn next_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// A queue of tokens that were produced elsewhere, such as a macro-expanded
/// directive line.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: VecDeque<Token>,
    /// Where the synthesized end-of-input token points
    end: Location,
}

impl TokenBuffer {
    /// Creates an empty buffer whose end-of-input token sits at `end`.
    pub fn new(end: Location) -> Self {
        Self {
            tokens: VecDeque::new(),
            end,
        }
    }

    /// Appends a token. Tokens after an end-of-input token are never read.
    pub fn push(&mut self, token: Token) {
        self.end = token.location;
        self.tokens.push_back(token);
    }

    /// Number of buffered tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens are buffered
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|t| t.location).unwrap_or_default();
        Self {
            tokens: tokens.into(),
            end,
        }
    }
}

impl FromIterator<Token> for TokenBuffer {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl TokenSource for TokenBuffer {
    fn next_token(&mut self) -> Token {
        match self.tokens.pop_front() {
            Some(token) => {
                if token.token_type == TokenType::Eof {
                    // Keep answering end-of-input from the same place.
                    self.tokens.clear();
                    self.end = token.location;
                }
                token
            }
            None => Token::eof(self.end),
        }
    }
}
