//! Object-like macro table and expansion.

use std::collections::HashMap;

use cinfix_lexer::{InternedString, Location, Token, TokenType};
use log::{trace, warn};

/// Defined macros, keyed by name. Bodies are stored as tokens with leading and
/// trailing whitespace and comments removed.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: HashMap<InternedString, Vec<Token>>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines or redefines a macro.
    pub fn define(&mut self, name: InternedString, body: Vec<Token>) {
        let body = trim_trivia(body);
        if let Some(previous) = self.macros.get(&name) {
            if !same_text(previous, &body) {
                warn!("macro '{name}' redefined");
            }
        }
        self.macros.insert(name, body);
    }

    /// Removes a macro. Returns whether it was defined.
    pub fn undef(&mut self, name: &str) -> bool {
        self.macros.remove(name).is_some()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&[Token]> {
        self.macros.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn clear(&mut self) {
        self.macros.clear();
    }

    /// Replaces every macro name in `tokens` by its body, recursively. A macro
    /// is not expanded again inside its own expansion, so self-referencing
    /// definitions terminate.
    pub fn expand(&self, tokens: &[Token]) -> Vec<Token> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut expanding = Vec::new();
        for token in tokens {
            self.expand_token(token, token.location, &mut expanding, &mut out);
        }
        out
    }

    /// Expands one token. Tokens coming out of a body are moved to `site`, the
    /// location of the outermost macro use, so errors point at the source line.
    fn expand_token(
        &self,
        token: &Token,
        site: Location,
        expanding: &mut Vec<InternedString>,
        out: &mut Vec<Token>,
    ) {
        let body = match token.token_type {
            TokenType::Identifier if !expanding.contains(&token.lexeme) => {
                self.macros.get(&token.lexeme)
            }
            _ => None,
        };
        let Some(body) = body else {
            out.push(Token {
                location: site,
                ..token.clone()
            });
            return;
        };

        trace!("expanding '{}' at {}", token.lexeme, site);
        expanding.push(token.lexeme.clone());
        for inner in body {
            self.expand_token(inner, site, expanding, out);
        }
        expanding.pop();
    }
}

/// Total length of a token sequence's text, in characters.
pub fn text_len(tokens: &[Token]) -> usize {
    tokens.iter().map(|t| t.text().chars().count()).sum()
}

/// Drops whitespace and comments from both ends of a macro body.
pub(crate) fn trim_trivia(mut body: Vec<Token>) -> Vec<Token> {
    while body.last().is_some_and(Token::is_trivia) {
        body.pop();
    }
    let leading = body.iter().take_while(|t| t.is_trivia()).count();
    body.drain(..leading);
    body
}

fn same_text(a: &[Token], b: &[Token]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.lexeme == y.lexeme)
}
