//! Single-pass construction of the textual-order tree.
//!
//! The builder does not know about precedence. It records binary operators in
//! the order it meets them, so `2*3+4` comes out as `2*(3+(4 E))` where `E` is
//! the end-of-input token wrapping the last operand. The
//! [`Fixer`](super::Fixer) restores the intended shape afterwards.

use cinfix_ast::{classify, Arity, Node};
use cinfix_lexer::{Token, TokenSource, TokenType};
use log::trace;

use super::config::ParserConfig;
use super::error::ParseError;

/// The operand being assembled at one scan level: prefix operators waiting for
/// a value, and the value once it has been read.
#[derive(Debug, Default)]
struct Operand {
    prefixes: Vec<Token>,
    value: Option<Node>,
}

impl Operand {
    /// True once a literal or a parenthesised group has been read.
    fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Takes the finished operand, wrapping the value in its prefixes from the
    /// innermost outwards. Returns `None` if there is no value yet.
    fn take_complete(&mut self) -> Option<Node> {
        let value = self.value.take()?;
        Some(
            self.prefixes
                .drain(..)
                .rev()
                .fold(value, |operand, op| Node::unary(op, operand)),
        )
    }
}

/// Assembles textual-order trees from a token source.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    config: ParserConfig,
}

impl TreeBuilder {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Reads one expression from `source`, up to and including the
    /// end-of-input or newline token that terminates it.
    pub fn build<S: TokenSource>(&self, source: &mut S) -> Result<Node, ParseError> {
        self.build_level(source, false, 0)
    }

    /// Builds one scan level. A level ends at end of input, or at `)` when it
    /// was entered through `(`.
    ///
    /// `base` is the depth at which this level's tree will hang.
    fn build_level<S: TokenSource>(
        &self,
        source: &mut S,
        inside_parens: bool,
        base: usize,
    ) -> Result<Node, ParseError> {
        // (left operand, operator) pairs in the order they were read
        let mut chain: Vec<(Node, Token)> = Vec::new();
        let mut operand = Operand::default();

        loop {
            let token = source.next_token();
            if token.is_trivia() {
                continue;
            }
            trace!(
                "builder: {:?} {:?} at {} (depth {})",
                token.token_type,
                token.text(),
                token.location,
                base + chain.len()
            );

            let arity = match classify(token.token_type) {
                Some(Arity::Ambiguous) if operand.has_value() => Arity::Binary,
                Some(Arity::Ambiguous) => Arity::Unary,
                Some(arity) => arity,
                None => return Err(ParseError::UnexpectedToken { token }),
            };

            match arity {
                Arity::Unary if is_terminator(token.token_type) => {
                    let closes_paren = token.token_type == TokenType::RightParen;
                    if closes_paren != inside_parens {
                        return Err(ParseError::UnmatchedParen { token });
                    }
                    let Some(last) = operand.take_complete() else {
                        return Err(ParseError::UnexpectedEnd { token });
                    };
                    let tail = Node::unary(token, last);
                    return Ok(chain
                        .into_iter()
                        .rev()
                        .fold(tail, |right, (left, op)| Node::binary(op, left, right)));
                }
                Arity::Leaf | Arity::Unary => {
                    if operand.has_value() {
                        return Err(ParseError::MissingOperator { token });
                    }
                    let depth = base + chain.len() + operand.prefixes.len() + 1;
                    self.check_depth(depth, &token)?;
                    match token.token_type {
                        TokenType::LeftParen => {
                            let inner = self.build_level(source, true, depth)?;
                            operand.value = Some(Node::unary(token, inner));
                        }
                        _ if arity == Arity::Leaf => operand.value = Some(Node::Leaf(token)),
                        _ => operand.prefixes.push(token),
                    }
                }
                Arity::Binary => {
                    let Some(left) = operand.take_complete() else {
                        return Err(ParseError::UnexpectedOperator { token });
                    };
                    self.check_depth(base + chain.len() + 1, &token)?;
                    chain.push((left, token));
                }
                Arity::Ambiguous => unreachable!("ambiguous operators are resolved above"),
            }
        }
    }

    fn check_depth(&self, depth: usize, token: &Token) -> Result<(), ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.config.max_depth,
                token: token.clone(),
            });
        }
        Ok(())
    }
}

/// Tokens that end a scan level.
fn is_terminator(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::RightParen | TokenType::Eof | TokenType::Newline
    )
}

/// Builds a textual-order tree with the default configuration.
pub fn build<S: TokenSource>(source: &mut S) -> Result<Node, ParseError> {
    TreeBuilder::default().build(source)
}
