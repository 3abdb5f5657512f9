use cinfix_lexer::{Location, Token, TokenType};
use thiserror::Error;

/// Errors reported while building an expression tree.
///
/// Every variant carries the token the builder was looking at when it gave up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A `)` with no matching `(`, or end of input inside parentheses
    #[error("Unmatched parenthesis: unexpected {} at {}", .token.describe(), .token.location)]
    UnmatchedParen { token: Token },

    /// A binary operator with nothing complete on its left
    #[error("Unexpected operator {} at {}", .token.describe(), .token.location)]
    UnexpectedOperator { token: Token },

    /// Two operands in a row
    #[error("Missing operator before {} at {}", .token.describe(), .token.location)]
    MissingOperator { token: Token },

    /// The expression stops before its last operand is complete
    #[error("Unexpected {} at {}: expected an operand", .token.describe(), .token.location)]
    UnexpectedEnd { token: Token },

    /// A token that has no meaning in an integer expression
    #[error("Unexpected token {} at {}", .token.describe(), .token.location)]
    UnexpectedToken { token: Token },

    /// The provisional tree would grow deeper than the configured limit
    #[error("Maximum nesting depth of {limit} exceeded at {}", .token.location)]
    TooDeep { limit: usize, token: Token },
}

impl ParseError {
    /// The token the error points at.
    pub fn token(&self) -> &Token {
        match self {
            ParseError::UnmatchedParen { token }
            | ParseError::UnexpectedOperator { token }
            | ParseError::MissingOperator { token }
            | ParseError::UnexpectedEnd { token }
            | ParseError::UnexpectedToken { token }
            | ParseError::TooDeep { token, .. } => token,
        }
    }

    /// Where in the source the error was detected.
    pub fn location(&self) -> Location {
        self.token().location
    }

    /// A short hint on how to repair the input, when there is an obvious one.
    pub fn help(&self) -> Option<String> {
        let help = match self {
            ParseError::UnmatchedParen { token } if token.token_type == TokenType::RightParen => {
                "Did you forget a matching '(' earlier?"
            }
            ParseError::UnmatchedParen { .. } => "Add a ')' to close the open parenthesis",
            ParseError::UnexpectedOperator { .. } => {
                "A binary operator needs a complete value on its left"
            }
            ParseError::MissingOperator { .. } => {
                "Put an operator such as '+' or '*' between the two values"
            }
            ParseError::UnexpectedEnd { .. } => "The expression ends before its last operand",
            ParseError::UnexpectedToken { token } if token.token_type == TokenType::Identifier => {
                "Only integer literals can appear in an expression"
            }
            ParseError::UnexpectedToken { .. } => return None,
            ParseError::TooDeep { .. } => "Split the expression or raise the depth limit",
        };
        Some(help.to_string())
    }
}
