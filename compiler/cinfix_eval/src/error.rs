use cinfix_lexer::Token;
use cinfix_parser::ParseError;
use thiserror::Error;

/// Errors raised while computing the value of a well-formed tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The right operand of `/` or `%` evaluated to zero
    #[error("Division by zero in '{}' at {}", .op.text(), .op.location)]
    DivideByZero { op: Token },

    /// A literal whose value does not fit in 32 bits
    #[error("Integer literal {} at {} does not fit in 32 bits", .literal.text(), .literal.location)]
    LiteralOutOfRange { literal: Token },
}

/// Any failure of the lex, build, fix and evaluate pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExprError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinfix_lexer::{Location, TokenType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let op = Token::new(TokenType::Percent, "%", Location::new(2, 3, 9));
        assert_eq!(
            EvalError::DivideByZero { op }.to_string(),
            "Division by zero in '%' at 2:3"
        );

        let literal = Token::new(TokenType::HexLiteral, "0x100000000", Location::default());
        let err: ExprError = EvalError::LiteralOutOfRange { literal }.into();
        assert_eq!(
            err.to_string(),
            "Integer literal 0x100000000 at 1:1 does not fit in 32 bits"
        );
    }
}
