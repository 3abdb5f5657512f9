//! Tree-walking evaluation with C `int` semantics.
//!
//! Arithmetic wraps in two's complement, shift counts are taken modulo 32 and
//! `>>` is arithmetic. Comparisons and the logical operators produce `0` or
//! `1`. Both operands of `&&` and `||` are always evaluated, so an error on
//! the right-hand side is reported even when the left side decides the result.

use std::num::IntErrorKind;

use cinfix_ast::Node;
use cinfix_lexer::{Token, TokenType};

use crate::error::EvalError;

/// Computes the value of a fixed tree.
///
/// Evaluation is pure. A tree containing an operator that cannot occur in the
/// position it holds (for example a `*` in a unary node) is a bug in whatever
/// built it, and panics.
pub fn evaluate(node: &Node) -> Result<i32, EvalError> {
    match node {
        Node::Leaf(token) => literal_value(token),
        Node::Unary { op, operand } => Ok(apply_unary(op, evaluate(operand)?)),
        Node::Binary { op, left, right } => {
            let lhs = evaluate(left)?;
            let rhs = evaluate(right)?;
            apply_binary(op, lhs, rhs)
        }
    }
}

/// Reads an integer literal.
///
/// A leading `0` selects octal and `0x`/`0X` hexadecimal. Values up to
/// `u32::MAX` are accepted and reinterpreted as `i32`, so `0xFFFFFFFF` is `-1`.
pub fn literal_value(token: &Token) -> Result<i32, EvalError> {
    let text = token.text();
    let (digits, radix) = match token.token_type {
        TokenType::HexLiteral => (text.get(2..).unwrap_or_default(), 16),
        TokenType::IntLiteral if text.len() > 1 && text.starts_with('0') => (&text[1..], 8),
        TokenType::IntLiteral => (text, 10),
        other => panic!(
            "leaf holds non-literal token {:?} at {}",
            other, token.location
        ),
    };

    match u32::from_str_radix(digits, radix) {
        Ok(value) => Ok(value as i32),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Err(EvalError::LiteralOutOfRange {
            literal: token.clone(),
        }),
        Err(err) => panic!(
            "malformed literal {:?} at {}: {}",
            text, token.location, err
        ),
    }
}

fn apply_unary(op: &Token, value: i32) -> i32 {
    match op.token_type {
        // Grouping and terminators pass their operand through.
        TokenType::Plus
        | TokenType::LeftParen
        | TokenType::RightParen
        | TokenType::Eof
        | TokenType::Newline => value,
        TokenType::Minus => value.wrapping_neg(),
        TokenType::Not => i32::from(value == 0),
        TokenType::BitNot => !value,
        other => panic!(
            "unary node carries operator {:?} at {}",
            other, op.location
        ),
    }
}

fn apply_binary(op: &Token, lhs: i32, rhs: i32) -> Result<i32, EvalError> {
    use TokenType::*;
    let value = match op.token_type {
        Star => lhs.wrapping_mul(rhs),
        Slash | Percent if rhs == 0 => {
            return Err(EvalError::DivideByZero { op: op.clone() });
        }
        Slash => lhs.wrapping_div(rhs),
        Percent => lhs.wrapping_rem(rhs),
        Plus => lhs.wrapping_add(rhs),
        Minus => lhs.wrapping_sub(rhs),
        Shl => lhs.wrapping_shl(rhs as u32),
        Shr => lhs.wrapping_shr(rhs as u32),
        Less => i32::from(lhs < rhs),
        Greater => i32::from(lhs > rhs),
        LessEqual => i32::from(lhs <= rhs),
        GreaterEqual => i32::from(lhs >= rhs),
        EqualEqual => i32::from(lhs == rhs),
        NotEqual => i32::from(lhs != rhs),
        BitAnd => lhs & rhs,
        BitXor => lhs ^ rhs,
        BitOr => lhs | rhs,
        AndAnd => i32::from(lhs != 0 && rhs != 0),
        OrOr => i32::from(lhs != 0 || rhs != 0),
        other => panic!(
            "binary node carries operator {:?} at {}",
            other, op.location
        ),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinfix_lexer::Location;
    use pretty_assertions::assert_eq;

    fn tok(token_type: TokenType, text: &str) -> Token {
        Token::new(token_type, text, Location::default())
    }

    fn int(text: &str) -> Node {
        Node::Leaf(tok(TokenType::IntLiteral, text))
    }

    #[test]
    fn test_literal_bases() {
        assert_eq!(literal_value(&tok(TokenType::IntLiteral, "10")), Ok(10));
        assert_eq!(literal_value(&tok(TokenType::IntLiteral, "010")), Ok(8));
        assert_eq!(literal_value(&tok(TokenType::IntLiteral, "0")), Ok(0));
        assert_eq!(literal_value(&tok(TokenType::HexLiteral, "0x1F")), Ok(31));
        assert_eq!(literal_value(&tok(TokenType::HexLiteral, "0XfF")), Ok(255));
    }

    #[test]
    fn test_literal_range() {
        assert_eq!(
            literal_value(&tok(TokenType::HexLiteral, "0xFFFFFFFF")),
            Ok(-1)
        );
        assert_eq!(
            literal_value(&tok(TokenType::IntLiteral, "2147483648")),
            Ok(i32::MIN)
        );
        let big = tok(TokenType::IntLiteral, "4294967296");
        assert_eq!(
            literal_value(&big),
            Err(EvalError::LiteralOutOfRange { literal: big.clone() })
        );
    }

    #[test]
    #[should_panic(expected = "malformed literal")]
    fn test_malformed_digits_panic() {
        let _ = literal_value(&tok(TokenType::IntLiteral, "08"));
    }

    #[test]
    fn test_unary_operators() {
        let neg = Node::unary(tok(TokenType::Minus, "-"), int("5"));
        assert_eq!(evaluate(&neg), Ok(-5));
        let not = Node::unary(tok(TokenType::Not, "!"), int("0"));
        assert_eq!(evaluate(&not), Ok(1));
        let inv = Node::unary(tok(TokenType::BitNot, "~"), int("10"));
        assert_eq!(evaluate(&inv), Ok(-11));
        let end = Node::unary(Token::eof(Location::default()), int("7"));
        assert_eq!(evaluate(&end), Ok(7));
    }

    #[test]
    fn test_wrapping_arithmetic() {
        let min = Node::Leaf(tok(TokenType::HexLiteral, "0x80000000"));
        let minus_one = || Node::unary(tok(TokenType::Minus, "-"), int("1"));
        let div = Node::binary(tok(TokenType::Slash, "/"), min.clone(), minus_one());
        assert_eq!(evaluate(&div), Ok(i32::MIN));
        let rem = Node::binary(tok(TokenType::Percent, "%"), min.clone(), minus_one());
        assert_eq!(evaluate(&rem), Ok(0));
        let neg = Node::unary(tok(TokenType::Minus, "-"), min);
        assert_eq!(evaluate(&neg), Ok(i32::MIN));
    }

    #[test]
    fn test_shifts() {
        let shl = Node::binary(tok(TokenType::Shl, "<<"), int("1"), int("33"));
        assert_eq!(evaluate(&shl), Ok(2));
        let minus_eight = Node::unary(tok(TokenType::Minus, "-"), int("8"));
        let shr = Node::binary(tok(TokenType::Shr, ">>"), minus_eight, int("1"));
        assert_eq!(evaluate(&shr), Ok(-4));
    }

    #[test]
    fn test_divide_by_zero_reports_operator() {
        let op = tok(TokenType::Slash, "/");
        let tree = Node::binary(op.clone(), int("5"), int("0"));
        assert_eq!(evaluate(&tree), Err(EvalError::DivideByZero { op }));
    }

    #[test]
    #[should_panic(expected = "binary node carries operator")]
    fn test_misplaced_operator_panics() {
        let tree = Node::binary(tok(TokenType::Not, "!"), int("1"), int("2"));
        let _ = evaluate(&tree);
    }
}
