//! The engine must agree with a conventional precedence-climbing evaluator.

use cinfix_ast::precedence;
use cinfix_eval::{evaluate_source, literal_value, EvalError, ExprError};
use cinfix_lexer::{Lexer, Token, TokenType};
use proptest::prelude::*;

/// Recursive-descent evaluator over the token list. Returns `None` on a
/// division by zero.
struct Reference {
    tokens: Vec<Token>,
    pos: usize,
}

impl Reference {
    fn evaluate(source: &str) -> Option<i32> {
        let mut reference = Reference {
            tokens: Lexer::new(source).collect(),
            pos: 0,
        };
        let value = reference.binary(1);
        assert_eq!(reference.peek().token_type, TokenType::Eof, "{source}");
        value
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn next(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn binary(&mut self, min: u8) -> Option<i32> {
        let mut lhs = self.unary();
        while let Some(level) = precedence(self.peek().token_type) {
            if level < min {
                break;
            }
            let op = self.next();
            let rhs = self.binary(level + 1);
            lhs = match (lhs, rhs) {
                (Some(l), Some(r)) => apply(op.token_type, l, r),
                _ => None,
            };
        }
        lhs
    }

    fn unary(&mut self) -> Option<i32> {
        let token = self.next();
        match token.token_type {
            TokenType::Minus => self.unary().map(i32::wrapping_neg),
            TokenType::Plus => self.unary(),
            TokenType::Not => self.unary().map(|v| i32::from(v == 0)),
            TokenType::BitNot => self.unary().map(|v| !v),
            TokenType::LeftParen => {
                let value = self.binary(1);
                assert_eq!(self.next().token_type, TokenType::RightParen);
                value
            }
            _ => Some(literal_value(&token).unwrap()),
        }
    }
}

fn apply(op: TokenType, l: i32, r: i32) -> Option<i32> {
    use TokenType::*;
    Some(match op {
        Star => l.wrapping_mul(r),
        Slash | Percent if r == 0 => return None,
        Slash => l.wrapping_div(r),
        Percent => l.wrapping_rem(r),
        Plus => l.wrapping_add(r),
        Minus => l.wrapping_sub(r),
        Shl => l.wrapping_shl(r as u32),
        Shr => l.wrapping_shr(r as u32),
        Less => (l < r) as i32,
        Greater => (l > r) as i32,
        LessEqual => (l <= r) as i32,
        GreaterEqual => (l >= r) as i32,
        EqualEqual => (l == r) as i32,
        NotEqual => (l != r) as i32,
        BitAnd => l & r,
        BitXor => l ^ r,
        BitOr => l | r,
        AndAnd => (l != 0 && r != 0) as i32,
        OrOr => (l != 0 || r != 0) as i32,
        other => panic!("not a binary operator: {other:?}"),
    })
}

const BINARY: &[&str] = &[
    "*", "/", "%", "+", "-", "<<", ">>", "<", ">", "<=", ">=", "==", "!=", "&", "^", "|", "&&",
    "||",
];
const PREFIX: &[&str] = &["-", "+", "!", "~"];

fn expression() -> impl Strategy<Value = String> {
    let literal = prop_oneof![
        (0u32..200).prop_map(|n| n.to_string()),
        (0u32..64).prop_map(|n| format!("0{n:o}")),
        any::<u32>().prop_map(|n| format!("0x{n:x}")),
    ];
    literal.prop_recursive(6, 64, 4, |inner| {
        prop_oneof![
            3 => (inner.clone(), prop::sample::select(BINARY), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            1 => (prop::sample::select(PREFIX), inner.clone()).prop_map(|(op, e)| format!("{op}{e}")),
            1 => inner.prop_map(|e| format!("({e})")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn agrees_with_precedence_climbing(source in expression()) {
        let expected = Reference::evaluate(&source);
        match evaluate_source(&source) {
            Ok(value) => prop_assert_eq!(Some(value), expected, "{}", source),
            Err(ExprError::Eval(EvalError::DivideByZero { .. })) => {
                prop_assert_eq!(expected, None, "{}", source)
            }
            Err(err) => prop_assert!(false, "{} failed: {}", source, err),
        }
    }
}
