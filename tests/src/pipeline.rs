// Lexer, builder, fixer and evaluator driven together.
use cinfix_ast::{from_json, to_json, Node};
use cinfix_eval::{evaluate, evaluate_source, evaluate_tokens, EvalError, ExprError};
use cinfix_lexer::{tokenize, Lexer, TokenBuffer, TokenType};
use cinfix_parser::{build, fix, parse_str, Fixer, ParseError, ParserConfig};
use pretty_assertions::assert_eq;

fn value(source: &str) -> i32 {
    evaluate_source(source).unwrap_or_else(|e| panic!("{source}: {e}"))
}

#[test]
fn table_of_values() {
    let cases = [
        ("2+3*4", 14),
        ("48/4/3/2", 2),
        ("-5+3", -2),
        ("~10+17", 6),
        ("!0", 1),
        ("(2+3)*4", 20),
        ("1 << 4 | 3", 19),
        ("7 & 3 ^ 1", 2),
        ("0x1F + 010", 39),
        ("3 > 2 == 1", 1),
        ("1 || 1 / 1", 1),
        ("-(-(3))", 3),
        ("2147483647 + 1", i32::MIN),
    ];
    for (source, expected) in cases {
        assert_eq!(value(source), expected, "{source}");
    }
}

#[test]
fn fixing_by_hand_matches_the_pipeline() {
    let provisional = build(&mut Lexer::new("10 - 4 - 3 * 2")).unwrap();
    assert!(!provisional.is_precedence_ordered());
    let fixed = fix(provisional);
    assert!(fixed.is_precedence_ordered());
    assert_eq!(evaluate(&fixed), Ok(0));
    assert_eq!(fixed, parse_str("10 - 4 - 3 * 2", &ParserConfig::default()).unwrap());
}

#[test]
fn rotations_are_counted_across_parens() {
    let provisional = build(&mut Lexer::new("(1 * 2 + 3) * 4 + 5")).unwrap();
    let mut fixer = Fixer::new();
    let fixed = fixer.fix(provisional);
    assert_eq!(fixer.rotations(), 2);
    assert_eq!(fixed.to_string(), "(1*2+3)*4+5");
    assert_eq!(evaluate(&fixed), Ok(25));
}

#[test]
fn json_round_trip_keeps_the_value() {
    let tree = parse_str("(7 - 2) * -3 % 4", &ParserConfig::default()).unwrap();
    let restored: Node = from_json(&to_json(&tree).unwrap()).unwrap();
    assert_eq!(restored, tree);
    assert_eq!(evaluate(&restored), Ok(-3));
}

#[test]
fn tokens_from_a_buffer_evaluate_like_text() {
    let mut tokens: TokenBuffer = tokenize("6 * 7 /* answer */")
        .into_iter()
        .filter(|t| !t.is_trivia())
        .collect();
    assert_eq!(
        evaluate_tokens(&mut tokens, &ParserConfig::default()),
        Ok(42)
    );
}

#[test]
fn one_expression_per_line() {
    let mut lexer = Lexer::new("1 + 2\n(3\n");
    let config = ParserConfig::default();
    assert_eq!(evaluate_tokens(&mut lexer, &config), Ok(3));
    let err = evaluate_tokens(&mut lexer, &config).unwrap_err();
    match err {
        ExprError::Parse(ParseError::UnmatchedParen { token }) => {
            assert_eq!(token.token_type, TokenType::Newline);
            assert_eq!(token.location.line, 2);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn errors_from_both_stages() {
    assert!(matches!(
        evaluate_source("1 % (2 - 2)"),
        Err(ExprError::Eval(EvalError::DivideByZero { .. }))
    ));
    assert!(matches!(
        evaluate_source("4294967296"),
        Err(ExprError::Eval(EvalError::LiteralOutOfRange { .. }))
    ));
    assert!(matches!(
        evaluate_source("1 2"),
        Err(ExprError::Parse(ParseError::MissingOperator { .. }))
    ));
}
