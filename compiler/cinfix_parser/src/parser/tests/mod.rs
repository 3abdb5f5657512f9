use super::*;
use cinfix_lexer::{Lexer, Token, TokenType};


/// Builds the textual-order tree for `source` without fixing it.
fn provisional(source: &str) -> Result<Node, ParseError> {
    crate::tests::init_test_logger();
    build(&mut Lexer::new(source))
}

/// Builds and fixes `source` with the default configuration.
fn parsed(source: &str) -> Node {
    crate::tests::init_test_logger();
    match parse_str(source, &ParserConfig::default()) {
        Ok(node) => node,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

/// Lexemes of the tokens the builder stored, in source order.
fn texts(node: &Node) -> Vec<String> {
    node.tokens_in_order()
        .into_iter()
        .map(|t: &Token| match t.token_type {
            TokenType::Eof => "E".to_string(),
            _ => t.text().to_string(),
        })
        .collect()
}
