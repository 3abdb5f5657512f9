//! Evaluation of `#if` and `#elif` conditions.

use cinfix_eval::evaluate_tokens;
use cinfix_lexer::{Location, Token, TokenBuffer, TokenType};
use cinfix_parser::ParserConfig;
use log::debug;

use crate::error::PreprocessErrorKind;
use crate::macros::MacroTable;

/// Evaluates the tokens of a conditional directive after its name.
///
/// `defined NAME` and `defined(NAME)` become `1` or `0`, macros are expanded,
/// and any identifier left over counts as `0`. `end` is where the expression
/// ends, for reporting an empty or truncated one.
pub(crate) fn evaluate_condition(
    tokens: &[Token],
    macros: &MacroTable,
    config: &ParserConfig,
    end: Location,
) -> Result<bool, PreprocessErrorKind> {
    let resolved = resolve_defined(tokens, macros)?;
    let mut buffer = TokenBuffer::new(end);
    for token in macros.expand(&resolved) {
        if token.token_type == TokenType::Identifier {
            buffer.push(Token::new(TokenType::IntLiteral, "0", token.location));
        } else {
            buffer.push(token);
        }
    }
    let value = evaluate_tokens(&mut buffer, config)?;
    debug!("condition at {} evaluated to {}", end, value);
    Ok(value != 0)
}

fn resolve_defined(tokens: &[Token], macros: &MacroTable) -> Result<Vec<Token>, PreprocessErrorKind> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().filter(|t| !t.is_trivia()).peekable();
    while let Some(token) = iter.next() {
        if token.token_type != TokenType::Identifier || token.lexeme != "defined" {
            out.push(token.clone());
            continue;
        }
        let parenthesized = iter
            .next_if(|t| t.token_type == TokenType::LeftParen)
            .is_some();
        let name = iter
            .next_if(|t| t.token_type == TokenType::Identifier)
            .ok_or(PreprocessErrorKind::BadDefined)?;
        if parenthesized
            && iter
                .next_if(|t| t.token_type == TokenType::RightParen)
                .is_none()
        {
            return Err(PreprocessErrorKind::BadDefined);
        }
        let value = if macros.is_defined(name.text()) { "1" } else { "0" };
        out.push(Token::new(TokenType::IntLiteral, value, token.location));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinfix_eval::{EvalError, ExprError};
    use cinfix_lexer::tokenize;

    fn tokens(text: &str) -> Vec<Token> {
        tokenize(text)
            .into_iter()
            .filter(|t| t.token_type != TokenType::Eof)
            .collect()
    }

    fn condition(text: &str, macros: &MacroTable) -> Result<bool, PreprocessErrorKind> {
        evaluate_condition(
            &tokens(text),
            macros,
            &ParserConfig::default(),
            Location::default(),
        )
    }

    #[test]
    fn test_defined_forms() {
        let mut macros = MacroTable::new();
        macros.define("DEBUG".into(), Vec::new());
        assert!(condition("defined DEBUG", &macros).unwrap());
        assert!(condition("defined ( DEBUG )", &macros).unwrap());
        assert!(condition("!defined(RELEASE) && defined DEBUG", &macros).unwrap());
        assert!(!condition("defined(RELEASE)", &macros).unwrap());
    }

    #[test]
    fn test_macros_expand_and_unknown_names_are_zero() {
        let mut macros = MacroTable::new();
        macros.define("VERSION".into(), tokens("0x0203"));
        macros.define("MAJOR".into(), tokens("(VERSION >> 8)"));
        assert!(condition("MAJOR == 2", &macros).unwrap());
        assert!(condition("UNKNOWN == 0", &macros).unwrap());
        assert!(!condition("UNKNOWN", &macros).unwrap());
    }

    #[test]
    fn test_bad_defined() {
        let macros = MacroTable::new();
        assert!(matches!(
            condition("defined", &macros),
            Err(PreprocessErrorKind::BadDefined)
        ));
        assert!(matches!(
            condition("defined(X", &macros),
            Err(PreprocessErrorKind::BadDefined)
        ));
    }

    #[test]
    fn test_engine_errors_are_reported() {
        let macros = MacroTable::new();
        assert!(matches!(
            condition("1 / 0", &macros),
            Err(PreprocessErrorKind::Expression(ExprError::Eval(
                EvalError::DivideByZero { .. }
            )))
        ));
        assert!(matches!(
            condition("", &macros),
            Err(PreprocessErrorKind::Expression(ExprError::Parse(_)))
        ));
    }
}
