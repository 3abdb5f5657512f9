use cinfix_lexer::Token;

use super::error::ParseError;

/// A region of source text, in bytes and 1-based line/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

/// A parse problem ready to be shown to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at a specific token with a custom message
    pub fn at_token<S: Into<String>>(token: &Token, message: S) -> Self {
        Self {
            message: message.into(),
            span: span_from_token(token),
            help: None,
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Self {
            help: err.help(),
            ..Diagnostic::at_token(err.token(), err.to_string())
        }
    }
}

/// Build a Span that covers an entire token
fn span_from_token(token: &Token) -> Span {
    Span {
        start: token.location.offset,
        end: token.location.offset + token.lexeme.len(),
        line: token.location.line,
        column: token.location.column,
    }
}

/// Renders a diagnostic with the offending source line and an underline.
///
/// A single-character (or empty, for end of input) span is marked with `^`,
/// longer spans with `~`.
pub fn render_snippet(diag: &Diagnostic, source: &str) -> String {
    let span = diag.span;
    let mut out = format!("error: {}\n", diag.message);
    out.push_str(&format!(" --> line {}, col {}\n", span.line, span.column));

    if let Some(text) = source.lines().nth(span.line.saturating_sub(1)) {
        let gutter = span.line.to_string().len();
        let width = source
            .get(span.start..span.end)
            .map_or(1, |s| s.chars().count())
            .max(1);
        let marker = if width == 1 {
            "^".to_string()
        } else {
            "~".repeat(width)
        };
        out.push_str(&format!("{:gutter$} |\n", ""));
        out.push_str(&format!("{} | {}\n", span.line, text));
        out.push_str(&format!(
            "{:gutter$} | {:pad$}{}\n",
            "",
            "",
            marker,
            pad = span.column.saturating_sub(1)
        ));
    }

    if let Some(help) = &diag.help {
        out.push_str(&format!("help: {help}\n"));
    }
    out
}
