use std::io;

use cinfix_eval::ExprError;
use thiserror::Error;

/// A preprocessing failure, located by file name and 1-based line.
#[derive(Debug, Error)]
#[error("{file}:{line}: {kind}")]
pub struct PreprocessError {
    pub file: String,
    pub line: usize,
    pub kind: PreprocessErrorKind,
}

/// What went wrong while preprocessing.
#[derive(Debug, Error)]
pub enum PreprocessErrorKind {
    /// `#else`, `#elif` or `#endif` with no open conditional
    #[error("stray #{0}")]
    StrayDirective(&'static str),

    /// `#else` or `#elif` after the block's `#else`
    #[error("#{0} after #else")]
    AfterElse(&'static str),

    /// End of file inside a conditional block
    #[error("unterminated conditional directive opened on line {opened_at}")]
    UnterminatedConditional { opened_at: usize },

    #[error("too many levels of nested conditional directives (limit {0})")]
    TooManyConditionals(usize),

    #[error("unknown directive '{0}'")]
    UnknownDirective(String),

    /// A directive or `defined` that needs an identifier did not get one
    #[error("no macro name given after {0}")]
    MissingMacroName(&'static str),

    /// `defined` not followed by `NAME` or `(NAME)`
    #[error("'defined' must be followed by a macro name, optionally in parentheses")]
    BadDefined,

    /// `#define NAME(` declares parameters, which are not supported
    #[error("function-like macro '{0}' is not supported")]
    FunctionLikeMacro(String),

    /// A `/*` comment still open at end of file
    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("length of macro '{name}' contents is too long; must be <= {limit} characters")]
    MacroTooLong { name: String, limit: usize },

    #[error("couldn't interpret #include path '{0}'")]
    BadInclude(String),

    #[error("unable to open file '{path}': {source}")]
    IncludeFailed { path: String, source: io::Error },

    #[error("#include nested too deeply (limit {0})")]
    IncludeTooDeep(usize),

    /// `#if` or `#elif` whose expression does not parse or evaluate
    #[error("invalid conditional expression: {0}")]
    Expression(#[from] ExprError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = PreprocessError {
            file: "main.c".to_string(),
            line: 7,
            kind: PreprocessErrorKind::StrayDirective("endif"),
        };
        assert_eq!(err.to_string(), "main.c:7: stray #endif");

        let kind = PreprocessErrorKind::MacroTooLong {
            name: "BIG".to_string(),
            limit: 512,
        };
        assert_eq!(
            kind.to_string(),
            "length of macro 'BIG' contents is too long; must be <= 512 characters"
        );
    }
}
