/// Default bound on the depth of a provisional tree.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while building trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum depth of the provisional tree. Parenthesis nesting, prefix
    /// operators and the operator chain all count towards it. Deeper input is
    /// rejected with [`ParseError::TooDeep`](crate::ParseError::TooDeep)
    /// before any recursion could exhaust the stack.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration with the given depth bound.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}
