use std::fmt::Display;

use crate::lexer::tokens::Token;

/// A type annotation: a builtin type keyword followed by zero or more `[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub token: Token,
    pub array_depth: usize,
}

impl TypeName {
    /// Name of the element type, which is what scopes resolve.
    pub fn name(&self) -> &str {
        &self.token.value
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.token.value, "[]".repeat(self.array_depth))
    }
}
