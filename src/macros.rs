//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed tokens
//! - `IMPL_NODE!` - Implements the `Node` trait for an AST node struct
//!
//! These macros reduce boilerplate in the lexer and AST definitions.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$line` - 1-based line of the first character
/// * `$column` - 1-based column of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntegerLiteral, "42".to_string(), 1, 9);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $column:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            column: $column,
        }
    };
}

/// Creates a default lexer handler for operators and delimiters.
///
/// Generates a handler function that pushes a token with the given kind
/// and advances the lexer past the token's text.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| -> Result<(), Error> {
            let (line, column) = lexer.location();
            lexer.push(MK_TOKEN!($kind, String::from($value), line, column));
            lexer.advance_n($value.len());
            Ok(())
        }
    };
}

/// Implements `Node` for a struct carrying `id`, `parent` and `position` fields.
#[macro_export]
macro_rules! IMPL_NODE {
    ($($node:ty),+ $(,)?) => {
        $(
            impl $crate::ast::ast::Node for $node {
                fn get_id(&self) -> $crate::ast::ast::NodeId {
                    self.id
                }
                fn get_parent(&self) -> Option<$crate::ast::ast::NodeId> {
                    self.parent
                }
                fn set_parent(&mut self, parent: $crate::ast::ast::NodeId) {
                    self.parent = Some(parent);
                }
                fn get_position(&self) -> $crate::Position {
                    self.position
                }
            }
        )+
    };
}
