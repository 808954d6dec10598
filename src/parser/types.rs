//! Type annotation parsing.
//!
//! `type = ( "integer" | "boolean" | "char" | "string" | "void" ) { "[" "]" }`
//!
//! A type is only ever optional from the caller's point of view: the
//! function returns `Ok(None)` when the lookahead is not a type keyword so
//! declaration and statement parsing can try their other alternatives.

use crate::{ast::types::TypeName, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<Option<TypeName>, Error> {
    if !parser.current_token().is_type_keyword() {
        return Ok(None);
    }
    parser.log_rule("type");

    let token = parser.advance();
    let mut array_depth = 0;

    while parser.match_kind(TokenKind::OpenBracket) {
        parser.expect_error(TokenKind::CloseBracket, "expected `]` in array type")?;
        array_depth += 1;
    }

    Ok(Some(TypeName { token, array_depth }))
}
