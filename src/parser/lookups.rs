use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::{ast::statements::Stmt, errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, stmt::*};

/// A statement alternative. `Ok(None)` means the lookahead does not start it.
pub type StmtHandler = fn(&mut Parser) -> Result<Option<Stmt>, Error>;

/// Statement alternatives in the order they are tried. Anything none of them
/// claims is parsed as an expression statement.
pub const STMT_ALTERNATIVES: &[StmtHandler] = &[
    parse_local_var_decl_stmt,
    parse_if_stmt,
    parse_for_stmt,
    parse_return_stmt,
    parse_print_stmt,
    parse_compound_stmt,
];

// Operator sets per precedence level, lowest first.
pub const LOGICAL_OR_OPERATORS: &[TokenKind] = &[TokenKind::Or];
pub const LOGICAL_AND_OPERATORS: &[TokenKind] = &[TokenKind::And];
pub const EQUALITY_OPERATORS: &[TokenKind] = &[TokenKind::Equals, TokenKind::NotEquals];
pub const RELATIONAL_OPERATORS: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEquals,
    TokenKind::GreaterEquals,
];
pub const ADDITIVE_OPERATORS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Dash];
pub const MULTIPLICATIVE_OPERATORS: &[TokenKind] =
    &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent];
pub const UNARY_OPERATORS: &[TokenKind] = &[TokenKind::Not, TokenKind::Dash];

lazy_static! {
    /// Tokens that can open a statement.
    pub static ref STMT_FIRST: HashSet<TokenKind> = HashSet::from([
        TokenKind::Integer,
        TokenKind::Boolean,
        TokenKind::Char,
        TokenKind::String,
        TokenKind::Void,
        TokenKind::If,
        TokenKind::For,
        TokenKind::Return,
        TokenKind::Print,
        TokenKind::OpenCurly,
        TokenKind::Semicolon,
        TokenKind::Identifier,
        TokenKind::IntegerLiteral,
        TokenKind::CharLiteral,
        TokenKind::StringLiteral,
        TokenKind::True,
        TokenKind::False,
        TokenKind::OpenParen,
        TokenKind::Not,
        TokenKind::Dash,
    ]);

    /// What may follow a complete expression.
    pub static ref EXPR_FOLLOW: HashSet<TokenKind> = HashSet::from([
        TokenKind::CloseParen,
        TokenKind::CloseBracket,
        TokenKind::Comma,
        TokenKind::Semicolon,
    ]);

    /// What may follow an `if` that has no `else` arm.
    pub static ref IF_FOLLOW: HashSet<TokenKind> = {
        let mut set = STMT_FIRST.clone();
        set.insert(TokenKind::CloseCurly);
        set
    };
}
