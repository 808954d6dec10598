use crate::{
    ast::expressions::{BinaryKind, Expr, ExprKind, ExprList},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{
        ADDITIVE_OPERATORS, EQUALITY_OPERATORS, EXPR_FOLLOW, LOGICAL_AND_OPERATORS,
        LOGICAL_OR_OPERATORS, MULTIPLICATIVE_OPERATORS, RELATIONAL_OPERATORS, UNARY_OPERATORS,
    },
    parser::Parser,
};

type LevelParser = fn(&mut Parser) -> Result<Expr, Error>;

/// `expression = logical_or [ "=" expression ]`
///
/// Assignment is right associative, so the value side recurses into
/// `parse_expr` itself. Once the expression is complete the lookahead must be
/// one of the tokens that can follow an expression.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.nested(|parser| {
        parser.log_rule("expression");

        let target = parse_logical_or(parser)?;

        if !parser.check(TokenKind::Assignment) {
            if !EXPR_FOLLOW.contains(&parser.current_token_kind()) {
                return Err(parser.unexpected());
            }
            return Ok(target);
        }

        let operator = parser.advance();
        if !target.is_assignable() {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget {
                    token: operator.value.clone(),
                },
                operator.position(),
            ));
        }

        let value = parse_expr(parser)?;
        let position = target.position;

        Ok(Expr::new(
            parser.advance_id(),
            position,
            ExprKind::Assignment {
                target: Box::new(target),
                operator,
                value: Box::new(value),
            },
        ))
    })
}

/// Folds `next { operator next }` into a left associative chain.
///
/// Each fold puts the chain one node deeper, so each one takes a nesting
/// level.
fn parse_binary_level(
    parser: &mut Parser,
    rule: &str,
    operators: &[TokenKind],
    kind: BinaryKind,
    next: LevelParser,
) -> Result<Expr, Error> {
    parser.log_rule(rule);

    parser.folded(|parser| {
        let mut left = next(parser)?;

        while parser.check_any(operators) {
            parser.deepen()?;
            let operator = parser.advance();
            let right = next(parser)?;
            let position = left.position;

            left = Expr::new(
                parser.advance_id(),
                position,
                ExprKind::Binary {
                    kind,
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                },
            );
        }

        Ok(left)
    })
}

pub fn parse_logical_or(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(
        parser,
        "logical_or",
        LOGICAL_OR_OPERATORS,
        BinaryKind::LogicalOr,
        parse_logical_and,
    )
}

pub fn parse_logical_and(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(
        parser,
        "logical_and",
        LOGICAL_AND_OPERATORS,
        BinaryKind::LogicalAnd,
        parse_equality,
    )
}

pub fn parse_equality(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(
        parser,
        "equality",
        EQUALITY_OPERATORS,
        BinaryKind::Equality,
        parse_relational,
    )
}

pub fn parse_relational(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(
        parser,
        "relational",
        RELATIONAL_OPERATORS,
        BinaryKind::Relational,
        parse_additive,
    )
}

pub fn parse_additive(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(
        parser,
        "additive",
        ADDITIVE_OPERATORS,
        BinaryKind::Arithmetic,
        parse_multiplicative,
    )
}

pub fn parse_multiplicative(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_level(
        parser,
        "multiplicative",
        MULTIPLICATIVE_OPERATORS,
        BinaryKind::Arithmetic,
        parse_unary,
    )
}

/// `unary = ( "!" | "-" ) unary | factor`
pub fn parse_unary(parser: &mut Parser) -> Result<Expr, Error> {
    if !parser.check_any(UNARY_OPERATORS) {
        return parse_factor(parser);
    }
    parser.log_rule("unary");

    let operator = parser.advance();
    let operand = parser.nested(parse_unary)?;

    Ok(Expr::new(
        parser.advance_id(),
        operator.position(),
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
    ))
}

/// `factor = ( literal | IDENT [ "(" [ expr_list ] ")" ] | "(" expression ")" ) { "[" expression "]" }`
pub fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    parser.log_rule("factor");

    let mut expr = match parser.current_token_kind() {
        kind if kind.is_literal() => {
            let token = parser.advance();
            Expr::new(parser.advance_id(), token.position(), ExprKind::Literal(token))
        }
        TokenKind::Identifier => parse_identifier_or_call(parser)?,
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_expr(parser)?;
            parser.expect_error(TokenKind::CloseParen, "expected `)` to close group")?;
            inner
        }
        _ => return Err(parser.unexpected()),
    };

    parser.folded(|parser| {
        while parser.check(TokenKind::OpenBracket) {
            parser.deepen()?;
            parser.advance();
            let index = parse_expr(parser)?;
            parser.expect_error(TokenKind::CloseBracket, "expected `]` after index")?;
            let position = expr.position;

            expr = Expr::new(
                parser.advance_id(),
                position,
                ExprKind::Indexing {
                    base: Box::new(expr),
                    index: Box::new(index),
                },
            );
        }

        Ok(expr)
    })
}

fn parse_identifier_or_call(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let position = token.position();
    let identifier = Expr::new(parser.advance_id(), position, ExprKind::Identifier(token));

    if !parser.match_kind(TokenKind::OpenParen) {
        return Ok(identifier);
    }
    parser.log_rule("call");

    let arguments = if parser.check(TokenKind::CloseParen) {
        None
    } else {
        Some(parse_expr_list(parser)?)
    };
    parser.expect_error(TokenKind::CloseParen, "expected `)` after arguments")?;

    Ok(Expr::new(
        parser.advance_id(),
        position,
        ExprKind::Call {
            callee: Box::new(identifier),
            arguments,
        },
    ))
}

/// `expr_list = expression { "," expression }`
pub fn parse_expr_list(parser: &mut Parser) -> Result<ExprList, Error> {
    parser.log_rule("expr_list");

    let id = parser.advance_id();
    let position = parser.get_position();
    let mut expressions = vec![parse_expr(parser)?];

    while parser.match_kind(TokenKind::Comma) {
        expressions.push(parse_expr(parser)?);
    }

    Ok(ExprList {
        id,
        parent: None,
        position,
        expressions,
    })
}
