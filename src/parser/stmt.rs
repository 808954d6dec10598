use crate::{
    ast::{
        ast::Declaration,
        expressions::Expr,
        statements::{
            CompoundStatement, ExpressionStatement, ForStatement, FunctionDeclaration,
            IfStatement, Param, PrintStatement, ReturnStatement, Stmt, VarDeclaration,
        },
        types::TypeName,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_expr, parse_expr_list},
    lookups::{IF_FOLLOW, STMT_ALTERNATIVES},
    parser::Parser,
    types::parse_type,
};

/// `declaration = type IDENT ( function | var_decl )`
pub fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    parser.log_rule("declaration");

    let Some(type_name) = parse_type(parser)? else {
        return Err(Error::new(
            ErrorImpl::ExpectedDeclaration {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let name = parser.expect_error(
        TokenKind::Identifier,
        "expected identifier after type in declaration",
    )?;

    match parser.current_token_kind() {
        TokenKind::OpenParen => Ok(Declaration::Function(parse_function(
            parser, type_name, name,
        )?)),
        TokenKind::Assignment | TokenKind::Semicolon => Ok(Declaration::Variable(
            parse_var_decl(parser, type_name, name)?,
        )),
        _ => Err(parser.unexpected_detailed("expected `(`, `=` or `;` after declared name")),
    }
}

/// `function = "(" [ params ] ")" compound`
fn parse_function(
    parser: &mut Parser,
    return_type: TypeName,
    name: Token,
) -> Result<FunctionDeclaration, Error> {
    parser.log_rule("function");
    let id = parser.advance_id();
    let position = return_type.token.position();

    parser.expect(TokenKind::OpenParen)?;
    let params = if parser.check(TokenKind::CloseParen) {
        vec![]
    } else {
        parse_params(parser)?
    };
    parser.expect_error(TokenKind::CloseParen, "expected `)` after parameters")?;

    let Some(body) = parse_compound(parser)? else {
        return Err(parser.unexpected_detailed("expected `{` to open function body"));
    };

    Ok(FunctionDeclaration {
        id,
        parent: None,
        position,
        return_type,
        name,
        params,
        body,
    })
}

/// `params = type IDENT { "," type IDENT }`
fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    parser.log_rule("params");
    let mut params = vec![];

    loop {
        let Some(type_name) = parse_type(parser)? else {
            return Err(parser.unexpected_detailed("expected parameter type"));
        };
        let name = parser.expect_error(TokenKind::Identifier, "expected parameter name")?;

        params.push(Param {
            id: parser.advance_id(),
            parent: None,
            position: type_name.token.position(),
            type_name,
            name,
        });

        if !parser.match_kind(TokenKind::Comma) {
            break;
        }
    }

    Ok(params)
}

/// `var_decl = [ "=" expression ] ";"`
fn parse_var_decl(
    parser: &mut Parser,
    type_name: TypeName,
    name: Token,
) -> Result<VarDeclaration, Error> {
    parser.log_rule("var_decl");
    let id = parser.advance_id();
    let position = type_name.token.position();

    let initializer = if parser.match_kind(TokenKind::Assignment) {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.expect_error(TokenKind::Semicolon, "expected `;` after variable declaration")?;

    Ok(VarDeclaration {
        id,
        parent: None,
        position,
        type_name,
        name,
        initializer,
    })
}

/// `statement = type IDENT var_decl | if | for | return | print | compound | expr_stmt`
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.nested(|parser| {
        parser.log_rule("statement");

        for alternative in STMT_ALTERNATIVES {
            if let Some(stmt) = alternative(parser)? {
                return Ok(stmt);
            }
        }

        parse_expression_stmt(parser)
    })
}

pub fn parse_local_var_decl_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    let Some(type_name) = parse_type(parser)? else {
        return Ok(None);
    };
    let name = parser.expect_error(
        TokenKind::Identifier,
        "expected identifier after type in declaration",
    )?;

    Ok(Some(Stmt::VarDeclaration(parse_var_decl(
        parser, type_name, name,
    )?)))
}

/// `compound = "{" { statement } "}"`
pub fn parse_compound(parser: &mut Parser) -> Result<Option<CompoundStatement>, Error> {
    if !parser.check(TokenKind::OpenCurly) {
        return Ok(None);
    }
    parser.log_rule("compound");

    let id = parser.advance_id();
    let position = parser.advance().position();

    let mut statements = vec![];
    while !parser.check(TokenKind::CloseCurly) {
        if parser.at_end() {
            return Err(parser.unexpected_detailed("expected `}` to close block"));
        }
        statements.push(parse_stmt(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Some(CompoundStatement {
        id,
        parent: None,
        position,
        statements,
    }))
}

pub fn parse_compound_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    Ok(parse_compound(parser)?.map(Stmt::Compound))
}

fn expect_compound(parser: &mut Parser, message: &str) -> Result<CompoundStatement, Error> {
    match parse_compound(parser)? {
        Some(compound) => Ok(compound),
        None => Err(parser.unexpected_detailed(message)),
    }
}

/// `if = "if" "(" expression ")" compound [ "else" compound ]`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::If) {
        return Ok(None);
    }
    parser.log_rule("if_stmt");

    let id = parser.advance_id();
    let position = parser.advance().position();

    parser.expect_error(TokenKind::OpenParen, "expected `(` after `if`")?;
    let condition = parse_expr(parser)?;
    parser.expect_error(TokenKind::CloseParen, "expected `)` after condition")?;

    let then_branch = expect_compound(parser, "expected `{` to open `if` body")?;

    let else_branch = if parser.match_kind(TokenKind::Else) {
        Some(expect_compound(parser, "expected `{` to open `else` body")?)
    } else if IF_FOLLOW.contains(&parser.current_token_kind()) {
        None
    } else {
        return Err(parser.unexpected());
    };

    Ok(Some(Stmt::If(IfStatement {
        id,
        parent: None,
        position,
        condition,
        then_branch,
        else_branch,
    })))
}

/// `for = "for" "(" [ expression ] ";" expression ";" [ expression ] ")" statement`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::For) {
        return Ok(None);
    }
    parser.log_rule("for_stmt");

    let id = parser.advance_id();
    let position = parser.advance().position();

    parser.expect_error(TokenKind::OpenParen, "expected `(` after `for`")?;
    let init = parse_optional_expr(parser, TokenKind::Semicolon)?;
    parser.expect_error(TokenKind::Semicolon, "expected `;` after loop initializer")?;
    let condition = parse_expr(parser)?;
    parser.expect_error(TokenKind::Semicolon, "expected `;` after loop condition")?;
    let increment = parse_optional_expr(parser, TokenKind::CloseParen)?;
    parser.expect_error(TokenKind::CloseParen, "expected `)` after loop header")?;

    let body = parse_stmt(parser)?;

    Ok(Some(Stmt::For(ForStatement {
        id,
        parent: None,
        position,
        init,
        condition,
        increment,
        body: Box::new(body),
    })))
}

/// `return = "return" [ expression ] ";"`
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Return) {
        return Ok(None);
    }
    parser.log_rule("return_stmt");

    let id = parser.advance_id();
    let position = parser.advance().position();

    let expression = parse_optional_expr(parser, TokenKind::Semicolon)?;
    parser.expect_error(TokenKind::Semicolon, "expected `;` after return")?;

    Ok(Some(Stmt::Return(ReturnStatement {
        id,
        parent: None,
        position,
        expression,
    })))
}

/// `print = "print" "(" expr_list ")" ";"`
pub fn parse_print_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    if !parser.check(TokenKind::Print) {
        return Ok(None);
    }
    parser.log_rule("print_stmt");

    let id = parser.advance_id();
    let position = parser.advance().position();

    parser.expect_error(TokenKind::OpenParen, "expected `(` after `print`")?;
    let arguments = parse_expr_list(parser)?;
    parser.expect_error(TokenKind::CloseParen, "expected `)` after print arguments")?;
    parser.expect_error(TokenKind::Semicolon, "expected `;` after print")?;

    Ok(Some(Stmt::Print(PrintStatement {
        id,
        parent: None,
        position,
        arguments,
    })))
}

/// `expr_stmt = [ expression ] ";"`
fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.log_rule("expr_stmt");

    let id = parser.advance_id();
    let position = parser.get_position();

    let expression = parse_optional_expr(parser, TokenKind::Semicolon)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStatement {
        id,
        parent: None,
        position,
        expression,
    }))
}

/// An expression that is absent when `terminator` comes next.
fn parse_optional_expr(parser: &mut Parser, terminator: TokenKind) -> Result<Option<Expr>, Error> {
    if parser.check(terminator) {
        Ok(None)
    } else {
        Ok(Some(parse_expr(parser)?))
    }
}
