//! Traversal over the AST.
//!
//! `Visitor` has one method per node kind. Every method defaults to the
//! matching `walk_*` function, which visits the node's present children in
//! source order. Absent optional children are never visited. Implementors
//! override the methods they care about and call `walk_*` themselves when
//! they still want the children.

use crate::lexer::tokens::Token;

use super::{
    ast::{Declaration, Program},
    expressions::{BinaryKind, Expr, ExprKind, ExprList},
    statements::{
        CompoundStatement, ExpressionStatement, ForStatement, FunctionDeclaration, IfStatement,
        Param, PrintStatement, ReturnStatement, Stmt, VarDeclaration,
    },
};

pub trait Visitor: Sized {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_var_declaration(&mut self, declaration: &VarDeclaration) {
        walk_var_declaration(self, declaration);
    }

    fn visit_function_declaration(&mut self, declaration: &FunctionDeclaration) {
        walk_function_declaration(self, declaration);
    }

    fn visit_param(&mut self, _param: &Param) {}

    fn visit_compound(&mut self, compound: &CompoundStatement) {
        walk_compound(self, compound);
    }

    fn visit_if(&mut self, statement: &IfStatement) {
        walk_if(self, statement);
    }

    fn visit_for(&mut self, statement: &ForStatement) {
        walk_for(self, statement);
    }

    fn visit_return(&mut self, statement: &ReturnStatement) {
        walk_return(self, statement);
    }

    fn visit_print(&mut self, statement: &PrintStatement) {
        walk_print(self, statement);
    }

    fn visit_expression_statement(&mut self, statement: &ExpressionStatement) {
        walk_expression_statement(self, statement);
    }

    fn visit_expr_list(&mut self, list: &ExprList) {
        walk_expr_list(self, list);
    }

    fn visit_assignment(&mut self, _expr: &Expr, target: &Expr, _operator: &Token, value: &Expr) {
        self.visit_expr(target);
        self.visit_expr(value);
    }

    fn visit_binary(
        &mut self,
        _expr: &Expr,
        _kind: BinaryKind,
        left: &Expr,
        _operator: &Token,
        right: &Expr,
    ) {
        self.visit_expr(left);
        self.visit_expr(right);
    }

    fn visit_unary(&mut self, _expr: &Expr, _operator: &Token, operand: &Expr) {
        self.visit_expr(operand);
    }

    fn visit_literal(&mut self, _expr: &Expr, _token: &Token) {}

    fn visit_identifier(&mut self, _expr: &Expr, _token: &Token) {}

    fn visit_call(&mut self, _expr: &Expr, callee: &Expr, arguments: Option<&ExprList>) {
        self.visit_expr(callee);
        if let Some(arguments) = arguments {
            self.visit_expr_list(arguments);
        }
    }

    fn visit_indexing(&mut self, _expr: &Expr, base: &Expr, index: &Expr) {
        self.visit_expr(base);
        self.visit_expr(index);
    }

    /// Dispatches to the method of the expression's kind.
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    /// Dispatches to the method of the statement's kind.
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }
}

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    for declaration in program.declarations.iter() {
        match declaration {
            Declaration::Variable(declaration) => visitor.visit_var_declaration(declaration),
            Declaration::Function(declaration) => visitor.visit_function_declaration(declaration),
        }
    }
}

pub fn walk_var_declaration<V: Visitor>(visitor: &mut V, declaration: &VarDeclaration) {
    if let Some(initializer) = &declaration.initializer {
        visitor.visit_expr(initializer);
    }
}

pub fn walk_function_declaration<V: Visitor>(visitor: &mut V, declaration: &FunctionDeclaration) {
    for param in declaration.params.iter() {
        visitor.visit_param(param);
    }
    visitor.visit_compound(&declaration.body);
}

pub fn walk_compound<V: Visitor>(visitor: &mut V, compound: &CompoundStatement) {
    for statement in compound.iter() {
        visitor.visit_stmt(statement);
    }
}

pub fn walk_if<V: Visitor>(visitor: &mut V, statement: &IfStatement) {
    visitor.visit_expr(&statement.condition);
    visitor.visit_compound(&statement.then_branch);
    if let Some(else_branch) = &statement.else_branch {
        visitor.visit_compound(else_branch);
    }
}

pub fn walk_for<V: Visitor>(visitor: &mut V, statement: &ForStatement) {
    if let Some(init) = &statement.init {
        visitor.visit_expr(init);
    }
    visitor.visit_expr(&statement.condition);
    if let Some(increment) = &statement.increment {
        visitor.visit_expr(increment);
    }
    visitor.visit_stmt(&statement.body);
}

pub fn walk_return<V: Visitor>(visitor: &mut V, statement: &ReturnStatement) {
    if let Some(expression) = &statement.expression {
        visitor.visit_expr(expression);
    }
}

pub fn walk_print<V: Visitor>(visitor: &mut V, statement: &PrintStatement) {
    visitor.visit_expr_list(&statement.arguments);
}

pub fn walk_expression_statement<V: Visitor>(visitor: &mut V, statement: &ExpressionStatement) {
    if let Some(expression) = &statement.expression {
        visitor.visit_expr(expression);
    }
}

pub fn walk_expr_list<V: Visitor>(visitor: &mut V, list: &ExprList) {
    for expression in list.iter() {
        visitor.visit_expr(expression);
    }
}

pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::VarDeclaration(declaration) => visitor.visit_var_declaration(declaration),
        Stmt::If(statement) => visitor.visit_if(statement),
        Stmt::For(statement) => visitor.visit_for(statement),
        Stmt::Return(statement) => visitor.visit_return(statement),
        Stmt::Print(statement) => visitor.visit_print(statement),
        Stmt::Expression(statement) => visitor.visit_expression_statement(statement),
        Stmt::Compound(compound) => visitor.visit_compound(compound),
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Assignment {
            target,
            operator,
            value,
        } => visitor.visit_assignment(expr, target, operator, value),
        ExprKind::Binary {
            kind,
            left,
            operator,
            right,
        } => visitor.visit_binary(expr, *kind, left, operator, right),
        ExprKind::Unary { operator, operand } => visitor.visit_unary(expr, operator, operand),
        ExprKind::Literal(token) => visitor.visit_literal(expr, token),
        ExprKind::Identifier(token) => visitor.visit_identifier(expr, token),
        ExprKind::Call { callee, arguments } => {
            visitor.visit_call(expr, callee, arguments.as_ref())
        }
        ExprKind::Indexing { base, index } => visitor.visit_indexing(expr, base, index),
    }
}
