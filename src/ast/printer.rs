use crate::lexer::tokens::{Token, TokenKind};

use super::{
    ast::Program,
    expressions::{BinaryKind, Expr, ExprList},
    statements::{
        CompoundStatement, ExpressionStatement, ForStatement, FunctionDeclaration, IfStatement,
        Param, PrintStatement, ReturnStatement, VarDeclaration,
    },
    visit::{self, Visitor},
};

/// Renders a tree as one indented line per node.
#[derive(Default)]
pub struct TreePrinter {
    depth: usize,
    output: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

fn literal_text(token: &Token) -> String {
    match token.kind {
        TokenKind::StringLiteral => format!("{:?}", token.value),
        TokenKind::CharLiteral => format!("'{}'", token.value.escape_default()),
        _ => token.value.clone(),
    }
}

impl Visitor for TreePrinter {
    fn visit_program(&mut self, program: &Program) {
        self.line("Program");
        self.nested(|p| visit::walk_program(p, program));
    }

    fn visit_var_declaration(&mut self, declaration: &VarDeclaration) {
        self.line(format!(
            "VarDeclaration: {} {}",
            declaration.type_name, declaration.name.value
        ));
        self.nested(|p| visit::walk_var_declaration(p, declaration));
    }

    fn visit_function_declaration(&mut self, declaration: &FunctionDeclaration) {
        self.line(format!(
            "FunctionDeclaration: {} {}",
            declaration.return_type, declaration.name.value
        ));
        self.nested(|p| visit::walk_function_declaration(p, declaration));
    }

    fn visit_param(&mut self, param: &Param) {
        self.line(format!("Param: {} {}", param.type_name, param.name.value));
    }

    fn visit_compound(&mut self, compound: &CompoundStatement) {
        self.line("CompoundStatement");
        self.nested(|p| visit::walk_compound(p, compound));
    }

    fn visit_if(&mut self, statement: &IfStatement) {
        self.line("IfStatement");
        self.nested(|p| visit::walk_if(p, statement));
    }

    fn visit_for(&mut self, statement: &ForStatement) {
        self.line("ForStatement");
        self.nested(|p| visit::walk_for(p, statement));
    }

    fn visit_return(&mut self, statement: &ReturnStatement) {
        self.line("ReturnStatement");
        self.nested(|p| visit::walk_return(p, statement));
    }

    fn visit_print(&mut self, statement: &PrintStatement) {
        self.line("PrintStatement");
        self.nested(|p| visit::walk_print(p, statement));
    }

    fn visit_expression_statement(&mut self, statement: &ExpressionStatement) {
        self.line("ExpressionStatement");
        self.nested(|p| visit::walk_expression_statement(p, statement));
    }

    fn visit_expr_list(&mut self, list: &ExprList) {
        self.line("ExprList");
        self.nested(|p| visit::walk_expr_list(p, list));
    }

    fn visit_assignment(&mut self, _expr: &Expr, target: &Expr, operator: &Token, value: &Expr) {
        self.line(format!("Assignment: {}", operator.value));
        self.nested(|p| {
            p.visit_expr(target);
            p.visit_expr(value);
        });
    }

    fn visit_binary(
        &mut self,
        _expr: &Expr,
        kind: BinaryKind,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) {
        self.line(format!("{}: {}", kind.label(), operator.value));
        self.nested(|p| {
            p.visit_expr(left);
            p.visit_expr(right);
        });
    }

    fn visit_unary(&mut self, _expr: &Expr, operator: &Token, operand: &Expr) {
        self.line(format!("UnaryOp: {}", operator.value));
        self.nested(|p| p.visit_expr(operand));
    }

    fn visit_literal(&mut self, _expr: &Expr, token: &Token) {
        self.line(format!("Literal: {}", literal_text(token)));
    }

    fn visit_identifier(&mut self, _expr: &Expr, token: &Token) {
        self.line(format!("Identifier: {}", token.value));
    }

    fn visit_call(&mut self, _expr: &Expr, callee: &Expr, arguments: Option<&ExprList>) {
        self.line("FunctionCall");
        self.nested(|p| {
            p.visit_expr(callee);
            if let Some(arguments) = arguments {
                p.visit_expr_list(arguments);
            }
        });
    }

    fn visit_indexing(&mut self, _expr: &Expr, base: &Expr, index: &Expr) {
        self.line("Indexing");
        self.nested(|p| {
            p.visit_expr(base);
            p.visit_expr(index);
        });
    }
}

pub fn print_tree(program: &Program) -> String {
    let mut printer = TreePrinter::new();
    printer.visit_program(program);
    printer.finish()
}
