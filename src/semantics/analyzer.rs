use std::collections::HashMap;

use crate::{
    ast::{
        ast::{NodeId, Program},
        expressions::{BinaryKind, Expr, ExprList},
        statements::{
            CompoundStatement, ForStatement, FunctionDeclaration, IfStatement, ReturnStatement,
            VarDeclaration,
        },
        types::TypeName,
        visit::{self, Visitor},
    },
    diagnostics::Logger,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::symbol_table::{
    OffsetAllocator, Scope, ScopeId, Symbol, SymbolId, SymbolKind, SymbolTable,
};

pub const IF_BLOCK: &str = "IF_BLOCK";
pub const ELSE_BLOCK: &str = "ELSE_BLOCK";
pub const FOR_BLOCK: &str = "FOR_BLOCK";
pub const COMPOUND_STATEMENT: &str = "COMPOUND_STATEMENT";

/// Walks a parsed program resolving names and checking types.
///
/// Errors never stop the walk: each one is logged, collected and sets the
/// sticky `has_error` flag.
pub struct Analyzer<'a> {
    table: SymbolTable,
    current: ScopeId,
    types: HashMap<NodeId, SymbolId>,
    offsets: OffsetAllocator,
    errors: Vec<Error>,
    has_error: bool,
    logger: &'a Logger,
}

/// The outcome of analyzing one program.
#[derive(Debug)]
pub struct Analysis {
    table: SymbolTable,
    types: HashMap<NodeId, SymbolId>,
    errors: Vec<Error>,
    has_error: bool,
}

impl Analysis {
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// The type symbol resolved for a node, if analysis could resolve one.
    pub fn type_of(&self, node: NodeId) -> Option<SymbolId> {
        self.types.get(&node).copied()
    }

    /// Name of the builtin type resolved for a node.
    pub fn type_name_of(&self, node: NodeId) -> Option<&str> {
        self.type_of(node).map(|id| self.table.type_name(id))
    }

    pub fn scopes(&self) -> &[Scope] {
        self.table.scopes()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.table.symbol(id)
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Every scope with its level and symbols, one line each.
    pub fn dump_scopes(&self) -> String {
        let mut out = String::new();

        for scope in self.table.scopes() {
            out.push_str(&format!("Scope {} (level {})\n", scope.name, scope.level));

            let mut symbols: Vec<(&String, &SymbolId)> = scope.symbols().collect();
            symbols.sort_by(|a, b| a.0.cmp(b.0));

            for (name, id) in symbols {
                let symbol = self.table.symbol(*id);
                let type_name = symbol
                    .declared_type
                    .map_or("-", |declared| self.table.type_name(declared));

                let detail = match &symbol.kind {
                    SymbolKind::Builtin => String::from("builtin"),
                    SymbolKind::Variable { offset } => {
                        format!("variable {} offset {}", type_name, offset)
                    }
                    SymbolKind::Function { parameters } => {
                        format!("function {} params {}", type_name, parameters.len())
                    }
                };
                out.push_str(&format!("  {}: {}\n", name, detail));
            }
        }

        out
    }

    /// Logs every scope at info level.
    pub fn render(&self, logger: &Logger) {
        for line in self.dump_scopes().lines() {
            logger.info(line);
        }
    }
}

impl<'a> Analyzer<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        let table = SymbolTable::new();
        let current = table.global();

        Analyzer {
            table,
            current,
            types: HashMap::new(),
            offsets: OffsetAllocator::new(),
            errors: vec![],
            has_error: false,
            logger,
        }
    }

    pub fn finish(self) -> Analysis {
        Analysis {
            table: self.table,
            types: self.types,
            errors: self.errors,
            has_error: self.has_error,
        }
    }

    fn error(&mut self, error_impl: ErrorImpl, position: Position) {
        let error = Error::new(error_impl, position);
        self.logger.error(error.to_string());
        self.errors.push(error);
        self.has_error = true;
    }

    fn with_scope(
        &mut self,
        name: &str,
        return_type: Option<SymbolId>,
        f: impl FnOnce(&mut Self),
    ) {
        let parent = self.current;
        self.current = self.table.create_scope(name, parent, return_type);
        f(self);
        self.current = parent;
    }

    fn type_name(&self, id: SymbolId) -> String {
        self.table.type_name(id).to_string()
    }

    fn builtin(&self, name: &str) -> Option<SymbolId> {
        self.table.lookup_local(self.table.global(), name)
    }

    fn set_type(&mut self, node: NodeId, type_: Option<SymbolId>) {
        if let Some(type_) = type_ {
            self.types.insert(node, type_);
        }
    }

    /// Looks up a type annotation. Only builtin symbols name types.
    fn resolve_type_name(&mut self, type_name: &TypeName) -> Option<SymbolId> {
        let found = self
            .table
            .lookup(self.current, type_name.name())
            .filter(|id| self.table.symbol(*id).kind == SymbolKind::Builtin);

        if found.is_none() {
            self.error(
                ErrorImpl::UndefinedType {
                    type_: type_name.to_string(),
                },
                type_name.token.position(),
            );
        }
        found
    }

    fn is_void(&self, id: SymbolId) -> bool {
        self.table.type_name(id) == "void"
    }

    /// Declares a variable or parameter in the current scope.
    fn declare_variable(
        &mut self,
        node: NodeId,
        type_name: &TypeName,
        name: &Token,
    ) -> Option<SymbolId> {
        let declared_type = self.resolve_type_name(type_name)?;
        self.types.insert(node, declared_type);

        if self.is_void(declared_type) {
            self.error(
                ErrorImpl::VoidVariable {
                    name: name.value.clone(),
                },
                name.position(),
            );
        }

        if self.table.lookup_local(self.current, &name.value).is_some() {
            self.error(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.value.clone(),
                },
                name.position(),
            );
            return None;
        }

        let symbol = Symbol {
            name: name.value.clone(),
            declared_type: Some(declared_type),
            kind: SymbolKind::Variable {
                offset: self.offsets.allocate(),
            },
            position: name.position(),
        };
        self.table.define(self.current, symbol).ok()
    }

    fn check_compatible(
        &mut self,
        expected: Option<SymbolId>,
        received: Option<SymbolId>,
        position: Position,
    ) {
        if let (Some(expected), Some(received)) = (expected, received) {
            if !self.table.is_compatible(expected, received) {
                self.error(
                    ErrorImpl::TypeMatchError {
                        expected: self.type_name(expected),
                        received: self.type_name(received),
                    },
                    position,
                );
            }
        }
    }

    fn literal_type(&self, token: &Token) -> Option<SymbolId> {
        let name = match token.kind {
            TokenKind::IntegerLiteral => "integer",
            TokenKind::CharLiteral => "char",
            TokenKind::StringLiteral => "string",
            TokenKind::True | TokenKind::False => "boolean",
            _ => return None,
        };
        self.builtin(name)
    }

    fn check_arguments(
        &mut self,
        call: &Expr,
        parameters: &[SymbolId],
        arguments: Option<&ExprList>,
    ) {
        let arguments: Vec<&Expr> = arguments.map_or(vec![], |list| list.iter().collect());

        if arguments.len() > parameters.len() {
            self.error(
                ErrorImpl::UnexpectedArguments {
                    expected: parameters.len(),
                    received: arguments.len(),
                },
                arguments[parameters.len()].position,
            );
        } else if arguments.len() < parameters.len() {
            self.error(
                ErrorImpl::MissingArguments {
                    expected: parameters.len(),
                    received: arguments.len(),
                },
                call.position,
            );
        }

        for (argument, parameter) in arguments.iter().zip(parameters.iter()) {
            let expected = self.table.symbol(*parameter).declared_type;
            let received = self.type_of(argument.id);

            if let (Some(expected), Some(received)) = (expected, received) {
                if !self.table.is_compatible(expected, received) {
                    self.error(
                        ErrorImpl::ArgumentTypeMatchError {
                            expected: self.type_name(expected),
                            received: self.type_name(received),
                        },
                        argument.position,
                    );
                }
            }
        }
    }

    fn type_of(&self, node: NodeId) -> Option<SymbolId> {
        self.types.get(&node).copied()
    }
}

impl Visitor for Analyzer<'_> {
    fn visit_var_declaration(&mut self, declaration: &VarDeclaration) {
        visit::walk_var_declaration(self, declaration);

        self.declare_variable(declaration.id, &declaration.type_name, &declaration.name);

        if let Some(initializer) = &declaration.initializer {
            let expected = self.type_of(declaration.id);
            let received = self.type_of(initializer.id);
            self.check_compatible(expected, received, initializer.position);
        }
    }

    fn visit_function_declaration(&mut self, declaration: &FunctionDeclaration) {
        let return_type = self.resolve_type_name(&declaration.return_type);
        self.set_type(declaration.id, return_type);

        // Inserted before the body so recursive calls resolve
        let symbol = Symbol {
            name: declaration.name.value.clone(),
            declared_type: return_type,
            kind: SymbolKind::Function { parameters: vec![] },
            position: declaration.name.position(),
        };
        let function = match self.table.define(self.table.global(), symbol) {
            Ok(id) => Some(id),
            Err(_) => {
                self.error(
                    ErrorImpl::FunctionAlreadyDeclared {
                        function: declaration.name.value.clone(),
                    },
                    declaration.name.position(),
                );
                None
            }
        };

        self.with_scope(&declaration.name.value, return_type, |analyzer| {
            let mut parameters = vec![];
            for param in declaration.params.iter() {
                if let Some(id) = analyzer.declare_variable(param.id, &param.type_name, &param.name)
                {
                    parameters.push(id);
                }
            }

            if let Some(function) = function {
                analyzer.table.symbol_mut(function).kind = SymbolKind::Function { parameters };
            }

            analyzer.visit_compound(&declaration.body);
        });
    }

    fn visit_compound(&mut self, compound: &CompoundStatement) {
        self.with_scope(COMPOUND_STATEMENT, None, |analyzer| {
            visit::walk_compound(analyzer, compound);
        });
    }

    fn visit_if(&mut self, statement: &IfStatement) {
        self.visit_expr(&statement.condition);

        self.with_scope(IF_BLOCK, None, |analyzer| {
            analyzer.visit_compound(&statement.then_branch);
        });

        if let Some(else_branch) = &statement.else_branch {
            self.with_scope(ELSE_BLOCK, None, |analyzer| {
                analyzer.visit_compound(else_branch);
            });
        }
    }

    fn visit_for(&mut self, statement: &ForStatement) {
        self.with_scope(FOR_BLOCK, None, |analyzer| {
            visit::walk_for(analyzer, statement);
        });
    }

    fn visit_return(&mut self, statement: &ReturnStatement) {
        visit::walk_return(self, statement);

        let Some(expression) = &statement.expression else {
            return;
        };
        let Some((scope, expected)) = self.table.enclosing_return_type(self.current) else {
            return;
        };
        let Some(received) = self.type_of(expression.id) else {
            return;
        };

        if !self.table.is_compatible(expected, received) {
            self.error(
                ErrorImpl::ReturnTypeMismatch {
                    function: self.table.scope(scope).name.clone(),
                    expected: self.type_name(expected),
                    received: self.type_name(received),
                },
                expression.position,
            );
        }
    }

    fn visit_assignment(&mut self, expr: &Expr, target: &Expr, operator: &Token, value: &Expr) {
        self.visit_expr(target);
        self.visit_expr(value);

        let expected = self.type_of(target.id);
        let received = self.type_of(value.id);
        self.check_compatible(expected, received, operator.position());
        self.set_type(expr.id, expected);
    }

    fn visit_binary(
        &mut self,
        expr: &Expr,
        _kind: BinaryKind,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) {
        self.visit_expr(left);
        self.visit_expr(right);

        let (Some(left), Some(right)) = (self.type_of(left.id), self.type_of(right.id)) else {
            return;
        };

        if self.table.is_compatible(left, right) {
            let shared = self.table.resolve(left);
            self.set_type(expr.id, Some(shared));
        } else {
            self.error(
                ErrorImpl::OperandTypeMismatch {
                    operator: operator.value.clone(),
                    left: self.type_name(left),
                    right: self.type_name(right),
                },
                operator.position(),
            );
        }
    }

    fn visit_unary(&mut self, expr: &Expr, _operator: &Token, operand: &Expr) {
        self.visit_expr(operand);
        let type_ = self.type_of(operand.id);
        self.set_type(expr.id, type_);
    }

    fn visit_literal(&mut self, expr: &Expr, token: &Token) {
        let type_ = self.literal_type(token);
        self.set_type(expr.id, type_);
    }

    fn visit_identifier(&mut self, expr: &Expr, token: &Token) {
        match self.table.lookup(self.current, &token.value) {
            Some(symbol) => {
                let type_ = self.table.symbol(symbol).declared_type;
                self.set_type(expr.id, type_);
            }
            None => self.error(
                ErrorImpl::VariableNotDeclared {
                    variable: token.value.clone(),
                },
                token.position(),
            ),
        }
    }

    fn visit_call(&mut self, expr: &Expr, callee: &Expr, arguments: Option<&ExprList>) {
        if let Some(arguments) = arguments {
            self.visit_expr_list(arguments);
        }

        let Some(name) = callee.as_identifier() else {
            self.visit_expr(callee);
            return;
        };

        let Some(symbol) = self.table.lookup(self.current, &name.value) else {
            self.error(
                ErrorImpl::VariableNotDeclared {
                    variable: name.value.clone(),
                },
                name.position(),
            );
            return;
        };

        let symbol = self.table.symbol(symbol).clone();
        let SymbolKind::Function { parameters } = &symbol.kind else {
            self.error(
                ErrorImpl::NotAFunction {
                    name: name.value.clone(),
                },
                name.position(),
            );
            return;
        };

        self.set_type(callee.id, symbol.declared_type);
        self.set_type(expr.id, symbol.declared_type);
        self.check_arguments(expr, parameters, arguments);
    }

    fn visit_indexing(&mut self, expr: &Expr, base: &Expr, index: &Expr) {
        self.visit_expr(base);
        self.visit_expr(index);

        let integer = self.builtin("integer");
        let index_type = self.type_of(index.id);
        self.check_compatible(integer, index_type, index.position);

        let base_type = self.type_of(base.id);
        self.set_type(expr.id, base_type);
    }
}

/// Analyzes `program`, reporting every semantic error through `logger`.
pub fn analyze(program: &Program, logger: &Logger) -> Analysis {
    let mut analyzer = Analyzer::new(logger);
    analyzer.visit_program(program);
    analyzer.finish()
}
