use std::fmt::Display;

use crate::Position;

use super::{
    expressions::{Expr, ExprKind, ExprList},
    statements::{CompoundStatement, FunctionDeclaration, Param, Stmt, VarDeclaration},
};

/// Identity of a node within one parse.
///
/// Ids are handed out by the parser in construction order, so they are unique
/// per tree but carry no meaning across parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node Trait
///
/// Shared capabilities of every AST node: a stable identity, the advisory
/// identity of its parent and the position of its first token.
pub trait Node {
    fn get_id(&self) -> NodeId;
    /// Set once parsing has finished, `None` for the root.
    fn get_parent(&self) -> Option<NodeId>;
    fn set_parent(&mut self, parent: NodeId);
    fn get_position(&self) -> Position;
}

/// Root of the tree: an ordered sequence of top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Variable(VarDeclaration),
    Function(FunctionDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Variable(declaration) => &declaration.name.value,
            Declaration::Function(declaration) => &declaration.name.value,
        }
    }

    fn node_mut(&mut self) -> &mut dyn Node {
        match self {
            Declaration::Variable(declaration) => declaration,
            Declaration::Function(declaration) => declaration,
        }
    }

    fn node(&self) -> &dyn Node {
        match self {
            Declaration::Variable(declaration) => declaration,
            Declaration::Function(declaration) => declaration,
        }
    }
}

impl Node for Declaration {
    fn get_id(&self) -> NodeId {
        self.node().get_id()
    }
    fn get_parent(&self) -> Option<NodeId> {
        self.node().get_parent()
    }
    fn set_parent(&mut self, parent: NodeId) {
        self.node_mut().set_parent(parent)
    }
    fn get_position(&self) -> Position {
        self.node().get_position()
    }
}

/// Fills in the advisory `parent` field of every node below `program`.
///
/// The tree is only ever walked top-down here, parents are never followed.
pub fn link_parents(program: &mut Program) {
    let id = program.id;
    for declaration in program.declarations.iter_mut() {
        declaration.set_parent(id);
        match declaration {
            Declaration::Variable(variable) => link_var_declaration(variable),
            Declaration::Function(function) => {
                let id = function.id;
                for param in function.params.iter_mut() {
                    link_param(param, id);
                }
                function.body.set_parent(id);
                link_compound(&mut function.body);
            }
        }
    }
}

fn link_param(param: &mut Param, parent: NodeId) {
    param.set_parent(parent);
}

fn link_var_declaration(declaration: &mut VarDeclaration) {
    let id = declaration.id;
    if let Some(initializer) = declaration.initializer.as_mut() {
        link_expr(initializer, id);
    }
}

fn link_compound(compound: &mut CompoundStatement) {
    let id = compound.id;
    for statement in compound.statements.iter_mut() {
        link_stmt(statement, id);
    }
}

fn link_stmt(stmt: &mut Stmt, parent: NodeId) {
    stmt.set_parent(parent);
    let id = stmt.get_id();

    match stmt {
        Stmt::VarDeclaration(declaration) => link_var_declaration(declaration),
        Stmt::If(statement) => {
            link_expr(&mut statement.condition, id);
            statement.then_branch.set_parent(id);
            link_compound(&mut statement.then_branch);
            if let Some(else_branch) = statement.else_branch.as_mut() {
                else_branch.set_parent(id);
                link_compound(else_branch);
            }
        }
        Stmt::For(statement) => {
            if let Some(init) = statement.init.as_mut() {
                link_expr(init, id);
            }
            link_expr(&mut statement.condition, id);
            if let Some(increment) = statement.increment.as_mut() {
                link_expr(increment, id);
            }
            link_stmt(&mut statement.body, id);
        }
        Stmt::Return(statement) => {
            if let Some(expression) = statement.expression.as_mut() {
                link_expr(expression, id);
            }
        }
        Stmt::Print(statement) => link_expr_list(&mut statement.arguments, id),
        Stmt::Expression(statement) => {
            if let Some(expression) = statement.expression.as_mut() {
                link_expr(expression, id);
            }
        }
        Stmt::Compound(compound) => link_compound(compound),
    }
}

fn link_expr_list(list: &mut ExprList, parent: NodeId) {
    list.set_parent(parent);
    let id = list.id;
    for expression in list.expressions.iter_mut() {
        link_expr(expression, id);
    }
}

fn link_expr(expr: &mut Expr, parent: NodeId) {
    expr.set_parent(parent);
    let id = expr.id;

    match &mut expr.kind {
        ExprKind::Assignment { target, value, .. } => {
            link_expr(target, id);
            link_expr(value, id);
        }
        ExprKind::Binary { left, right, .. } => {
            link_expr(left, id);
            link_expr(right, id);
        }
        ExprKind::Unary { operand, .. } => link_expr(operand, id),
        ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
        ExprKind::Call { callee, arguments } => {
            link_expr(callee, id);
            if let Some(arguments) = arguments.as_mut() {
                link_expr_list(arguments, id);
            }
        }
        ExprKind::Indexing { base, index } => {
            link_expr(base, id);
            link_expr(index, id);
        }
    }
}

crate::IMPL_NODE!(Program);
