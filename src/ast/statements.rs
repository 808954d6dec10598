use crate::{lexer::tokens::Token, Position, IMPL_NODE};

use super::{
    ast::{Node, NodeId},
    expressions::{Expr, ExprList},
    types::TypeName,
};

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub type_name: TypeName,
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub type_name: TypeName,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub return_type: TypeName,
    pub name: Token,
    pub params: Vec<Param>,
    pub body: CompoundStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStatement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub statements: Vec<Stmt>,
}

impl CompoundStatement {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub condition: Expr,
    pub then_branch: CompoundStatement,
    pub else_branch: Option<CompoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub init: Option<Expr>,
    pub condition: Expr,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub arguments: ExprList,
}

/// An expression evaluated for its effect. `;` alone is an empty statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDeclaration(VarDeclaration),
    If(IfStatement),
    For(ForStatement),
    Return(ReturnStatement),
    Print(PrintStatement),
    Expression(ExpressionStatement),
    Compound(CompoundStatement),
}

impl Stmt {
    fn node(&self) -> &dyn Node {
        match self {
            Stmt::VarDeclaration(stmt) => stmt,
            Stmt::If(stmt) => stmt,
            Stmt::For(stmt) => stmt,
            Stmt::Return(stmt) => stmt,
            Stmt::Print(stmt) => stmt,
            Stmt::Expression(stmt) => stmt,
            Stmt::Compound(stmt) => stmt,
        }
    }

    fn node_mut(&mut self) -> &mut dyn Node {
        match self {
            Stmt::VarDeclaration(stmt) => stmt,
            Stmt::If(stmt) => stmt,
            Stmt::For(stmt) => stmt,
            Stmt::Return(stmt) => stmt,
            Stmt::Print(stmt) => stmt,
            Stmt::Expression(stmt) => stmt,
            Stmt::Compound(stmt) => stmt,
        }
    }
}

impl Node for Stmt {
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

IMPL_NODE!(
    VarDeclaration,
    Param,
    FunctionDeclaration,
    CompoundStatement,
    IfStatement,
    ForStatement,
    ReturnStatement,
    PrintStatement,
    ExpressionStatement,
);
