use crate::{lexer::tokens::Token, Position, IMPL_NODE};

use super::ast::NodeId;

/// Role of a binary operator node.
///
/// All roles share one shape; the role decides how the tree is labelled and
/// which operator set produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Arithmetic,
    Relational,
    Equality,
    LogicalAnd,
    LogicalOr,
}

impl BinaryKind {
    pub fn label(&self) -> &'static str {
        match self {
            BinaryKind::Arithmetic => "BinaryOp",
            BinaryKind::Relational => "Relational",
            BinaryKind::Equality => "Equality",
            BinaryKind::LogicalAnd => "LogicalAnd",
            BinaryKind::LogicalOr => "LogicalOr",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Assignment {
        target: Box<Expr>,
        operator: Token,
        value: Box<Expr>,
    },
    Binary {
        kind: BinaryKind,
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Literal(Token),
    Identifier(Token),
    /// `callee` is always an `Identifier` expression.
    Call {
        callee: Box<Expr>,
        arguments: Option<ExprList>,
    },
    Indexing {
        base: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    pub fn new(id: NodeId, position: Position, kind: ExprKind) -> Self {
        Expr {
            id,
            parent: None,
            position,
            kind,
        }
    }

    /// The token of an `Identifier` expression.
    pub fn as_identifier(&self) -> Option<&Token> {
        match &self.kind {
            ExprKind::Identifier(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_assignable(&self) -> bool {
        matches!(self.kind, ExprKind::Identifier(_) | ExprKind::Indexing { .. })
    }
}

/// Comma separated expressions, as used by calls and `print`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub position: Position,
    pub expressions: Vec<Expr>,
}

impl ExprList {
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.expressions.iter()
    }
}

IMPL_NODE!(Expr, ExprList);
