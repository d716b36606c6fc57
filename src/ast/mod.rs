//! Abstract syntax tree for do-blocks
//!
//! This module defines the statement and expression types produced by the
//! parser. Expressions implement `Display`, rendering back to evaluable
//! source text.

use crate::common::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed do-block: the ordered top-level statements of the body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoBlock {
    pub stmts: Vec<RawStmt>,
    pub span: Span,
}

impl DoBlock {
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// One top-level statement of a do-block body, as parsed
///
/// Shapes are purely syntactic here; deciding what each one *means* is the
/// classifier's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RawStmt {
    /// `let name = expr`
    Let {
        name: String,
        value: Expr,
        span: Span,
    },
    /// `target <- expr` — target may be any expression at this stage
    Arrow {
        target: Expr,
        value: Expr,
        span: Span,
    },
    /// `return expr`
    Return { value: Expr, span: Span },
    /// A bare expression statement
    Expr { value: Expr, span: Span },
}

impl RawStmt {
    pub fn span(&self) -> Span {
        match self {
            RawStmt::Let { span, .. }
            | RawStmt::Arrow { span, .. }
            | RawStmt::Return { span, .. }
            | RawStmt::Expr { span, .. } => *span,
        }
    }
}

/// Expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// Literal value
    Literal { value: Literal, span: Span },
    /// Variable reference
    Var { name: String, span: Span },
    /// Unary operation
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
        span: Span,
    },
    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// Function call
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    /// If expression (the else branch is mandatory: every expression
    /// produces a value)
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Var { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Call { span, .. }
            | Expr::If { span, .. } => *span,
        }
    }

    /// A bare identifier reference, the only well-formed bind target
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Expr::Var { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{}", value),
            Expr::Var { name, .. } => write!(f, "{}", name),
            Expr::Unary { op, expr, .. } => {
                write!(f, "{}", op)?;
                write_operand(f, expr)
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                write_operand(f, left)?;
                write!(f, " {} ", op)?;
                write_operand(f, right)
            }
            Expr::Call { callee, args, .. } => {
                write_operand(f, callee)?;
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                write!(
                    f,
                    "if {} {{ {} }} else {{ {} }}",
                    condition, then_branch, else_branch
                )
            }
        }
    }
}

/// Parenthesize compound sub-expressions so rendered text re-parses the
/// same way
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Binary { .. } | Expr::If { .. } => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}
