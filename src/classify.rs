//! Statement classification
//!
//! Maps each raw statement of a do-block body onto one of the four shapes
//! the interpreter understands. Classification is purely syntactic; no
//! expression is ever evaluated here.

use crate::ast::{DoBlock, Expr, RawStmt};
use crate::diagnostics::{DoError, Result};
use serde::{Deserialize, Serialize};

/// How to treat statements that almost, but not quite, match a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// A `<-` whose target is not a plain identifier degrades to `Discard`:
    /// the rhs is still sequenced, the intended binding is dropped
    #[default]
    Lenient,
    /// The same shape is a hard `MalformedBind` error
    Strict,
}

/// A classified do-block statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// `name <- rhs`: rhs must produce a monadic value; its unwrapped
    /// payload is bound to `name` before the rest of the block runs
    Bind { name: String, rhs: Expr },
    /// A bare monadic expression, sequenced for effect only
    Discard { rhs: Expr },
    /// `let name = rhs`: plain, non-monadic local binding
    Let { name: String, rhs: Expr },
    /// `return rhs`: lift the plain value of rhs via the monad's unit
    Return { rhs: Expr },
}

/// Classify one raw statement
///
/// First match wins: return, let, bind, and everything else is a discard.
pub fn classify(stmt: &RawStmt, strictness: Strictness) -> Result<Statement> {
    match stmt {
        RawStmt::Return { value, .. } => Ok(Statement::Return {
            rhs: value.clone(),
        }),
        RawStmt::Let { name, value, .. } => Ok(Statement::Let {
            name: name.clone(),
            rhs: value.clone(),
        }),
        RawStmt::Arrow { target, value, .. } => match target.as_var() {
            Some(name) => Ok(Statement::Bind {
                name: name.to_string(),
                rhs: value.clone(),
            }),
            None if strictness == Strictness::Strict => Err(DoError::MalformedBind {
                target: target.to_string(),
            }),
            None => {
                tracing::warn!(
                    bind_target = %target,
                    "bind target is not a plain identifier; binding dropped"
                );
                Ok(Statement::Discard {
                    rhs: value.clone(),
                })
            }
        },
        RawStmt::Expr { value, .. } => Ok(Statement::Discard {
            rhs: value.clone(),
        }),
    }
}

/// Classify every statement of a block, in order
pub fn classify_block(block: &DoBlock, strictness: Strictness) -> Result<Vec<Statement>> {
    block
        .stmts
        .iter()
        .map(|stmt| classify(stmt, strictness))
        .collect()
}
