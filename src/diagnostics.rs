//! Diagnostic reporting with source locations
//!
//! This module provides rich error messages with source locations using miette.

use crate::common::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::sync::Arc;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DoError>;

/// Source file for error reporting
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content: Arc<str>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::from(content.into()),
        }
    }

    pub fn to_named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.content.to_string())
    }
}

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Do-block diagnostic
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum DoError {
    // === Lex/Parse Errors ===
    #[error("Unrecognized token")]
    #[diagnostic(code(lex::unknown_token))]
    UnknownToken {
        #[label("cannot lex this")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unexpected token: expected {expected}, found {found}")]
    #[diagnostic(code(parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unexpected end of input")]
    #[diagnostic(code(parse::unexpected_eof))]
    UnexpectedEof {
        #[label("expected more tokens")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("No do-block found in source")]
    #[diagnostic(
        code(parse::block_not_found),
        help("wrap the statements in `do {{ ... }}`")
    )]
    BlockNotFound {
        #[source_code]
        src: NamedSource<String>,
    },

    // === Classification Errors ===
    #[error("Malformed bind: `{target}` is not a plain identifier")]
    #[diagnostic(
        code(classify::malformed_bind),
        help("the left side of `<-` must be a single name, e.g. `x <- expr`")
    )]
    MalformedBind { target: String },

    // === Interpretation Errors ===
    #[error("Do-block has no statements")]
    #[diagnostic(code(interp::empty_block))]
    EmptyBlock,

    #[error("Undefined variable `{name}`")]
    #[diagnostic(code(interp::undefined_var))]
    UndefinedVariable { name: String },

    #[error("Expected a monadic value, found {found}")]
    #[diagnostic(
        code(interp::not_monadic),
        help("every statement except `let` and `return` must produce a value of the driving monad")
    )]
    NotMonadic { found: String },

    #[error("Value of type {found} is not callable")]
    #[diagnostic(code(interp::not_callable))]
    NotCallable { found: String },

    #[error("`{callee}` expects {expected} argument(s), got {found}")]
    #[diagnostic(code(interp::arity_mismatch))]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    #[error("Cannot apply `{op}` to {lhs} and {rhs}")]
    #[diagnostic(code(interp::invalid_operand))]
    InvalidOperand {
        op: String,
        lhs: String,
        rhs: String,
    },

    #[error("Cannot apply unary `{op}` to {operand}")]
    #[diagnostic(code(interp::invalid_unary))]
    InvalidUnaryOperand { op: String, operand: String },

    #[error("Division by zero")]
    #[diagnostic(code(interp::division_by_zero))]
    DivisionByZero,
}
