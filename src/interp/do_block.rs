//! The do-notation interpreter
//!
//! Classifies the statements of a do-block, then folds them right-to-left
//! into nested calls of the monad's sequencing operation. The monad alone
//! decides whether a continuation ever runs.

use crate::ast::DoBlock;
use crate::classify::{self, Statement, Strictness};
use crate::diagnostics::{DoError, Result};
use crate::lexer;
use crate::monad::Monad;
use crate::parser;

use super::env::Environment;
use super::eval::{Evaluator, TreeEvaluator};
use super::value::Value;

/// Do-block interpreter
pub struct Interpreter<'m> {
    monad: &'m dyn Monad,
    evaluator: Box<dyn Evaluator>,
    strictness: Strictness,
}

impl<'m> Interpreter<'m> {
    /// Create an interpreter driving `monad`, with the default evaluator
    /// and lenient classification
    pub fn new(monad: &'m dyn Monad) -> Self {
        Self {
            monad,
            evaluator: Box::new(TreeEvaluator),
            strictness: Strictness::default(),
        }
    }

    /// Set the classification strictness
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Replace the expression evaluator
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Run the full pipeline: lex, locate the do-block, classify its
    /// statements, interpret them against `env`
    pub fn run(&self, source: &str, env: &Environment) -> Result<Value> {
        let tokens = lexer::lex(source)?;
        tracing::debug!(tokens = tokens.len(), "lexed do-block source");
        let block = parser::parse(&tokens, source)?;
        self.run_block(&block, env)
    }

    /// Interpret an already-parsed block
    pub fn run_block(&self, block: &DoBlock, env: &Environment) -> Result<Value> {
        let stmts = classify::classify_block(block, self.strictness)?;
        self.interpret(&stmts, env)
    }

    /// Interpret a classified statement sequence against `env`
    ///
    /// Effect order is strictly sequence order. `env` accumulates bindings
    /// as interpretation proceeds; the continuations passed to the monad
    /// share it.
    pub fn interpret(&self, stmts: &[Statement], env: &Environment) -> Result<Value> {
        let Some((head, tail)) = stmts.split_first() else {
            return Err(DoError::EmptyBlock);
        };

        if tail.is_empty() {
            return self.terminal(head, env);
        }

        match head {
            Statement::Bind { name, rhs } => {
                tracing::trace!(name = %name, rhs = %rhs, "bind");
                let m = self.evaluator.eval(rhs, env)?;
                let cont_env = env.clone();
                self.monad.sequence(
                    m,
                    Box::new(move |value| {
                        cont_env.define(name.clone(), value);
                        self.interpret(tail, &cont_env)
                    }),
                )
            }

            Statement::Discard { rhs } => {
                tracing::trace!(rhs = %rhs, "discard");
                let m = self.evaluator.eval(rhs, env)?;
                let cont_env = env.clone();
                self.monad
                    .sequence(m, Box::new(move |_| self.interpret(tail, &cont_env)))
            }

            Statement::Let { name, rhs } => {
                tracing::trace!(name = %name, rhs = %rhs, "let");
                // Pure local computation: no sequencing call for a let
                let value = self.evaluator.eval(rhs, env)?;
                env.define(name.clone(), value);
                self.interpret(tail, env)
            }

            Statement::Return { .. } => {
                // `return` terminates the block wherever it appears
                tracing::warn!(
                    unreachable = tail.len(),
                    "statements after `return` are never interpreted"
                );
                self.terminal(head, env)
            }
        }
    }

    /// The last statement reached decides the block's result
    fn terminal(&self, stmt: &Statement, env: &Environment) -> Result<Value> {
        match stmt {
            Statement::Return { rhs } => {
                let value = self.evaluator.eval(rhs, env)?;
                self.monad.unit(value)
            }
            // A terminal bind or let performs no binding; the rhs value is
            // the block's result, used as-is
            Statement::Bind { rhs, .. }
            | Statement::Discard { rhs }
            | Statement::Let { rhs, .. } => self.evaluator.eval(rhs, env),
        }
    }
}
