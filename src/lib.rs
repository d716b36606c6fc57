//! mondo — a do-notation interpreter
//!
//! Given a monad capability (any type exposing a sequencing operation and a
//! value-lifting operation) and a block written in a small imperative-looking
//! surface syntax, `mondo` rewrites the block into a nested chain of monadic
//! sequencing calls and evaluates it, producing a single monadic result.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Block extraction → Classifier → Interpreter → Monadic value
//! ```
//!
//! # Example
//!
//! ```
//! use mondo::monad::{maybe, Maybe};
//! use mondo::{Environment, Value};
//!
//! let env = Environment::new();
//! maybe::install(&env);
//!
//! let result = mondo::run(
//!     &Maybe,
//!     "do {
//!         x <- Present(4);
//!         y <- Present(x + 5);
//!         Present(x + y)
//!     }",
//!     &env,
//! )
//! .unwrap();
//!
//! assert_eq!(result, maybe::present(Value::Int(13)));
//! ```

pub mod ast;
pub mod classify;
pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod monad;
pub mod parser;

// Re-exports for convenience
pub use classify::{Statement, Strictness};
pub use diagnostics::{DoError, Result, SourceFile};
pub use interp::{Environment, Interpreter, Value};
pub use monad::Monad;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse source code to a do-block
pub fn parse(source: &str) -> Result<ast::DoBlock> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens, source)
}

/// Run a do-block against `monad`, with lenient classification
pub fn run(monad: &dyn Monad, source: &str, env: &Environment) -> Result<Value> {
    run_with(monad, source, env, Strictness::Lenient)
}

/// Run a do-block with an explicit classification strictness
pub fn run_with(
    monad: &dyn Monad,
    source: &str,
    env: &Environment,
    strictness: Strictness,
) -> Result<Value> {
    Interpreter::new(monad)
        .with_strictness(strictness)
        .run(source, env)
}
