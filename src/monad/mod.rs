//! The monad capability
//!
//! The interpreter drives any type offering a sequencing operation and a
//! value-lifting operation. Nothing else is assumed about the monadic
//! value's representation.

pub mod maybe;

pub use maybe::Maybe;

use crate::diagnostics::Result;
use crate::interp::Value;

/// The deferred rest-of-block computation handed to [`Monad::sequence`]
pub type Continuation<'a> = Box<dyn FnOnce(Value) -> Result<Value> + 'a>;

/// Capability bundle for the monad driving a do-block
///
/// Implementations decide if and when the continuation runs: a monad
/// modelling absence may simply never invoke it.
///
/// Well-behaved implementations satisfy the monad laws:
///
/// ```text
/// sequence(unit(a), k)        == k(a)
/// sequence(m, unit)           == m
/// sequence(sequence(m, k), h) == sequence(m, |x| sequence(k(x), h))
/// ```
///
/// The interpreter does not verify these.
pub trait Monad {
    /// Lift a plain value into the monad
    fn unit(&self, value: Value) -> Result<Value>;

    /// Monadic bind: feed the unwrapped payload of `m` to `k`, which
    /// returns the next monadic value
    fn sequence(&self, m: Value, k: Continuation<'_>) -> Result<Value>;
}
