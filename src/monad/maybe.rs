//! The optional-value monad used by the tests and examples

use crate::diagnostics::{DoError, Result};
use crate::interp::{Environment, Value};

use super::{Continuation, Monad};

/// Type name carried by Maybe variant values
pub const TYPE_NAME: &str = "Maybe";

/// An optional-value monad: `Present(v)` carries a payload, `Absent`
/// short-circuits the rest of the block
#[derive(Debug, Clone, Copy, Default)]
pub struct Maybe;

/// Wrap a value as `Present(v)`
pub fn present(value: Value) -> Value {
    Value::Variant {
        type_name: TYPE_NAME.to_string(),
        ctor: "Present".to_string(),
        fields: vec![value],
    }
}

/// The empty value
pub fn absent() -> Value {
    Value::Variant {
        type_name: TYPE_NAME.to_string(),
        ctor: "Absent".to_string(),
        fields: Vec::new(),
    }
}

/// Install the `Present` constructor and the `Absent` value into a scope
pub fn install(env: &Environment) {
    env.define(
        "Present",
        Value::native("Present", |mut args: Vec<Value>| {
            if args.len() != 1 {
                return Err(DoError::ArityMismatch {
                    callee: "Present".to_string(),
                    expected: 1,
                    found: args.len(),
                });
            }
            Ok(present(args.remove(0)))
        }),
    );
    env.define("Absent", absent());
}

impl Monad for Maybe {
    fn unit(&self, value: Value) -> Result<Value> {
        Ok(present(value))
    }

    fn sequence(&self, mut m: Value, k: Continuation<'_>) -> Result<Value> {
        match m {
            Value::Variant {
                ref type_name,
                ref ctor,
                ..
            } if type_name == TYPE_NAME && ctor == "Absent" => Ok(m),
            Value::Variant {
                ref type_name,
                ref ctor,
                ref mut fields,
            } if type_name == TYPE_NAME && ctor == "Present" && fields.len() == 1 => {
                k(fields.remove(0))
            }
            other => Err(DoError::NotMonadic {
                found: other.type_name().to_string(),
            }),
        }
    }
}
