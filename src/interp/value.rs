//! Runtime values for the interpreter

use std::fmt;
use std::rc::Rc;

use crate::diagnostics::Result;

/// Signature of a host function callable from inside a do-block
pub type NativeFn = Rc<dyn Fn(Vec<Value>) -> Result<Value>>;

/// Runtime value
#[derive(Clone)]
pub enum Value {
    /// Unit value `()`
    Unit,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// String
    String(String),
    /// Tagged variant value, e.g. `Present(4)`. Monadic values use this
    /// representation
    Variant {
        type_name: String,
        ctor: String,
        fields: Vec<Value>,
    },
    /// Host function installed in the environment
    Native { name: String, f: NativeFn },
}

impl Value {
    /// Wrap a host function
    pub fn native(
        name: impl Into<String>,
        f: impl Fn(Vec<Value>) -> Result<Value> + 'static,
    ) -> Value {
        Value::Native {
            name: name.into(),
            f: Rc::new(f),
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Variant { .. } => "variant",
            Value::Native { .. } => "native function",
        }
    }

    /// Check if value is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Unit => false,
            _ => true,
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Variant {
                type_name,
                ctor,
                fields,
            } => {
                write!(f, "{}::{}", type_name, ctor)?;
                if !fields.is_empty() {
                    write!(f, "(")?;
                    for (i, v) in fields.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{:?}", v)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            Value::Native { name, .. } => write!(f, "<fn {}>", name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Variant { ctor, fields, .. } => {
                write!(f, "{}", ctor)?;
                if !fields.is_empty() {
                    write!(f, "(")?;
                    for (i, v) in fields.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", v)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            Value::Native { name, .. } => write!(f, "<fn {}>", name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (
                Value::Variant {
                    type_name: t1,
                    ctor: c1,
                    fields: f1,
                },
                Value::Variant {
                    type_name: t2,
                    ctor: c2,
                    fields: f2,
                },
            ) => t1 == t2 && c1 == c2 && f1 == f2,
            _ => false,
        }
    }
}
