//! Tree-walking expression evaluator

use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::diagnostics::{DoError, Result};

use super::env::Environment;
use super::value::Value;

/// Evaluation of expressions against a captured scope
///
/// The do-block interpreter is written against this seam; the default
/// `TreeEvaluator` walks the expression tree directly.
pub trait Evaluator {
    fn eval(&self, expr: &Expr, env: &Environment) -> Result<Value>;
}

/// The default tree-walking evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEvaluator;

impl Evaluator for TreeEvaluator {
    fn eval(&self, expr: &Expr, env: &Environment) -> Result<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(eval_literal(value)),

            Expr::Var { name, .. } => {
                env.lookup(name)
                    .ok_or_else(|| DoError::UndefinedVariable { name: name.clone() })
            }

            Expr::Unary { op, expr: inner, .. } => {
                let value = self.eval(inner, env)?;
                eval_unary(*op, value)
            }

            Expr::Binary {
                op, left, right, ..
            } => {
                // && and || short-circuit on the left operand
                if matches!(op, BinaryOp::And | BinaryOp::Or) {
                    return self.eval_logical(*op, left, right, env);
                }
                let lhs = self.eval(left, env)?;
                let rhs = self.eval(right, env)?;
                eval_binary(*op, lhs, rhs)
            }

            Expr::Call { callee, args, .. } => {
                let callee_val = self.eval(callee, env)?;
                let mut values = Vec::new();
                for arg in args {
                    values.push(self.eval(arg, env)?);
                }
                match callee_val {
                    Value::Native { f, .. } => f(values),
                    other => Err(DoError::NotCallable {
                        found: other.type_name().to_string(),
                    }),
                }
            }

            Expr::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let cond = self.eval(condition, env)?;
                if cond.is_truthy() {
                    self.eval(then_branch, env)
                } else {
                    self.eval(else_branch, env)
                }
            }
        }
    }
}

impl TreeEvaluator {
    fn eval_logical(
        &self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        env: &Environment,
    ) -> Result<Value> {
        let lhs = self.eval(left, env)?;
        let lhs_bool = lhs.as_bool().ok_or_else(|| DoError::InvalidOperand {
            op: op.to_string(),
            lhs: lhs.type_name().to_string(),
            rhs: "bool".to_string(),
        })?;

        match (op, lhs_bool) {
            (BinaryOp::And, false) => Ok(Value::Bool(false)),
            (BinaryOp::Or, true) => Ok(Value::Bool(true)),
            _ => {
                let rhs = self.eval(right, env)?;
                match rhs.as_bool() {
                    Some(b) => Ok(Value::Bool(b)),
                    None => Err(DoError::InvalidOperand {
                        op: op.to_string(),
                        lhs: lhs.type_name().to_string(),
                        rhs: rhs.type_name().to_string(),
                    }),
                }
            }
        }
    }
}

fn eval_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(n) => Value::Int(*n),
        Literal::Float(x) => Value::Float(*x),
        Literal::String(s) => Value::String(s.clone()),
    }
}

fn eval_unary(op: UnaryOp, value: Value) -> Result<Value> {
    match (op, &value) {
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(-n)),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(DoError::InvalidUnaryOperand {
            op: op.to_string(),
            operand: value.type_name().to_string(),
        }),
    }
}

fn eval_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    use BinaryOp::*;

    match op {
        Add | Sub | Mul | Div | Rem => eval_arithmetic(op, lhs, rhs),
        Eq => Ok(Value::Bool(lhs == rhs)),
        Ne => Ok(Value::Bool(lhs != rhs)),
        Lt | Le | Gt | Ge => eval_comparison(op, lhs, rhs),
        And | Or => unreachable!("logical operators are handled with short-circuiting"),
    }
}

fn eval_arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    use BinaryOp::*;

    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => match op {
            Add => Ok(Value::Int(a.wrapping_add(*b))),
            Sub => Ok(Value::Int(a.wrapping_sub(*b))),
            Mul => Ok(Value::Int(a.wrapping_mul(*b))),
            Div => {
                if *b == 0 {
                    Err(DoError::DivisionByZero)
                } else {
                    Ok(Value::Int(a / b))
                }
            }
            Rem => {
                if *b == 0 {
                    Err(DoError::DivisionByZero)
                } else {
                    Ok(Value::Int(a % b))
                }
            }
            _ => unreachable!(),
        },
        // Mixed int/float arithmetic promotes to float
        (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
            let a = lhs.as_float().unwrap_or_default();
            let b = rhs.as_float().unwrap_or_default();
            let result = match op {
                Add => a + b,
                Sub => a - b,
                Mul => a * b,
                Div => a / b,
                Rem => a % b,
                _ => unreachable!(),
            };
            Ok(Value::Float(result))
        }
        (Value::String(a), Value::String(b)) if op == Add => {
            Ok(Value::String(format!("{}{}", a, b)))
        }
        _ => Err(DoError::InvalidOperand {
            op: op.to_string(),
            lhs: lhs.type_name().to_string(),
            rhs: rhs.type_name().to_string(),
        }),
    }
}

fn eval_comparison(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    use BinaryOp::*;
    use std::cmp::Ordering;

    let ordering = match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
            let a = lhs.as_float().unwrap_or_default();
            let b = rhs.as_float().unwrap_or_default();
            a.partial_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    };

    let Some(ordering) = ordering else {
        return Err(DoError::InvalidOperand {
            op: op.to_string(),
            lhs: lhs.type_name().to_string(),
            rhs: rhs.type_name().to_string(),
        });
    };

    let result = match op {
        Lt => ordering == Ordering::Less,
        Le => ordering != Ordering::Greater,
        Gt => ordering == Ordering::Greater,
        Ge => ordering != Ordering::Less,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}
