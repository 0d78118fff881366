//! Evaluation of a parsed condition against resolved field values.

use crate::ast::{BitOp, CompareOp, Expr};
use crate::errors::EvalError;
use pfrcheck_types::FieldPath;
use std::fmt;

/// A resolved field value: register fields are integers, predicates are booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Int(u64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v:#x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Capability to look up the current value of a field path.
///
/// Backends range from a plain map (tests, parsed images) to live register reads. `None` means
/// the path does not exist in this context.
pub trait FieldResolver {
    fn resolve(&self, path: &FieldPath) -> Option<Value>;
}

impl<T: FieldResolver + ?Sized> FieldResolver for &T {
    fn resolve(&self, path: &FieldPath) -> Option<Value> {
        (**self).resolve(path)
    }
}

/// Evaluate `expr` to a boolean. An integer-valued top level is a type error.
pub fn evaluate<R: FieldResolver + ?Sized>(expr: &Expr, resolver: &R) -> Result<bool, EvalError> {
    let value = eval_value(expr, resolver)?;
    expect_bool(value, "condition")
}

fn eval_value<R: FieldResolver + ?Sized>(expr: &Expr, resolver: &R) -> Result<Value, EvalError> {
    match expr {
        Expr::Int(v) => Ok(Value::Int(*v)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Field(path) => resolver
            .resolve(path)
            .ok_or_else(|| EvalError::UnknownField(path.clone())),
        Expr::Not(inner) => {
            let v = eval_value(inner, resolver)?;
            Ok(Value::Bool(!expect_bool(v, "operand of 'not'")?))
        }
        // Short-circuit: the right side is not evaluated (and may reference absent fields).
        Expr::And(lhs, rhs) => {
            let l = expect_bool(eval_value(lhs, resolver)?, "operand of 'and'")?;
            if !l {
                return Ok(Value::Bool(false));
            }
            let r = expect_bool(eval_value(rhs, resolver)?, "operand of 'and'")?;
            Ok(Value::Bool(r))
        }
        Expr::Or(lhs, rhs) => {
            let l = expect_bool(eval_value(lhs, resolver)?, "operand of 'or'")?;
            if l {
                return Ok(Value::Bool(true));
            }
            let r = expect_bool(eval_value(rhs, resolver)?, "operand of 'or'")?;
            Ok(Value::Bool(r))
        }
        Expr::Compare { op, lhs, rhs } => {
            let l = eval_value(lhs, resolver)?;
            let r = eval_value(rhs, resolver)?;
            compare(*op, l, r).map(Value::Bool)
        }
        Expr::Bitwise { op, lhs, rhs } => {
            let l = expect_int(eval_value(lhs, resolver)?, op.symbol())?;
            let r = expect_int(eval_value(rhs, resolver)?, op.symbol())?;
            Ok(Value::Int(bitwise(*op, l, r)))
        }
        Expr::Complement(inner) => {
            let v = expect_int(eval_value(inner, resolver)?, "~")?;
            Ok(Value::Int(!v))
        }
    }
}

fn compare(op: CompareOp, lhs: Value, rhs: Value) -> Result<bool, EvalError> {
    let (l, r) = match (lhs, rhs) {
        (Value::Int(l), Value::Int(r)) => (l, r),
        (Value::Bool(l), Value::Bool(r)) => (u64::from(l), u64::from(r)),
        // A predicate compared against 0/1 reads naturally in rule files (`is_valid == 0`).
        (Value::Bool(b), Value::Int(i)) | (Value::Int(i), Value::Bool(b)) if i <= 1 => {
            if matches!(op, CompareOp::Eq | CompareOp::Ne) {
                let same = u64::from(b) == i;
                return Ok(if op == CompareOp::Eq { same } else { !same });
            }
            return Err(ordering_on_bool(op));
        }
        _ => {
            return Err(EvalError::Type(format!(
                "cannot compare {lhs} {} {rhs}",
                op.symbol()
            )));
        }
    };

    if matches!(lhs, Value::Bool(_)) && !matches!(op, CompareOp::Eq | CompareOp::Ne) {
        return Err(ordering_on_bool(op));
    }

    Ok(match op {
        CompareOp::Eq => l == r,
        CompareOp::Ne => l != r,
        CompareOp::Lt => l < r,
        CompareOp::Le => l <= r,
        CompareOp::Gt => l > r,
        CompareOp::Ge => l >= r,
    })
}

fn ordering_on_bool(op: CompareOp) -> EvalError {
    EvalError::Type(format!("'{}' is not defined for booleans", op.symbol()))
}

fn bitwise(op: BitOp, l: u64, r: u64) -> u64 {
    match op {
        BitOp::And => l & r,
        BitOp::Or => l | r,
        BitOp::Xor => l ^ r,
        BitOp::Shl => u32::try_from(r)
            .ok()
            .and_then(|s| l.checked_shl(s))
            .unwrap_or(0),
        BitOp::Shr => u32::try_from(r)
            .ok()
            .and_then(|s| l.checked_shr(s))
            .unwrap_or(0),
    }
}

fn expect_bool(v: Value, what: &str) -> Result<bool, EvalError> {
    match v {
        Value::Bool(b) => Ok(b),
        Value::Int(i) => Err(EvalError::Type(format!(
            "{what} must be boolean, got integer {i:#x}"
        ))),
    }
}

fn expect_int(v: Value, op: &str) -> Result<u64, EvalError> {
    match v {
        Value::Int(i) => Ok(i),
        Value::Bool(b) => Err(EvalError::Type(format!(
            "operand of '{op}' must be an integer, got boolean {b}"
        ))),
    }
}
