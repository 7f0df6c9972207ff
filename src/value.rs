use std::cmp::Ordering;
use std::fmt;

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde_json::{Number, Value};

/// A scalar literal written on the right-hand side of a query expression.
///
/// Literals keep the distinction between integers and floats the way they
/// were written: `10` is an integer, `10.0` and `1e1` are floats.
///
/// # Examples
///
/// ```
/// use jpath::Literal;
/// use serde_json::json;
/// use std::cmp::Ordering;
///
/// let ten = Literal::Integer(10);
/// assert_eq!(ten.compare_to(&json!(5)), Some(Ordering::Less));
/// assert_eq!(ten.compare_to(&json!(10.0)), Some(Ordering::Equal));
/// assert_eq!(ten.compare_to(&json!("10")), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Integer number
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Single-quoted string
    String(String),
}

impl Literal {
    /// Orders a document node against this literal.
    ///
    /// Returns the ordering of `node` relative to the literal, or `None` when
    /// the two are not comparable: different types, or a node that is an
    /// object or an array.
    pub fn compare_to(&self, node: &Value) -> Option<Ordering> {
        match (node, self) {
            (Value::Null, Literal::Null) => Some(Ordering::Equal),
            (Value::Bool(a), Literal::Boolean(b)) => Some(a.cmp(b)),
            (Value::String(a), Literal::String(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::Number(a), Literal::Integer(b)) => compare_numbers(a, &Numeric::Integer(*b)),
            (Value::Number(a), Literal::Float(b)) => compare_numbers(a, &Numeric::Float(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        }
    }
}

enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Numeric::Integer(n) => Decimal::from_i64(*n),
            Numeric::Float(n) => Decimal::from_f64(*n),
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Numeric::Integer(n) => *n as f64,
            Numeric::Float(n) => *n,
        }
    }
}

fn numeric(n: &Number) -> Option<Numeric> {
    if let Some(i) = n.as_i64() {
        Some(Numeric::Integer(i))
    } else {
        n.as_f64().map(Numeric::Float)
    }
}

/// Exact comparison when both sides fit a decimal, `f64` otherwise.
fn compare_numbers(node: &Number, literal: &Numeric) -> Option<Ordering> {
    let node = numeric(node)?;

    if let (Numeric::Integer(a), Numeric::Integer(b)) = (&node, literal) {
        return Some(a.cmp(b));
    }

    if let Some(a) = node.to_decimal()
        && let Some(b) = literal.to_decimal()
    {
        return Some(a.cmp(&b));
    }

    node.to_f64().partial_cmp(&literal.to_f64())
}

/// Returns a human-readable type name for a document node
pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
