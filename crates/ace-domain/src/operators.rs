//! Named binary predicates used by condition evaluation.
//!
//! Every predicate is total over JSON values: a type mismatch is a runtime data condition and
//! resolves to `false`. Only a lookup miss is an error, and that is a policy authoring bug the
//! validator should have caught.

use crate::error::InternalError;
use ace_types::ids;
use serde_json::{Number, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// `(actual, expected) -> bool`.
pub trait Predicate: Send + Sync {
    fn test(&self, actual: &JsonValue, expected: &JsonValue) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&JsonValue, &JsonValue) -> bool + Send + Sync,
{
    fn test(&self, actual: &JsonValue, expected: &JsonValue) -> bool {
        self(actual, expected)
    }
}

/// Shape a condition's `value` must have for the operator to be meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueShape {
    Any,
    /// A JSON array.
    List,
    /// A JSON number.
    Numeric,
}

#[derive(Clone)]
pub struct OperatorDef {
    shape: ValueShape,
    predicate: Arc<dyn Predicate>,
}

impl OperatorDef {
    pub fn new(shape: ValueShape, predicate: impl Predicate + 'static) -> Self {
        Self {
            shape,
            predicate: Arc::new(predicate),
        }
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    pub fn test(&self, actual: &JsonValue, expected: &JsonValue) -> bool {
        self.predicate.test(actual, expected)
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Immutable name -> predicate table, built once and handed to the engine.
#[derive(Clone, Debug)]
pub struct OperatorRegistry {
    operators: BTreeMap<String, OperatorDef>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl OperatorRegistry {
    pub fn empty() -> Self {
        Self {
            operators: BTreeMap::new(),
        }
    }

    /// `equals`, `in`, `gt`, `lt`.
    pub fn standard() -> Self {
        Self::empty()
            .with_operator(ids::OP_EQUALS, ValueShape::Any, equals)
            .with_operator(ids::OP_IN, ValueShape::List, is_in)
            .with_operator(ids::OP_GT, ValueShape::Numeric, gt)
            .with_operator(ids::OP_LT, ValueShape::Numeric, lt)
    }

    /// Register (or replace) an operator.
    pub fn with_operator(
        mut self,
        name: impl Into<String>,
        shape: ValueShape,
        predicate: impl Predicate + 'static,
    ) -> Self {
        self.operators
            .insert(name.into(), OperatorDef::new(shape, predicate));
        self
    }

    pub fn get(&self, name: &str) -> Option<&OperatorDef> {
        self.operators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    pub fn apply(
        &self,
        name: &str,
        actual: &JsonValue,
        expected: &JsonValue,
    ) -> Result<bool, InternalError> {
        let op = self.get(name).ok_or_else(|| InternalError::UnknownOperator {
            operator: name.to_string(),
        })?;
        Ok(op.test(actual, expected))
    }
}

/// Structural equality; numbers compare by value so `1` equals `1.0`.
pub fn equals(actual: &JsonValue, expected: &JsonValue) -> bool {
    values_equal(actual, expected)
}

/// Membership of `actual` in `expected`.
///
/// Arrays test elements, strings test substrings, objects test keys. Anything else is `false`.
pub fn is_in(actual: &JsonValue, expected: &JsonValue) -> bool {
    match expected {
        JsonValue::Array(items) => items.iter().any(|item| values_equal(actual, item)),
        JsonValue::String(haystack) => actual
            .as_str()
            .is_some_and(|needle| haystack.contains(needle)),
        JsonValue::Object(map) => actual.as_str().is_some_and(|key| map.contains_key(key)),
        _ => false,
    }
}

pub fn gt(actual: &JsonValue, expected: &JsonValue) -> bool {
    compare(actual, expected) == Some(Ordering::Greater)
}

pub fn lt(actual: &JsonValue, expected: &JsonValue) -> bool {
    compare(actual, expected) == Some(Ordering::Less)
}

/// Ordering between mutually comparable values: number/number or string/string.
fn compare(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => compare_numbers(x, y),
        (JsonValue::String(x), JsonValue::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Exact ordering across integer and float representations.
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    match (as_integer(x), as_integer(y)) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        (Some(a), None) => compare_integer_float(a, y.as_f64()?),
        (None, Some(b)) => compare_integer_float(b, x.as_f64()?).map(Ordering::reverse),
        (None, None) => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Compares without casting the integer to `f64`, which rounds above 2^53.
fn compare_integer_float(int: i128, float: f64) -> Option<Ordering> {
    // 2^64: beyond every i64 and u64.
    const BOUND: f64 = 18_446_744_073_709_551_616.0;

    if float.is_nan() {
        return None;
    }
    if float >= BOUND {
        return Some(Ordering::Less);
    }
    if float <= -BOUND {
        return Some(Ordering::Greater);
    }

    let floor = float.floor();
    // Integral and within +/-2^64, so the cast is exact.
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Some(Ordering::Less),
        other => Some(other),
    }
}

fn values_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            compare_numbers(x, y) == Some(Ordering::Equal)
        }
        (JsonValue::Array(xs), JsonValue::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (JsonValue::Object(xm), JsonValue::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
