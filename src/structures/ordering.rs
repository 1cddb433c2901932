// ============================================================================
// spark-structures - Ordering
// Comparators used by MinHeap
// ============================================================================
//
// Statically typed elements pick their ordering at compile time:
// `NaturalOrder` for anything `Ord`, or any `Fn(&T, &T) -> Ordering` closure.
// `JsonOrder` keeps runtime inference for dynamically typed values, and is
// the only place a missing default ordering can be reported.
// ============================================================================

use std::cmp::Ordering;

use serde_json::Value;

use crate::core::error::{Result, StructureError};

// =============================================================================
// COMPARATOR TRAIT
// =============================================================================

/// A total order over `T` used to keep a heap in min-heap order.
pub trait Comparator<T> {
    /// Compare two elements. `Less` means `a` belongs closer to the root.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// True if `a` is strictly greater than `b`.
    fn greater(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// True if `a` is strictly less than `b`.
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

// =============================================================================
// NATURAL ORDER
// =============================================================================

/// Ascending order for any `T: Ord` (numbers, strings, tuples...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverse of another comparator. Turns a `MinHeap` into a max-heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T, C: Comparator<T>> Comparator<T> for Reversed<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

// =============================================================================
// JSON ORDER (runtime inference)
// =============================================================================

/// The ordering inferred from a sample of JSON values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// Every sampled value was a number.
    Numeric,
    /// Every sampled value was a string.
    Lexicographic,
}

/// Default ordering for `serde_json::Value`, inferred from the initial values.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use spark_structures::{JsonKind, JsonOrder};
///
/// let order = JsonOrder::infer(&[json!(3), json!(1.5)]).unwrap();
/// assert_eq!(order.kind(), JsonKind::Numeric);
///
/// assert!(JsonOrder::infer(&[json!(1), json!("one")]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOrder {
    kind: JsonKind,
}

impl JsonOrder {
    /// Numeric ascending order.
    pub const NUMERIC: JsonOrder = JsonOrder {
        kind: JsonKind::Numeric,
    };

    /// Lexicographic ascending order.
    pub const LEXICOGRAPHIC: JsonOrder = JsonOrder {
        kind: JsonKind::Lexicographic,
    };

    /// Infer the ordering from a sample of values.
    ///
    /// All strings (including an empty sample) yield lexicographic order, all
    /// numbers yield numeric order. Anything else is a configuration error.
    pub fn infer(values: &[Value]) -> Result<Self> {
        if values.iter().all(Value::is_string) {
            return Ok(Self::LEXICOGRAPHIC);
        }
        if values.iter().all(Value::is_number) {
            return Ok(Self::NUMERIC);
        }

        let mut kinds: Vec<&'static str> = values.iter().map(kind_name).collect();
        kinds.sort_unstable();
        kinds.dedup();
        Err(StructureError::NoDefaultOrdering {
            kinds: kinds.join(", "),
        })
    }

    /// The inferred kind.
    pub fn kind(&self) -> JsonKind {
        self.kind
    }

    fn rank(&self, value: &Value) -> u8 {
        match (self.kind, value) {
            (JsonKind::Numeric, Value::Number(_)) => 0,
            (JsonKind::Numeric, Value::String(_)) => 1,
            (JsonKind::Lexicographic, Value::String(_)) => 0,
            (JsonKind::Lexicographic, Value::Number(_)) => 1,
            _ => 2,
        }
    }
}

impl Comparator<Value> for JsonOrder {
    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.total_cmp(&y)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            // Off-kind values keep a total order: inferred kind first.
            _ => self
                .rank(a)
                .cmp(&self.rank(b))
                .then_with(|| a.to_string().cmp(&b.to_string())),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn natural_order_is_ascending() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&"b", &"a"), Ordering::Greater);
        assert!(NaturalOrder.greater(&10, &2));
        assert!(!NaturalOrder.less(&2, &2));
    }

    #[test]
    fn closures_are_comparators() {
        let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
        assert!(by_len.less(&"ab".to_string(), &"abc".to_string()));
    }

    #[test]
    fn reversed_flips_the_order() {
        assert!(Reversed(NaturalOrder).less(&5, &1));
    }

    #[test]
    fn infers_numeric() {
        let order = JsonOrder::infer(&[json!(10), json!(2.5), json!(-1)]).unwrap();
        assert_eq!(order.kind(), JsonKind::Numeric);
        assert!(order.less(&json!(2), &json!(10)));
    }

    #[test]
    fn infers_lexicographic() {
        let order = JsonOrder::infer(&[json!("b"), json!("a")]).unwrap();
        assert_eq!(order.kind(), JsonKind::Lexicographic);
        assert!(order.less(&json!("10"), &json!("2")));
    }

    #[test]
    fn empty_sample_is_lexicographic() {
        assert_eq!(JsonOrder::infer(&[]).unwrap(), JsonOrder::LEXICOGRAPHIC);
    }

    #[test]
    fn mixed_or_object_values_fail() {
        let err = JsonOrder::infer(&[json!(1), json!({"a": 1}), json!(2)]).unwrap_err();
        assert_eq!(
            err,
            StructureError::NoDefaultOrdering {
                kinds: "number, object".to_string()
            }
        );

        assert!(JsonOrder::infer(&[json!(true)]).is_err());
        assert!(JsonOrder::infer(&[json!(null), json!("x")]).is_err());
    }

    #[test]
    fn off_kind_values_sort_after_inferred_kind() {
        let order = JsonOrder::NUMERIC;
        assert!(order.less(&json!(1000), &json!("a")));
        assert!(order.less(&json!("a"), &json!(null)));

        let order = JsonOrder::LEXICOGRAPHIC;
        assert!(order.less(&json!("zzz"), &json!(1)));
    }
}
