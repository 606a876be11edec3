//! three-way comparison of field values
//!
//! [ascending] and [descending] are the generic comparators used by [crate::sorter::by_keys]. They understand
//! strings and the numeric families of [Value]:
//!
//! | left \ right      | string        | integer/unsigned | decimal       |
//! |-------------------|---------------|------------------|---------------|
//! | string            | lexicographic | mismatch         | mismatch      |
//! | integer/unsigned  | mismatch      | exact            | exact         |
//! | decimal           | mismatch      | exact            | total order   |
//!
//! Booleans, arrays and objects can not be compared at all.
use crate::value::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// Outcome of comparing two values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Lesser,
    Equal,
    Greater,
}

impl Verdict {
    /// Swaps [Verdict::Lesser] and [Verdict::Greater]
    pub fn reverse(self) -> Self {
        match self {
            Verdict::Lesser => Verdict::Greater,
            Verdict::Equal => Verdict::Equal,
            Verdict::Greater => Verdict::Lesser,
        }
    }
}

impl From<Ordering> for Verdict {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => Verdict::Lesser,
            Ordering::Equal => Verdict::Equal,
            Ordering::Greater => Verdict::Greater,
        }
    }
}

impl From<Verdict> for Ordering {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Lesser => Ordering::Less,
            Verdict::Equal => Ordering::Equal,
            Verdict::Greater => Ordering::Greater,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("unsupported type {kind} for value {value}")]
    UnsupportedType { kind: &'static str, value: String },
    #[error("cannot compare {left} with {right}")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
}

impl CompareError {
    fn unsupported(value: &Value) -> Self {
        CompareError::UnsupportedType {
            kind: value.type_name(),
            value: format!("{value:?}"),
        }
    }
}

/// Signature of every field comparator
pub type ComparatorFn = dyn Fn(&Value, &Value) -> Result<Verdict, CompareError> + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// The generic comparator sorting in this direction
    pub fn comparator(self) -> fn(&Value, &Value) -> Result<Verdict, CompareError> {
        match self {
            Direction::Ascending => ascending,
            Direction::Descending => descending,
        }
    }
}

/// A named field and the function used to compare its values
#[derive(Clone, derive_new::new)]
pub struct KeyComparator {
    pub name: String,
    pub comparator: Arc<ComparatorFn>,
}

/// Key comparators in order of precedence
pub type KeyComparatorList = Vec<KeyComparator>;

impl KeyComparator {
    /// Key comparator using the generic comparator for `direction`
    pub fn generic(name: impl Into<String>, direction: Direction) -> Self {
        Self::new(name.into(), Arc::new(direction.comparator()))
    }

    /// Key comparator with a custom comparison
    ///
    /// ```
    /// # use keysort::comparator::{KeyComparator, Verdict};
    /// # use keysort::value::Value;
    /// // sort booleans, `false` first
    /// let by_enabled = KeyComparator::with("enabled", |a: &Value, b: &Value| match (a, b) {
    ///     (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b).into()),
    ///     _ => Ok(Verdict::Equal),
    /// });
    /// assert_eq!(by_enabled.compare(&false.into(), &true.into()), Ok(Verdict::Lesser));
    /// ```
    pub fn with<F>(name: impl Into<String>, comparator: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Verdict, CompareError> + Send + Sync + 'static,
    {
        Self::new(name.into(), Arc::new(comparator))
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Result<Verdict, CompareError> {
        (self.comparator)(a, b)
    }
}

impl std::fmt::Debug for KeyComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyComparator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Verdict is [Verdict::Lesser] when `a` is greater than `b`
pub fn descending(a: &Value, b: &Value) -> Result<Verdict, CompareError> {
    natural_order(a, b).map(|ordering| Verdict::from(ordering).reverse())
}

/// Inverse of [descending]
pub fn ascending(a: &Value, b: &Value) -> Result<Verdict, CompareError> {
    descending(a, b).map(Verdict::reverse)
}

fn natural_order(a: &Value, b: &Value) -> Result<Ordering, CompareError> {
    use Value::*;

    match (a, b) {
        (String(a), String(b)) => Ok(a.cmp(b)),
        (Integer(a), Integer(b)) => Ok(a.cmp(b)),
        (Unsigned(a), Unsigned(b)) => Ok(a.cmp(b)),
        (Integer(a), Unsigned(b)) => Ok(i128::from(*a).cmp(&i128::from(*b))),
        (Unsigned(a), Integer(b)) => Ok(i128::from(*a).cmp(&i128::from(*b))),
        (Integer(a), Decimal(b)) => Ok(integer_to_float(i128::from(*a), *b)),
        (Unsigned(a), Decimal(b)) => Ok(integer_to_float(i128::from(*a), *b)),
        (Decimal(a), Integer(b)) => Ok(integer_to_float(i128::from(*b), *a).reverse()),
        (Decimal(a), Unsigned(b)) => Ok(integer_to_float(i128::from(*b), *a).reverse()),
        (Decimal(a), Decimal(b)) => {
            if a == b {
                // 0.0 and -0.0
                return Ok(Ordering::Equal);
            }
            Ok(a.total_cmp(b))
        }
        (Boolean(_) | Array(_) | Object(_), _) => Err(CompareError::unsupported(a)),
        (_, Boolean(_) | Array(_) | Object(_)) => Err(CompareError::unsupported(b)),
        _ => Err(CompareError::TypeMismatch {
            left: a.type_name(),
            right: b.type_name(),
        }),
    }
}

/// Orders an integer against a float without rounding either
///
/// NaN is placed the way [f64::total_cmp] places it: above every number when positive, below when negative.
fn integer_to_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    let whole = float.trunc();
    // saturates for infinities and floats beyond the i128 range, all of which are out of reach for 64 bit integers
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0f64.partial_cmp(&(float - whole)).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn both(a: impl Into<Value>, b: impl Into<Value>) -> (Verdict, Verdict) {
        let (a, b) = (a.into(), b.into());
        (
            ascending(&a, &b).expect("comparable"),
            descending(&a, &b).expect("comparable"),
        )
    }

    #[test]
    fn strings() {
        assert_eq!(both("a", "b"), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both("b", "a"), (Verdict::Greater, Verdict::Lesser));
        assert_eq!(both("same", "same"), (Verdict::Equal, Verdict::Equal));
        assert_eq!(both("B", "a"), (Verdict::Lesser, Verdict::Greater));
    }

    #[test]
    fn signed_integers() {
        assert_eq!(both(-5i32, 3i32), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(7i64, 7i64), (Verdict::Equal, Verdict::Equal));
    }

    #[test]
    fn unsigned_integers() {
        assert_eq!(both(u64::MAX, 1u64), (Verdict::Greater, Verdict::Lesser));
        assert_eq!(both(9u16, 9u16), (Verdict::Equal, Verdict::Equal));
    }

    #[test]
    fn floats() {
        assert_eq!(both(0.25f32, 0.5f64), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(1.5, 1.5), (Verdict::Equal, Verdict::Equal));
        assert_eq!(both(0.0, -0.0), (Verdict::Equal, Verdict::Equal));
        assert_eq!(both(f64::NEG_INFINITY, -1e300), (Verdict::Lesser, Verdict::Greater));
    }

    #[test]
    fn mixed_widths() {
        assert_eq!(both(3i8, 3i64), (Verdict::Equal, Verdict::Equal));
        assert_eq!(both(-1i8, 1000i64), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(-1i64, u64::MAX), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(200u8, 100i16), (Verdict::Greater, Verdict::Lesser));
        assert_eq!(both(2i32, 2.5f64), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(2.0f32, 2u8), (Verdict::Equal, Verdict::Equal));
        assert_eq!(both(-2i32, -2.5), (Verdict::Greater, Verdict::Lesser));
        assert_eq!(both(-3.0, -2i64), (Verdict::Lesser, Verdict::Greater));
    }

    #[test]
    fn integers_against_floats_beyond_f64_precision() {
        const EXACT_LIMIT: i64 = 1 << 53;

        assert_eq!(
            both(EXACT_LIMIT + 1, EXACT_LIMIT as f64),
            (Verdict::Greater, Verdict::Lesser)
        );
        assert_eq!(both(EXACT_LIMIT as f64, EXACT_LIMIT), (Verdict::Equal, Verdict::Equal));
        assert_eq!(
            both(EXACT_LIMIT as f64, EXACT_LIMIT + 1),
            (Verdict::Lesser, Verdict::Greater)
        );

        // u64::MAX as f64 rounds up to 2^64
        assert_eq!(both(u64::MAX, u64::MAX as f64), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(u64::MAX as f64, u64::MAX - 1), (Verdict::Greater, Verdict::Lesser));
        assert_eq!(both(i64::MIN, i64::MIN as f64), (Verdict::Equal, Verdict::Equal));
        assert_eq!(both(u64::MAX, f64::MAX), (Verdict::Lesser, Verdict::Greater));
    }

    #[test]
    fn integers_against_non_finite_floats() {
        assert_eq!(both(i64::MAX, f64::INFINITY), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(i64::MIN, f64::NEG_INFINITY), (Verdict::Greater, Verdict::Lesser));
        assert_eq!(both(u64::MAX, f64::NAN), (Verdict::Lesser, Verdict::Greater));
        assert_eq!(both(-f64::NAN, 0u8), (Verdict::Lesser, Verdict::Greater));
    }

    #[test]
    fn type_mismatch() {
        assert_eq!(
            ascending(&"1".into(), &1i32.into()),
            Err(CompareError::TypeMismatch {
                left: "string",
                right: "integer"
            })
        );
        assert!(descending(&1.5.into(), &"x".into()).is_err());
    }

    #[test]
    fn unsupported_types() {
        let nested = crate::record! { "inner" => 1 };
        let Err(CompareError::UnsupportedType { kind, .. }) = descending(&nested, &nested) else {
            panic!("nested records must not be comparable");
        };
        assert_eq!(kind, "object");

        let Err(CompareError::UnsupportedType { kind, .. }) = ascending(&1i32.into(), &true.into())
        else {
            panic!("booleans must not be comparable");
        };
        assert_eq!(kind, "boolean");

        assert!(ascending(&vec![1i32].into(), &vec![1i32].into()).is_err());
    }

    #[test]
    fn direction_comparators() {
        let (a, b) = (Value::from(1i32), Value::from(2i32));
        assert_eq!(Direction::default(), Direction::Ascending);
        assert_eq!(Direction::Ascending.comparator()(&a, &b), Ok(Verdict::Lesser));
        assert_eq!(Direction::Descending.comparator()(&a, &b), Ok(Verdict::Greater));

        let key = KeyComparator::generic("size", Direction::Descending);
        assert_eq!(key.name, "size");
        assert_eq!(key.compare(&b, &a), Ok(Verdict::Lesser));
    }

    #[test]
    fn verdict_ordering_conversion() {
        assert_eq!(Ordering::from(Verdict::Lesser), Ordering::Less);
        assert_eq!(Verdict::from(Ordering::Greater), Verdict::Greater);
        assert_eq!(Verdict::Equal.reverse(), Verdict::Equal);
    }
}
