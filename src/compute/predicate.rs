//! Composable predicates over intervals and interval pairs.
//!
//! Predicates parameterize `filter`, `minus`, `coalesce` and `join`. They
//! are fallible: reading an absent payload field surfaces a typed
//! [`PayloadError`](crate::error::PayloadError) instead of silently
//! evaluating to false. Combinators short-circuit left to right and hand
//! every operand the same interval pair.
//!
//! # Examples
//!
//! ```rust
//! use chrona::prelude::*;
//! use chrona::predicate::{and_pred, iou_at_least, overlaps};
//!
//! let same_region = and_pred(overlaps(Axis::T), iou_at_least(0.25));
//! let a = Interval::new(Bounds3D::new(0.0, 30.0, 0.0, 0.1, 0.5, 0.6)?, Payload::new());
//! let b = Interval::new(Bounds3D::new(0.0, 30.0, 0.05, 0.15, 0.5, 0.6)?, Payload::new());
//! assert!(same_region(&a, &b)?);
//! # Ok::<(), chrona::ChronaError>(())
//! ```

use crate::compute::spatial;
use crate::error::Result;
use chrona_types::{Axis, Interval};
use serde_json::Value;

/// Boxed binary predicate, used by the variadic combinators.
pub type BinaryPredicate = Box<dyn Fn(&Interval, &Interval) -> Result<bool> + Send + Sync>;

/// Boxed unary predicate over a single interval.
pub type UnaryPredicate = Box<dyn Fn(&Interval) -> Result<bool> + Send + Sync>;

/// Pass-through predicate: accepts every pair.
pub fn always() -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync {
    |_, _| Ok(true)
}

/// Both predicates hold. Short-circuits: `q` is not evaluated when `p`
/// rejects the pair.
pub fn and_pred<P, Q>(p: P, q: Q) -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync
where
    P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
    Q: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
{
    move |a, b| Ok(p(a, b)? && q(a, b)?)
}

/// Either predicate holds. Short-circuits on the first acceptance.
pub fn or_pred<P, Q>(p: P, q: Q) -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync
where
    P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
    Q: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
{
    move |a, b| Ok(p(a, b)? || q(a, b)?)
}

/// Negation.
pub fn not_pred<P>(p: P) -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync
where
    P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
{
    move |a, b| Ok(!p(a, b)?)
}

/// All predicates hold, evaluated left to right with short-circuit.
pub fn all_of(predicates: Vec<BinaryPredicate>) -> BinaryPredicate {
    Box::new(move |a, b| {
        for predicate in &predicates {
            if !predicate(a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// At least one predicate holds, evaluated left to right with short-circuit.
pub fn any_of(predicates: Vec<BinaryPredicate>) -> BinaryPredicate {
    Box::new(move |a, b| {
        for predicate in &predicates {
            if predicate(a, b)? {
                return Ok(true);
            }
        }
        Ok(false)
    })
}

/// Box a binary predicate for use with [`all_of`] / [`any_of`].
pub fn boxed<P>(p: P) -> BinaryPredicate
where
    P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync + 'static,
{
    Box::new(p)
}

/// Half-open overlap on one axis; touching endpoints do not overlap.
pub fn overlaps(axis: Axis) -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync {
    move |a, b| Ok(a.bounds.overlaps(axis, &b.bounds))
}

/// Separation on an axis is at most `distance` (overlap and touch count
/// as distance zero).
pub fn within_distance(
    axis: Axis,
    distance: f64,
) -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync {
    move |a, b| Ok(a.bounds.gap(axis, &b.bounds) <= distance)
}

/// Spatial footprint IOU is at least `threshold`. A zero union area never
/// reaches any positive threshold.
pub fn iou_at_least(threshold: f64) -> impl Fn(&Interval, &Interval) -> Result<bool> + Send + Sync {
    move |a, b| Ok(spatial::iou(&a.bounds, &b.bounds) >= threshold)
}

/// Unary: payload field equals the given value. Absent fields are a typed
/// evaluation error, not false.
pub fn field_eq(
    field: impl Into<String>,
    value: impl Into<Value>,
) -> impl Fn(&Interval) -> Result<bool> + Send + Sync {
    let field = field.into();
    let value = value.into();
    move |interval| Ok(interval.payload.require(&field)? == &value)
}

/// Unary: numeric payload field is at least `min`.
pub fn field_at_least(
    field: impl Into<String>,
    min: f64,
) -> impl Fn(&Interval) -> Result<bool> + Send + Sync {
    let field = field.into();
    move |interval| Ok(interval.payload.require_f64(&field)? >= min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChronaError;
    use chrona_types::{Bounds3D, Payload};

    fn interval(t1: f64, t2: f64) -> Interval {
        Interval::from_bounds(Bounds3D::temporal(t1, t2).unwrap())
    }

    #[test]
    fn test_and_short_circuits() {
        let fails = |_: &Interval, _: &Interval| -> Result<bool> {
            Err(ChronaError::InvalidInput("should not run".to_string()))
        };
        let pred = and_pred(|_: &Interval, _: &Interval| Ok(false), fails);
        let a = interval(0.0, 1.0);
        assert!(!pred(&a, &a).unwrap());
    }

    #[test]
    fn test_or_and_not() {
        let a = interval(0.0, 10.0);
        let b = interval(5.0, 15.0);
        let pred = or_pred(overlaps(Axis::T), iou_at_least(0.9));
        assert!(pred(&a, &b).unwrap());

        let inverted = not_pred(overlaps(Axis::T));
        assert!(!inverted(&a, &b).unwrap());
    }

    #[test]
    fn test_all_of_any_of() {
        let a = interval(0.0, 10.0);
        let b = interval(5.0, 15.0);

        let both = all_of(vec![
            boxed(overlaps(Axis::T)),
            boxed(within_distance(Axis::T, 0.0)),
        ]);
        assert!(both(&a, &b).unwrap());

        let neither = any_of(vec![
            boxed(iou_at_least(2.0)),
            boxed(not_pred(overlaps(Axis::T))),
        ]);
        assert!(!neither(&a, &b).unwrap());
    }

    #[test]
    fn test_field_predicates() {
        let car = Interval::new(
            Bounds3D::temporal(0.0, 1.0).unwrap(),
            Payload::new().with("class", "car").with("score", 0.9),
        );

        assert!(field_eq("class", "car")(&car).unwrap());
        assert!(!field_eq("class", "truck")(&car).unwrap());
        assert!(field_at_least("score", 0.5)(&car).unwrap());
        assert!(!field_at_least("score", 0.95)(&car).unwrap());
    }

    #[test]
    fn test_field_predicates_fail_fast_on_missing_fields() {
        let bare = interval(0.0, 1.0);
        assert!(matches!(
            field_eq("class", "car")(&bare),
            Err(ChronaError::Payload(_))
        ));
    }

    #[test]
    fn test_iou_threshold() {
        let a = Interval::from_bounds(Bounds3D::new(0.0, 30.0, 0.0, 0.1, 0.5, 0.6).unwrap());
        let b = Interval::from_bounds(Bounds3D::new(0.0, 30.0, 0.05, 0.15, 0.5, 0.6).unwrap());

        assert!(iou_at_least(0.25)(&a, &b).unwrap());
        assert!(!iou_at_least(0.4)(&a, &b).unwrap());
    }
}
