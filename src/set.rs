//! Ordered interval collections and the algebra over them.
//!
//! An `IntervalSet` holds the intervals of one logical track (typically one
//! video). Every operation is pure: it returns a new set and never mutates
//! the receiver, so pipelines chain freely
//! (`filter(..)?.minus(..)?.coalesce(..)?.filter_size(..)`).
//!
//! Operations fail atomically: on the first predicate or construction
//! error the whole operation aborts and no partial set escapes.

use crate::compute::{temporal, validation};
use crate::error::Result;
use chrona_types::{Axis, Bounds3D, Interval, PayloadPolicy};
use serde::{Deserialize, Serialize};

/// An ordered collection of intervals for one track.
///
/// No ordering is required at construction; algorithms that need a sort
/// (`coalesce`, `minus`, `join`) order internally and leave the input
/// untouched. Duplicate intervals are legal and preserved.
///
/// # Examples
///
/// ```rust
/// use chrona::prelude::*;
///
/// let set = IntervalSet::new(vec![
///     Interval::new(Bounds3D::temporal(0.0, 30.0)?, Payload::new()),
///     Interval::new(Bounds3D::temporal(30.0, 60.0)?, Payload::new()),
/// ]);
/// let merged = set.coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)?;
/// assert_eq!(merged.len(), 1);
/// # Ok::<(), chrona::ChronaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Create a set from a vector of intervals, preserving their order.
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Create an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Borrow the intervals in order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Consume the set, returning its intervals.
    pub fn into_intervals(self) -> Vec<Interval> {
        self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Append another set's intervals (construction aid; the algebra
    /// itself never mutates existing sets).
    pub fn extend(&mut self, other: IntervalSet) {
        self.intervals.extend(other.intervals);
    }

    /// The smallest bounds containing every interval, `None` when empty.
    pub fn bounds_span(&self) -> Option<Bounds3D> {
        let mut iter = self.intervals.iter();
        let first = iter.next()?.bounds.clone();
        Some(iter.fold(first, |acc, interval| acc.span(&interval.bounds)))
    }

    /// Keep exactly the intervals the predicate accepts, order preserved.
    pub fn filter<P>(&self, predicate: P) -> Result<Self>
    where
        P: Fn(&Interval) -> Result<bool>,
    {
        let mut kept = Vec::new();
        for interval in &self.intervals {
            if predicate(interval)? {
                kept.push(interval.clone());
            }
        }
        Ok(Self::new(kept))
    }

    /// Replace each interval with `f(interval)`, order preserved.
    ///
    /// An `f` that builds invalid bounds fails at construction and the
    /// error aborts the whole map.
    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&Interval) -> Result<Interval>,
    {
        let mut mapped = Vec::with_capacity(self.intervals.len());
        for interval in &self.intervals {
            mapped.push(f(interval)?);
        }
        Ok(Self::new(mapped))
    }

    /// Expand every interval by `amount` on each side of the temporal axis.
    pub fn dilate(&self, amount: f64) -> Result<Self> {
        self.dilate_axis(Axis::T, amount)
    }

    /// Expand every interval by `amount` on each side of the chosen axis.
    ///
    /// A negative amount shrinks; shrinking an interval past inversion is
    /// rejected, not clipped.
    pub fn dilate_axis(&self, axis: Axis, amount: f64) -> Result<Self> {
        validation::validate_dilation(amount)?;
        self.map(|interval| {
            Ok(Interval::new(
                interval.bounds.expand(axis, amount)?,
                interval.payload.clone(),
            ))
        })
    }

    /// Keep intervals whose temporal extent lies in `[min, max]` inclusive.
    ///
    /// `max = None` means unbounded above, so `filter_size(0.0, None)` is
    /// the identity.
    pub fn filter_size(&self, min: f64, max: Option<f64>) -> Result<Self> {
        self.filter_size_axis(Axis::T, min, max)
    }

    /// Keep intervals whose extent on the chosen axis lies in `[min, max]`.
    pub fn filter_size_axis(&self, axis: Axis, min: f64, max: Option<f64>) -> Result<Self> {
        validation::validate_size_range(min, max)?;
        let max = max.unwrap_or(f64::INFINITY);
        Ok(Self::new(
            self.intervals
                .iter()
                .filter(|interval| {
                    let size = interval.size(axis);
                    size >= min && size <= max
                })
                .cloned()
                .collect(),
        ))
    }

    /// Merge runs of adjacent-or-overlapping intervals on the chosen axis.
    ///
    /// Intervals are sorted by `(lo, hi)` on the axis (stable on ties),
    /// then scanned once: each interval folds into the open merged
    /// interval iff it touches or overlaps it on the axis AND the
    /// predicate accepts `(current_merged, next)`. Bounds combine through
    /// `merge_bounds` (callers usually pass [`Bounds3D::span`]); payloads
    /// combine under `policy` — the default policy, `First`, keeps the
    /// earliest payload and drops the rest.
    ///
    /// Touching endpoints DO merge here, unlike the half-open `overlaps`
    /// predicate.
    pub fn coalesce<M, P>(
        &self,
        axis: Axis,
        merge_bounds: M,
        predicate: P,
        policy: PayloadPolicy,
    ) -> Result<Self>
    where
        M: Fn(&Bounds3D, &Bounds3D) -> Bounds3D,
        P: Fn(&Interval, &Interval) -> Result<bool>,
    {
        let merged =
            temporal::coalesce_scan(&self.intervals, axis, merge_bounds, predicate, policy)?;
        Ok(Self::new(merged))
    }

    /// Relative complement gated by a predicate.
    ///
    /// Keeps each interval `a` of this set unless some interval `b` in
    /// `other` within temporal gap `window` satisfies `predicate(a, b)`.
    /// The window is strictly a candidate-pruning radius: the predicate
    /// always evaluates on the original bounds, never widened ones.
    /// Output preserves this set's original order. Anti-monotone in
    /// `other`: adding intervals there never grows the result.
    pub fn minus<P>(&self, other: &IntervalSet, predicate: P, window: f64) -> Result<Self>
    where
        P: Fn(&Interval, &Interval) -> Result<bool>,
    {
        validation::validate_window(window)?;
        if other.is_empty() {
            return Ok(self.clone());
        }

        let mut dropped = vec![false; self.intervals.len()];
        temporal::sweep(&self.intervals, &other.intervals, window, |li, ri| {
            let matched = predicate(&self.intervals[li], &other.intervals[ri])?;
            if matched {
                dropped[li] = true;
            }
            Ok(matched)
        })?;

        Ok(Self::new(
            self.intervals
                .iter()
                .zip(&dropped)
                .filter(|(_, dropped)| !**dropped)
                .map(|(interval, _)| interval.clone())
                .collect(),
        ))
    }

    /// Cross-relate two sets under a predicate and temporal window.
    ///
    /// Emits `merge(a, b)` for every candidate pair the predicate accepts.
    /// This is the primitive beneath [`minus`](Self::minus); results are
    /// ordered by the left side's temporal start (ties by insertion
    /// order), then by the right side's admission order.
    pub fn join<P, M>(
        &self,
        other: &IntervalSet,
        predicate: P,
        window: f64,
        merge: M,
    ) -> Result<Self>
    where
        P: Fn(&Interval, &Interval) -> Result<bool>,
        M: Fn(&Interval, &Interval) -> Result<Interval>,
    {
        validation::validate_window(window)?;

        let mut joined = Vec::new();
        temporal::sweep(&self.intervals, &other.intervals, window, |li, ri| {
            let (a, b) = (&self.intervals[li], &other.intervals[ri]);
            if predicate(a, b)? {
                joined.push(merge(a, b)?);
            }
            Ok(false)
        })?;

        Ok(Self::new(joined))
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
