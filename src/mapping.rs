//! Key-wise lifted interval algebra.
//!
//! An `IntervalSetMapping` associates an opaque key (typically a video id)
//! with one `IntervalSet` and lifts every set operation across all keys,
//! applying it to each key independently. Cross-key interaction is never
//! permitted; that isolation is what makes the per-key fan-out (the `par`
//! feature) safe.
//!
//! Binary operations take the union of both operands' key sets. A key
//! missing from one side contributes an empty set — a defined case, not an
//! error.

use crate::error::{ChronaError, Result};
use crate::set::IntervalSet;
use chrona_types::{Axis, Bounds3D, Interval, MappingStats, PayloadPolicy};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

/// Bounds required of a mapping key.
///
/// Blanket-implemented; integers, strings and other common id types all
/// qualify. `Ord` gives deterministic key listings, `Debug` gives error
/// context, `Send + Sync` allow the per-key fan-out.
pub trait MappingKey: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

impl<T> MappingKey for T where T: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

/// A mapping from key to interval set with the algebra lifted key-wise.
///
/// # Examples
///
/// ```rust
/// use chrona::prelude::*;
///
/// let mut mapping: IntervalSetMapping = IntervalSetMapping::new();
/// mapping.insert(1, IntervalSet::new(vec![
///     Interval::new(Bounds3D::temporal(0.0, 30.0)?, Payload::new()),
/// ]));
///
/// let merged = mapping.coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)?;
/// assert_eq!(merged.stats().intervals, 1);
/// # Ok::<(), chrona::ChronaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSetMapping<K = u64>
where
    K: MappingKey,
{
    sets: FxHashMap<K, IntervalSet>,
}

impl<K: MappingKey> Default for IntervalSetMapping<K> {
    fn default() -> Self {
        Self {
            sets: FxHashMap::default(),
        }
    }
}

impl<K: MappingKey> IntervalSetMapping<K> {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(key, set)` pairs; repeated keys accumulate.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, IntervalSet)>) -> Self {
        let mut mapping = Self::new();
        for (key, set) in pairs {
            mapping.add(key, set);
        }
        mapping
    }

    /// Insert a set, replacing and returning any previous set at the key.
    pub fn insert(&mut self, key: K, set: IntervalSet) -> Option<IntervalSet> {
        self.sets.insert(key, set)
    }

    /// Append a set's intervals to the key, creating the key if absent.
    pub fn add(&mut self, key: K, set: IntervalSet) {
        self.sets.entry(key).or_default().extend(set);
    }

    pub fn get(&self, key: &K) -> Option<&IntervalSet> {
        self.sets.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.sets.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys: Vec<&K> = self.sets.keys().collect();
        keys.sort();
        keys
    }

    /// Iterate over `(key, set)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &IntervalSet)> {
        self.sets.iter()
    }

    /// Summarize the mapping: key count, interval count, summed duration.
    pub fn stats(&self) -> MappingStats {
        let mut stats = MappingStats::new();
        stats.keys = self.sets.len();
        for set in self.sets.values() {
            stats.record_set(set.len(), set.iter().map(Interval::duration).sum());
        }
        stats
    }

    /// Lifted [`IntervalSet::filter`].
    pub fn filter<P>(&self, predicate: P) -> Result<Self>
    where
        P: Fn(&Interval) -> Result<bool> + Send + Sync,
    {
        self.lift(|set| set.filter(&predicate))
    }

    /// Lifted [`IntervalSet::map`].
    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&Interval) -> Result<Interval> + Send + Sync,
    {
        self.lift(|set| set.map(&f))
    }

    /// Lifted [`IntervalSet::dilate`].
    pub fn dilate(&self, amount: f64) -> Result<Self> {
        self.lift(|set| set.dilate(amount))
    }

    /// Lifted [`IntervalSet::dilate_axis`].
    pub fn dilate_axis(&self, axis: Axis, amount: f64) -> Result<Self> {
        self.lift(|set| set.dilate_axis(axis, amount))
    }

    /// Lifted [`IntervalSet::filter_size`].
    pub fn filter_size(&self, min: f64, max: Option<f64>) -> Result<Self> {
        self.lift(|set| set.filter_size(min, max))
    }

    /// Lifted [`IntervalSet::filter_size_axis`].
    pub fn filter_size_axis(&self, axis: Axis, min: f64, max: Option<f64>) -> Result<Self> {
        self.lift(|set| set.filter_size_axis(axis, min, max))
    }

    /// Lifted [`IntervalSet::coalesce`].
    pub fn coalesce<M, P>(
        &self,
        axis: Axis,
        merge_bounds: M,
        predicate: P,
        policy: PayloadPolicy,
    ) -> Result<Self>
    where
        M: Fn(&Bounds3D, &Bounds3D) -> Bounds3D + Send + Sync,
        P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
    {
        self.lift(|set| set.coalesce(axis, &merge_bounds, &predicate, policy))
    }

    /// Lifted [`IntervalSet::minus`]. Result keys are the union of both
    /// operands' keys; a key absent from `other` subtracts nothing, a key
    /// absent from `self` yields an empty set.
    pub fn minus<P>(&self, other: &Self, predicate: P, window: f64) -> Result<Self>
    where
        P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
    {
        self.lift_binary(other, |a, b| a.minus(b, &predicate, window))
    }

    /// Lifted [`IntervalSet::join`], with the same union-of-keys rule as
    /// [`minus`](Self::minus).
    pub fn join<P, M>(&self, other: &Self, predicate: P, window: f64, merge: M) -> Result<Self>
    where
        P: Fn(&Interval, &Interval) -> Result<bool> + Send + Sync,
        M: Fn(&Interval, &Interval) -> Result<Interval> + Send + Sync,
    {
        self.lift_binary(other, |a, b| a.join(b, &predicate, window, &merge))
    }

    /// Apply a set operation to every key independently.
    fn lift<F>(&self, op: F) -> Result<Self>
    where
        F: Fn(&IntervalSet) -> Result<IntervalSet> + Send + Sync,
    {
        log::debug!("Lifting operation across {} keys", self.sets.len());

        #[cfg(feature = "par")]
        {
            use rayon::prelude::*;
            let entries: Vec<(&K, &IntervalSet)> = self.sets.iter().collect();
            let results: Vec<(K, IntervalSet)> = entries
                .into_par_iter()
                .map(|(key, set)| match op(set) {
                    Ok(out) => Ok((key.clone(), out)),
                    Err(e) => Err(ChronaError::for_key(&key, e)),
                })
                .collect::<Result<_>>()?;
            Ok(Self {
                sets: results.into_iter().collect(),
            })
        }

        #[cfg(not(feature = "par"))]
        {
            let mut sets = FxHashMap::default();
            for (key, set) in &self.sets {
                let out = op(set).map_err(|e| ChronaError::for_key(&key, e))?;
                sets.insert(key.clone(), out);
            }
            Ok(Self { sets })
        }
    }

    /// Apply a binary set operation key-wise over the union of key sets.
    fn lift_binary<F>(&self, other: &Self, op: F) -> Result<Self>
    where
        F: Fn(&IntervalSet, &IntervalSet) -> Result<IntervalSet> + Send + Sync,
    {
        let keys: BTreeSet<&K> = self.sets.keys().chain(other.sets.keys()).collect();
        let empty = IntervalSet::empty();
        log::debug!("Lifting binary operation across {} keys", keys.len());

        #[cfg(feature = "par")]
        {
            use rayon::prelude::*;
            let keys: Vec<&K> = keys.into_iter().collect();
            let results: Vec<(K, IntervalSet)> = keys
                .into_par_iter()
                .map(|key| {
                    let left = self.sets.get(key).unwrap_or(&empty);
                    let right = other.sets.get(key).unwrap_or(&empty);
                    match op(left, right) {
                        Ok(out) => Ok((key.clone(), out)),
                        Err(e) => Err(ChronaError::for_key(&key, e)),
                    }
                })
                .collect::<Result<_>>()?;
            Ok(Self {
                sets: results.into_iter().collect(),
            })
        }

        #[cfg(not(feature = "par"))]
        {
            let mut sets = FxHashMap::default();
            for key in keys {
                let left = self.sets.get(key).unwrap_or(&empty);
                let right = other.sets.get(key).unwrap_or(&empty);
                let out = op(left, right).map_err(|e| ChronaError::for_key(&key, e))?;
                sets.insert(key.clone(), out);
            }
            Ok(Self { sets })
        }
    }
}

impl<K: MappingKey> FromIterator<(K, IntervalSet)> for IntervalSetMapping<K> {
    fn from_iter<I: IntoIterator<Item = (K, IntervalSet)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
