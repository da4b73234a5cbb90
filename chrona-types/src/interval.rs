//! The atomic unit of the interval algebra.

use crate::bounds::{Axis, Bounds3D};
use crate::payload::{Payload, PayloadPolicy};
use serde::{Deserialize, Serialize};

/// A bounds volume plus an opaque payload.
///
/// Intervals are plain values: duplicates are legal and meaningful, and the
/// algebra never deduplicates implicitly. Two structurally equal intervals
/// remain distinct elements of a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// The spatio-temporal extent
    pub bounds: Bounds3D,
    /// Arbitrary associated data read by predicates
    pub payload: Payload,
}

impl Interval {
    /// Create an interval from bounds and payload.
    pub fn new(bounds: Bounds3D, payload: Payload) -> Self {
        Self { bounds, payload }
    }

    /// Create an interval with an empty payload.
    pub fn from_bounds(bounds: Bounds3D) -> Self {
        Self::new(bounds, Payload::new())
    }

    /// Get a reference to the bounds.
    pub fn bounds(&self) -> &Bounds3D {
        &self.bounds
    }

    /// Get a reference to the payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Extent on the given axis.
    pub fn size(&self, axis: Axis) -> f64 {
        self.bounds.size(axis)
    }

    /// Temporal extent in seconds.
    pub fn duration(&self) -> f64 {
        self.bounds.duration()
    }

    /// Merge two intervals: spanning bounds, payloads combined per policy.
    pub fn merge_with(&self, other: &Interval, policy: PayloadPolicy) -> Interval {
        Interval::new(
            self.bounds.span(&other.bounds),
            self.payload.merged(&other.payload, policy),
        )
    }
}
