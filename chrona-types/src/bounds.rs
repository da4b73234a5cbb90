//! Axis-aligned spatio-temporal bounds.

use crate::error::BoundsError;
use geo::{Rect, coord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three coordinate axes of a `Bounds3D`.
///
/// `T` is the temporal axis (seconds by convention). `X` and `Y` are the
/// spatial axes, normalized to `[0, 1]` relative to frame width and height
/// by convention of the caller. The engine never rescales coordinates; it
/// only compares them, so any consistent coordinate system works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Temporal axis
    T,
    /// Horizontal spatial axis
    X,
    /// Vertical spatial axis
    Y,
}

impl Axis {
    /// All three axes, in canonical order.
    pub const ALL: [Axis; 3] = [Axis::T, Axis::X, Axis::Y];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::T => write!(f, "t"),
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// An immutable axis-aligned volume over one temporal and two spatial axes.
///
/// Construction validates that every coordinate is finite and that
/// `lo <= hi` holds on each axis; violations are rejected with a
/// [`BoundsError`] rather than clipped. Zero-size axes (`lo == hi`) are
/// legal. Deserialization funnels through the same validation.
///
/// # Examples
///
/// ```
/// use chrona_types::bounds::Bounds3D;
///
/// let bounds = Bounds3D::new(0.0, 30.0, 0.1, 0.2, 0.5, 0.6)?;
/// assert_eq!(bounds.duration(), 30.0);
/// assert!(Bounds3D::new(30.0, 0.0, 0.0, 1.0, 0.0, 1.0).is_err());
/// # Ok::<(), chrona_types::BoundsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds3D", into = "RawBounds3D")]
pub struct Bounds3D {
    t1: f64,
    t2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

/// Unvalidated mirror used as the serde representation of `Bounds3D`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawBounds3D {
    t1: f64,
    t2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl TryFrom<RawBounds3D> for Bounds3D {
    type Error = BoundsError;

    fn try_from(raw: RawBounds3D) -> Result<Self, BoundsError> {
        Bounds3D::new(raw.t1, raw.t2, raw.x1, raw.x2, raw.y1, raw.y2)
    }
}

impl From<Bounds3D> for RawBounds3D {
    fn from(bounds: Bounds3D) -> Self {
        RawBounds3D {
            t1: bounds.t1,
            t2: bounds.t2,
            x1: bounds.x1,
            x2: bounds.x2,
            y1: bounds.y1,
            y2: bounds.y2,
        }
    }
}

impl Bounds3D {
    /// Create a new bounds volume from per-axis lower and upper coordinates.
    ///
    /// # Arguments
    ///
    /// * `t1`, `t2` - Temporal extent in seconds
    /// * `x1`, `x2` - Horizontal spatial extent
    /// * `y1`, `y2` - Vertical spatial extent
    pub fn new(t1: f64, t2: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> Result<Self, BoundsError> {
        let bounds = Self {
            t1,
            t2,
            x1,
            x2,
            y1,
            y2,
        };
        for axis in Axis::ALL {
            let (lo, hi) = (bounds.lo(axis), bounds.hi(axis));
            if !lo.is_finite() {
                return Err(BoundsError::NonFinite { axis, value: lo });
            }
            if !hi.is_finite() {
                return Err(BoundsError::NonFinite { axis, value: hi });
            }
            if lo > hi {
                return Err(BoundsError::Inverted { axis, lo, hi });
            }
        }
        Ok(bounds)
    }

    /// Create bounds covering a temporal extent and the full unit frame.
    pub fn temporal(t1: f64, t2: f64) -> Result<Self, BoundsError> {
        Self::new(t1, t2, 0.0, 1.0, 0.0, 1.0)
    }

    /// Lower coordinate on the given axis.
    pub fn lo(&self, axis: Axis) -> f64 {
        match axis {
            Axis::T => self.t1,
            Axis::X => self.x1,
            Axis::Y => self.y1,
        }
    }

    /// Upper coordinate on the given axis.
    pub fn hi(&self, axis: Axis) -> f64 {
        match axis {
            Axis::T => self.t2,
            Axis::X => self.x2,
            Axis::Y => self.y2,
        }
    }

    /// Extent (`hi - lo`) on the given axis.
    pub fn size(&self, axis: Axis) -> f64 {
        self.hi(axis) - self.lo(axis)
    }

    /// Temporal extent in seconds.
    pub fn duration(&self) -> f64 {
        self.size(Axis::T)
    }

    /// Spatial extent on the X axis.
    pub fn width(&self) -> f64 {
        self.size(Axis::X)
    }

    /// Spatial extent on the Y axis.
    pub fn height(&self) -> f64 {
        self.size(Axis::Y)
    }

    pub fn t1(&self) -> f64 {
        self.t1
    }

    pub fn t2(&self) -> f64 {
        self.t2
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// Check half-open overlap on one axis: `a.lo < b.hi && b.lo < a.hi`.
    ///
    /// Touching endpoints do not count as overlap, and a zero-size axis
    /// overlaps nothing, itself included.
    pub fn overlaps(&self, axis: Axis, other: &Bounds3D) -> bool {
        self.lo(axis) < other.hi(axis) && other.lo(axis) < self.hi(axis)
    }

    /// Check half-open overlap on all three axes at once.
    pub fn intersects(&self, other: &Bounds3D) -> bool {
        Axis::ALL.iter().all(|&axis| self.overlaps(axis, other))
    }

    /// Check whether this bounds fully contains another on every axis.
    pub fn contains(&self, other: &Bounds3D) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.lo(axis) <= other.lo(axis) && self.hi(axis) >= other.hi(axis))
    }

    /// The smallest bounds containing both inputs.
    ///
    /// Takes `min(lo)` and `max(hi)` on every axis. Commutative, and always
    /// valid given valid inputs.
    pub fn span(&self, other: &Bounds3D) -> Bounds3D {
        Bounds3D {
            t1: self.t1.min(other.t1),
            t2: self.t2.max(other.t2),
            x1: self.x1.min(other.x1),
            x2: self.x2.max(other.x2),
            y1: self.y1.min(other.y1),
            y2: self.y2.max(other.y2),
        }
    }

    /// Expand the bounds by `amount` on each side of one axis.
    ///
    /// A negative amount shrinks the bounds; shrinking past the point where
    /// the axis inverts is rejected, not clipped.
    pub fn expand(&self, axis: Axis, amount: f64) -> Result<Self, BoundsError> {
        let (mut t1, mut t2) = (self.t1, self.t2);
        let (mut x1, mut x2) = (self.x1, self.x2);
        let (mut y1, mut y2) = (self.y1, self.y2);
        match axis {
            Axis::T => {
                t1 -= amount;
                t2 += amount;
            }
            Axis::X => {
                x1 -= amount;
                x2 += amount;
            }
            Axis::Y => {
                y1 -= amount;
                y2 += amount;
            }
        }
        Self::new(t1, t2, x1, x2, y1, y2)
    }

    /// Separation between two bounds on an axis.
    ///
    /// Zero when the bounds overlap or touch on that axis.
    pub fn gap(&self, axis: Axis, other: &Bounds3D) -> f64 {
        let below = other.lo(axis) - self.hi(axis);
        let above = self.lo(axis) - other.hi(axis);
        below.max(above).max(0.0)
    }

    /// The X/Y spatial footprint as a `geo::Rect`.
    pub fn footprint(&self) -> Rect {
        Rect::new(
            coord! { x: self.x1, y: self.y1 },
            coord! { x: self.x2, y: self.y2 },
        )
    }
}
