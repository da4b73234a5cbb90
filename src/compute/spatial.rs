//! Spatial overlap measures over interval footprints.
//!
//! The spatial axes of a bounds volume form an axis-aligned rectangle (its
//! footprint). This module provides the area arithmetic over footprints
//! used by the IOU predicate.

use chrona_types::Bounds3D;
use geo::Rect;

/// Area of an axis-aligned rectangle.
pub fn rect_area(rect: &Rect) -> f64 {
    rect.width() * rect.height()
}

/// Area of the intersection of two rectangles, zero when disjoint.
pub fn intersection_area(a: &Rect, b: &Rect) -> f64 {
    let width = a.max().x.min(b.max().x) - a.min().x.max(b.min().x);
    let height = a.max().y.min(b.max().y) - a.min().y.max(b.min().y);
    if width <= 0.0 || height <= 0.0 {
        0.0
    } else {
        width * height
    }
}

/// Area of the union of two rectangles.
pub fn union_area(a: &Rect, b: &Rect) -> f64 {
    rect_area(a) + rect_area(b) - intersection_area(a, b)
}

/// Intersection-over-union of the X/Y footprints of two bounds.
///
/// Returns a ratio in `[0, 1]`. A zero union area (both footprints
/// degenerate) yields `0.0`, never a division by zero.
///
/// # Examples
///
/// ```
/// use chrona::compute::spatial::iou;
/// use chrona::Bounds3D;
///
/// let a = Bounds3D::new(0.0, 30.0, 0.0, 0.1, 0.5, 0.6)?;
/// let b = Bounds3D::new(0.0, 30.0, 0.05, 0.15, 0.5, 0.6)?;
/// assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// # Ok::<(), chrona::ChronaError>(())
/// ```
pub fn iou(a: &Bounds3D, b: &Bounds3D) -> f64 {
    let (fa, fb) = (a.footprint(), b.footprint());
    let union = union_area(&fa, &fb);
    if union <= 0.0 {
        return 0.0;
    }
    intersection_area(&fa, &fb) / union
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spatial(x1: f64, x2: f64, y1: f64, y2: f64) -> Bounds3D {
        Bounds3D::new(0.0, 1.0, x1, x2, y1, y2).unwrap()
    }

    #[test]
    fn test_iou_hand_computed() {
        // Intersection 0.05 x 0.1 = 0.005, union 0.01 + 0.01 - 0.005 = 0.015
        let a = spatial(0.0, 0.1, 0.5, 0.6);
        let b = spatial(0.05, 0.15, 0.5, 0.6);
        assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_iou_identical_boxes() {
        let a = spatial(0.2, 0.4, 0.2, 0.4);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_iou_disjoint_boxes() {
        let a = spatial(0.0, 0.1, 0.0, 0.1);
        let b = spatial(0.5, 0.6, 0.5, 0.6);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_touching_boxes_share_no_area() {
        let a = spatial(0.0, 0.1, 0.0, 0.1);
        let b = spatial(0.1, 0.2, 0.0, 0.1);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_zero_union_area() {
        let a = spatial(0.5, 0.5, 0.5, 0.5);
        assert_eq!(iou(&a, &a), 0.0);
    }
}
