//! Temporal sweep and coalesce kernels.
//!
//! Both kernels sort by an axis lower bound and make a single pass, so the
//! cost is O(n log n) plus work proportional to the candidate pairs the
//! window admits, never the full cross product.

use crate::error::Result;
use chrona_types::{Axis, Bounds3D, Interval, PayloadPolicy};
use smallvec::SmallVec;

/// Indices ordered by ascending temporal start; stable on ties.
fn order_by_start(intervals: &[Interval]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&i, &j| {
        intervals[i]
            .bounds
            .lo(Axis::T)
            .total_cmp(&intervals[j].bounds.lo(Axis::T))
    });
    order
}

/// Visit candidate pairs whose temporal gap is at most `window`.
///
/// Left intervals are visited in ascending start order. The right side is
/// admitted into a sliding active list as the sweep reaches its start and
/// expired once it falls behind the lower horizon; the per-pair gap check
/// keeps the candidate set exact. `visit(left_idx, right_idx)` returning
/// `Ok(true)` stops the scan for the current left interval.
pub(crate) fn sweep<F>(
    left: &[Interval],
    right: &[Interval],
    window: f64,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<bool>,
{
    if left.is_empty() || right.is_empty() {
        return Ok(());
    }

    let left_order = order_by_start(left);
    let right_order = order_by_start(right);

    let mut active: SmallVec<[usize; 16]> = SmallVec::new();
    let mut next_right = 0;

    for &li in &left_order {
        let a = &left[li].bounds;
        let upper_horizon = a.hi(Axis::T) + window;
        let lower_horizon = a.lo(Axis::T) - window;

        while next_right < right_order.len() {
            let ri = right_order[next_right];
            if right[ri].bounds.lo(Axis::T) > upper_horizon {
                break;
            }
            active.push(ri);
            next_right += 1;
        }

        // Left starts are non-decreasing, so an entry expired here stays
        // expired for every later left interval.
        active.retain(|&mut ri| right[ri].bounds.hi(Axis::T) >= lower_horizon);

        for &ri in active.iter() {
            if a.gap(Axis::T, &right[ri].bounds) <= window && visit(li, ri)? {
                break;
            }
        }
    }

    Ok(())
}

/// Greedy adjacent-merge after a stable sort on the chosen axis.
///
/// Sort key is `(lo, hi)` ascending; insertion order breaks remaining ties.
/// A subsequent interval folds into the open one iff it starts at or before
/// the open interval's end on the axis (touching merges, unlike the
/// half-open overlap predicate) and the caller's predicate accepts the
/// pair. Payloads combine under `policy`.
pub(crate) fn coalesce_scan<M, P>(
    intervals: &[Interval],
    axis: Axis,
    merge_bounds: M,
    predicate: P,
    policy: PayloadPolicy,
) -> Result<Vec<Interval>>
where
    M: Fn(&Bounds3D, &Bounds3D) -> Bounds3D,
    P: Fn(&Interval, &Interval) -> Result<bool>,
{
    if intervals.is_empty() {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (&intervals[i].bounds, &intervals[j].bounds);
        a.lo(axis)
            .total_cmp(&b.lo(axis))
            .then(a.hi(axis).total_cmp(&b.hi(axis)))
    });

    let mut merged = Vec::new();
    let mut current = intervals[order[0]].clone();

    for &idx in &order[1..] {
        let next = &intervals[idx];
        let touches = next.bounds.lo(axis) <= current.bounds.hi(axis);
        if touches && predicate(&current, next)? {
            current = Interval::new(
                merge_bounds(&current.bounds, &next.bounds),
                current.payload.merged(&next.payload, policy),
            );
        } else {
            merged.push(std::mem::replace(&mut current, next.clone()));
        }
    }
    merged.push(current);

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(t1: f64, t2: f64) -> Interval {
        Interval::from_bounds(Bounds3D::temporal(t1, t2).unwrap())
    }

    #[test]
    fn test_sweep_prunes_by_window() {
        let left = vec![interval(0.0, 10.0)];
        let right = vec![interval(12.0, 15.0), interval(30.0, 40.0)];

        let mut pairs = Vec::new();
        sweep(&left, &right, 2.0, |li, ri| {
            pairs.push((li, ri));
            Ok(false)
        })
        .unwrap();
        assert_eq!(pairs, vec![(0, 0)]);

        pairs.clear();
        sweep(&left, &right, 25.0, |li, ri| {
            pairs.push((li, ri));
            Ok(false)
        })
        .unwrap();
        assert_eq!(pairs, vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_sweep_zero_window_requires_touch_or_overlap() {
        let left = vec![interval(0.0, 10.0)];
        let right = vec![
            interval(10.0, 20.0), // touching: gap 0
            interval(10.5, 20.0), // separated
        ];

        let mut pairs = Vec::new();
        sweep(&left, &right, 0.0, |li, ri| {
            pairs.push((li, ri));
            Ok(false)
        })
        .unwrap();
        assert_eq!(pairs, vec![(0, 0)]);
    }

    #[test]
    fn test_sweep_early_exit_stops_per_left_interval() {
        let left = vec![interval(0.0, 10.0), interval(5.0, 15.0)];
        let right = vec![interval(0.0, 20.0), interval(1.0, 20.0)];

        let mut visits = 0;
        sweep(&left, &right, 0.0, |_, _| {
            visits += 1;
            Ok(true)
        })
        .unwrap();
        // one visit per left interval, the rest short-circuited
        assert_eq!(visits, 2);
    }

    #[test]
    fn test_sweep_handles_unsorted_input() {
        let left = vec![interval(50.0, 60.0), interval(0.0, 10.0)];
        let right = vec![interval(55.0, 58.0), interval(2.0, 4.0)];

        let mut pairs = Vec::new();
        sweep(&left, &right, 0.0, |li, ri| {
            pairs.push((li, ri));
            Ok(false)
        })
        .unwrap();
        assert_eq!(pairs, vec![(1, 1), (0, 0)]);
    }

    #[test]
    fn test_coalesce_scan_merges_touching_runs() {
        let intervals = vec![
            interval(60.0, 90.0),
            interval(0.0, 30.0),
            interval(30.0, 60.0),
            interval(200.0, 230.0),
        ];

        let merged = coalesce_scan(
            &intervals,
            Axis::T,
            |a, b| a.span(b),
            |_, _| Ok(true),
            PayloadPolicy::First,
        )
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].bounds.t1(), 0.0);
        assert_eq!(merged[0].bounds.t2(), 90.0);
        assert_eq!(merged[1].bounds.t1(), 200.0);
    }

    #[test]
    fn test_coalesce_scan_respects_predicate() {
        let intervals = vec![interval(0.0, 30.0), interval(30.0, 60.0)];

        let merged = coalesce_scan(
            &intervals,
            Axis::T,
            |a, b| a.span(b),
            |_, _| Ok(false),
            PayloadPolicy::First,
        )
        .unwrap();

        assert_eq!(merged.len(), 2);
    }
}
