use chrona::predicate::{always, field_eq, iou_at_least};
use chrona::{
    Axis, Bounds3D, ChronaError, Interval, IntervalSet, IntervalSetMapping, Payload, PayloadPolicy,
};

fn interval(t1: f64, t2: f64) -> Interval {
    Interval::from_bounds(Bounds3D::temporal(t1, t2).unwrap())
}

/// Test 1: the minus window is a search radius, never a bounds widener
#[test]
fn test_minus_window_is_a_search_radius() {
    // Identical spatial boxes, 10 seconds apart. The IOU predicate holds on
    // the original bounds whenever the pair is considered at all, so the
    // window alone decides whether `b` is a candidate for `a`.
    let a = Interval::from_bounds(Bounds3D::new(0.0, 10.0, 0.2, 0.4, 0.2, 0.4).unwrap());
    let b = Interval::from_bounds(Bounds3D::new(20.0, 30.0, 0.2, 0.4, 0.2, 0.4).unwrap());
    let set = IntervalSet::new(vec![a]);
    let other = IntervalSet::new(vec![b]);

    // gap is 10: a window of 5 prunes the pair, a window of 15 admits it
    let narrow = set.minus(&other, iou_at_least(0.5), 5.0).unwrap();
    assert_eq!(narrow.len(), 1);

    let wide = set.minus(&other, iou_at_least(0.5), 15.0).unwrap();
    assert!(wide.is_empty());

    // and the retained interval's bounds were never widened
    assert_eq!(narrow.intervals()[0].bounds.t2(), 10.0);
}

/// Test 2: filter is idempotent
#[test]
fn test_filter_is_idempotent() {
    let set = IntervalSet::new(vec![
        Interval::new(
            Bounds3D::temporal(0.0, 10.0).unwrap(),
            Payload::new().with("class", "car"),
        ),
        Interval::new(
            Bounds3D::temporal(10.0, 20.0).unwrap(),
            Payload::new().with("class", "truck"),
        ),
    ]);

    let once = set.filter(field_eq("class", "car")).unwrap();
    let twice = once.filter(field_eq("class", "car")).unwrap();
    assert_eq!(once, twice);
}

/// Test 3: coalesce is idempotent
#[test]
fn test_coalesce_is_idempotent() {
    let set = IntervalSet::new(vec![
        interval(0.0, 30.0),
        interval(30.0, 60.0),
        interval(100.0, 130.0),
        interval(125.0, 160.0),
    ]);

    let once = set
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)
        .unwrap();
    let twice = once
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)
        .unwrap();

    assert_eq!(once.len(), 2);
    assert_eq!(once, twice);
}

/// Test 4: zero-length intervals are legal values with defined behavior
#[test]
fn test_zero_length_intervals() {
    let point = interval(5.0, 5.0);
    let covering = interval(0.0, 10.0);

    // never overlaps under the half-open rule, itself included
    assert!(!point.bounds.overlaps(Axis::T, &point.bounds));
    assert!(!point.bounds.overlaps(Axis::T, &covering.bounds));

    // retained by the identity size filter
    let set = IntervalSet::new(vec![point.clone()]);
    assert_eq!(set.filter_size(0.0, None).unwrap().len(), 1);

    // coalesce still merges it into a touching run
    let set = IntervalSet::new(vec![covering, point]);
    let merged = set
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)
        .unwrap();
    assert_eq!(merged.len(), 1);
}

/// Test 5: dilate bridges small gaps, and the inverse dilation restores spans
#[test]
fn test_dilate_bridges_frame_gaps() {
    // per-frame hits with one-frame dropouts in between
    let set = IntervalSet::new(vec![
        interval(0.0, 1.0),
        interval(2.0, 3.0),
        interval(4.0, 5.0),
    ]);

    let merged = set
        .dilate(0.5)
        .unwrap()
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)
        .unwrap()
        .dilate(-0.5)
        .unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.intervals()[0].bounds.t1(), 0.0);
    assert_eq!(merged.intervals()[0].bounds.t2(), 5.0);
}

/// Test 6: payload evaluation errors carry the offending key and field
#[test]
fn test_predicate_error_context() {
    let mapping: IntervalSetMapping =
        IntervalSetMapping::from_pairs([(9, IntervalSet::new(vec![interval(0.0, 1.0)]))]);

    let err = mapping.filter(field_eq("class", "car")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("key 9"), "unexpected message: {message}");
    assert!(message.contains("'class'"), "unexpected message: {message}");
}

/// Test 7: invalid operation arguments are rejected up front
#[test]
fn test_invalid_arguments() {
    let set = IntervalSet::new(vec![interval(0.0, 1.0)]);

    assert!(matches!(
        set.minus(&set, always(), f64::INFINITY),
        Err(ChronaError::InvalidInput(_))
    ));
    assert!(matches!(
        set.filter_size(10.0, Some(5.0)),
        Err(ChronaError::InvalidInput(_))
    ));
    assert!(matches!(
        set.dilate(f64::NAN),
        Err(ChronaError::InvalidInput(_))
    ));
}

/// Test 8: large per-video interval counts stay tractable
#[test]
fn test_large_track_coalesce_and_minus() {
    // 10K adjacent frame intervals (keeping it reasonable for CI)
    let frames: Vec<Interval> = (0..10_000)
        .map(|i| interval(i as f64, (i + 1) as f64))
        .collect();
    let set = IntervalSet::new(frames);

    let merged = set
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)
        .unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.intervals()[0].duration(), 10_000.0);

    // subtracting the odd-numbered frames keeps exactly the even ones
    let odds = IntervalSet::new(
        (0..10_000)
            .filter(|i| i % 2 == 1)
            .map(|i| interval(i as f64 + 0.25, i as f64 + 0.75))
            .collect(),
    );
    let evens = set
        .minus(&odds, |a, b| Ok(a.bounds.overlaps(Axis::T, &b.bounds)), 0.0)
        .unwrap();
    assert_eq!(evens.len(), 5_000);
}

/// Test 9: structurally equal duplicates flow through independently
#[test]
fn test_duplicates_are_meaningful() {
    let set = IntervalSet::new(vec![interval(0.0, 1.0), interval(0.0, 1.0)]);

    let filtered = set.filter(|_| Ok(true)).unwrap();
    assert_eq!(filtered.len(), 2);

    let merged = set
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)
        .unwrap();
    assert_eq!(merged.len(), 1);
}

/// Test 10: results serialize for hand-off to an external visualizer
#[test]
fn test_mapping_serializes() {
    let mapping: IntervalSetMapping = IntervalSetMapping::from_pairs([(
        1,
        IntervalSet::new(vec![Interval::new(
            Bounds3D::new(0.0, 30.0, 0.0, 0.1, 0.0, 0.1).unwrap(),
            Payload::new().with("class", "spot").with("hint", "highlight"),
        )]),
    )]);

    let json = serde_json::to_string(&mapping).unwrap();
    let back: IntervalSetMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(mapping, back);
}
