//! Getting Started with Chrona
//!
//! This example walks through the core pipeline: ingest per-frame
//! detections, filter by payload, bridge frame gaps, coalesce into events
//! and summarize the result.

use chrona::ingest::{CLASS_FIELD, Detection, SCORE_FIELD, VideoMetadata};
use chrona::predicate::{always, field_at_least, field_eq};
use chrona::prelude::*;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Chrona - Getting Started ===\n");

    // ========================================
    // 1. Ingest per-frame detections
    // ========================================
    println!("1. Ingesting detections");
    println!("------------------------");

    let meta = VideoMetadata {
        id: 0,
        fps: 30.0,
        num_frames: 300,
        width: 1920,
        height: 1080,
    };

    // A detector would produce this; here a car sits in frame for the
    // first 150 frames, with a low-confidence blip at frame 200.
    let mut frames: Vec<Vec<Detection>> = vec![Vec::new(); 300];
    for (i, frame) in frames.iter_mut().enumerate().take(150) {
        frame.push(Detection::new(
            100.0,
            400.0,
            500.0,
            800.0,
            "car",
            0.85 + (i % 10) as f64 / 100.0,
        ));
    }
    frames[200].push(Detection::new(90.0, 390.0, 510.0, 810.0, "car", 0.31));

    let mut mapping: IntervalSetMapping = IntervalSetMapping::new();
    mapping.insert(meta.id, detections_to_set(&meta, &frames, None)?);

    let stats = mapping.stats();
    println!("   Ingested {} intervals across {} video(s)", stats.intervals, stats.keys);

    // ========================================
    // 2. Filter by payload fields
    // ========================================
    println!("\n2. Filtering by class and confidence");
    println!("-------------------------------------");

    let confident_cars = mapping
        .filter(field_eq(CLASS_FIELD, "car"))?
        .filter(field_at_least(SCORE_FIELD, 0.5))?;
    println!(
        "   {} confident car detections (dropped the 0.31-score blip)",
        confident_cars.stats().intervals
    );

    // ========================================
    // 3. Coalesce frames into events
    // ========================================
    println!("\n3. Coalescing into events");
    println!("--------------------------");

    // Dilating by half a frame bridges single-frame dropouts before the
    // merge; the inverse dilation restores exact event spans.
    let half_frame = 0.5 / 30.0;
    let events = confident_cars
        .dilate(half_frame)?
        .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)?
        .dilate(-half_frame)?;

    for (key, set) in events.iter() {
        for event in set.iter() {
            println!(
                "   video {}: {} event from {:.2}s to {:.2}s",
                key,
                event.payload().require_str(CLASS_FIELD)?,
                event.bounds().t1(),
                event.bounds().t2()
            );
        }
    }

    // ========================================
    // 4. Keep only long events
    // ========================================
    println!("\n4. Duration filtering");
    println!("----------------------");

    let long_events = events.filter_size(2.0, None)?;
    let stats = long_events.stats();
    println!(
        "   {} event(s) of at least 2s, {:.1}s total",
        stats.intervals, stats.total_duration
    );

    println!("\n✓ Done");
    Ok(())
}
