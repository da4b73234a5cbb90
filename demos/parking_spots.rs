//! Empty Parking Spot Detection
//!
//! The classic derived-event pipeline: start from a fixed candidate
//! parking spot and per-frame vehicle detections, subtract every spot
//! interval a vehicle sufficiently overlaps, coalesce what survives and
//! keep only vacancies long enough to matter. Each spot region runs
//! through the pipeline independently (coalesce merges one run at a
//! time, so regions must not interleave), then the per-spot results are
//! folded back into one mapping.

use chrona::ingest::{CLASS_FIELD, Detection, HINT_FIELD, VideoMetadata, detections_to_mapping};
use chrona::predicate::{and_pred, field_eq, iou_at_least, overlaps};
use chrona::prelude::*;
use std::error::Error;

const FPS: f64 = 1.0;
const FRAMES: u32 = 600;
const MIN_VACANCY_SECS: f64 = 240.0;

/// Candidate spot regions in pixel coordinates: `(x1, y1, x2, y2)`.
const SPOT_BOXES: [(f64, f64, f64, f64); 2] = [
    (50.0, 700.0, 200.0, 900.0),
    (250.0, 700.0, 400.0, 900.0),
];

fn metadata(id: u64) -> VideoMetadata {
    VideoMetadata {
        id,
        fps: FPS,
        num_frames: FRAMES,
        width: 1000,
        height: 1000,
    }
}

/// One spot region, present in every frame.
fn spot_frames(spot: (f64, f64, f64, f64)) -> Vec<Vec<Detection>> {
    let (x1, y1, x2, y2) = spot;
    (0..FRAMES)
        .map(|_| vec![Detection::new(x1, y1, x2, y2, "spot", 1.0)])
        .collect()
}

/// Vehicle detections: the first spot is occupied for the first 300
/// frames of video 1; everything else stays free.
fn vehicle_frames(video: u64) -> Vec<Vec<Detection>> {
    (0..FRAMES)
        .map(|frame| {
            if video == 1 && frame < 300 {
                vec![Detection::new(55.0, 705.0, 195.0, 895.0, "car", 0.93)]
            } else {
                Vec::new()
            }
        })
        .collect()
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Chrona - Empty Parking Spots ===\n");

    let detections = detections_to_mapping(
        vec![
            (metadata(1), vehicle_frames(1)),
            (metadata(2), vehicle_frames(2)),
        ],
        None,
    )?;
    println!("Ingested {} vehicle detections", detections.stats().intervals);

    // Only vehicles may occupy a spot.
    let vehicles = detections.filter(field_eq(CLASS_FIELD, "car"))?;

    let mut vacancies: IntervalSetMapping = IntervalSetMapping::new();

    for (index, &spot) in SPOT_BOXES.iter().enumerate() {
        let spots = detections_to_mapping(
            vec![
                (metadata(1), spot_frames(spot)),
                (metadata(2), spot_frames(spot)),
            ],
            None,
        )?;

        // A spot interval is occupied when a concurrent vehicle box
        // overlaps it by IOU >= 0.25; subtract those, merge the
        // survivors and keep vacancies of at least four minutes.
        let spot_vacancies = spots
            .minus(
                &vehicles,
                and_pred(overlaps(Axis::T), iou_at_least(0.25)),
                0.0,
            )?
            .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)?
            .filter_size(MIN_VACANCY_SECS, None)?
            .map(|event| {
                // tag the events for the downstream renderer
                let mut payload = event.payload().clone();
                payload.insert(HINT_FIELD, format!("vacant:spot_{index}"));
                Ok(Interval::new(event.bounds().clone(), payload))
            })?;

        for (key, set) in spot_vacancies.iter() {
            vacancies.add(*key, set.clone());
        }
    }

    println!("\nVacancies of at least {MIN_VACANCY_SECS}s:");
    for key in vacancies.keys() {
        let set = vacancies.get(key).expect("key listed but missing");
        println!("  video {key}: {} event(s)", set.len());
        for event in set.iter() {
            println!(
                "    [{:>6.1}s - {:>6.1}s] spot at x={:.2}..{:.2} ({})",
                event.bounds().t1(),
                event.bounds().t2(),
                event.bounds().x1(),
                event.bounds().x2(),
                event.payload().require_str(HINT_FIELD)?,
            );
        }
    }

    let stats = vacancies.stats();
    println!(
        "\n✓ {} vacancy event(s), {:.0}s of free parking found",
        stats.intervals, stats.total_duration
    );

    Ok(())
}
