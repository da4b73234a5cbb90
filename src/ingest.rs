//! Construction of interval sets from per-frame detector output.
//!
//! This is the loader boundary: the engine consumes detection records as
//! data shapes only — no HTTP, no files. A detector emits, per video, one
//! sequence of frames, each frame holding zero or more boxes encoded as
//! `(x1, y1, x2, y2, class_label, score)` tuples. Each box becomes one
//! interval spanning its frame's time slice, with the class label and
//! score carried in the payload.

use crate::config::IngestOptions;
use crate::error::{ChronaError, Result};
use crate::mapping::IntervalSetMapping;
use crate::set::IntervalSet;
use chrona_types::{Bounds3D, Interval, Payload};
use serde::{Deserialize, Serialize};

/// Payload field holding the detection class label.
pub const CLASS_FIELD: &str = "class";
/// Payload field holding the detection confidence score.
pub const SCORE_FIELD: &str = "score";
/// Payload field conventionally holding an opaque rendering hint for the
/// downstream visualizer. The engine never reads it.
pub const HINT_FIELD: &str = "hint";

/// Descriptive metadata for one video, as provided by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: u64,
    pub fps: f64,
    pub num_frames: u32,
    pub width: u32,
    pub height: u32,
}

/// Wire shape of one detection: `(x1, y1, x2, y2, class_label, score)`.
type RawDetection = (f64, f64, f64, f64, String, f64);

/// One detected box in one frame, in pixel coordinates by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDetection", into = "RawDetection")]
pub struct Detection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub class_label: String,
    pub score: f64,
}

impl Detection {
    pub fn new(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        class_label: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            class_label: class_label.into(),
            score,
        }
    }
}

impl From<RawDetection> for Detection {
    fn from((x1, y1, x2, y2, class_label, score): RawDetection) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            class_label,
            score,
        }
    }
}

impl From<Detection> for RawDetection {
    fn from(d: Detection) -> Self {
        (d.x1, d.y1, d.x2, d.y2, d.class_label, d.score)
    }
}

fn validate_metadata(meta: &VideoMetadata) -> Result<()> {
    if !meta.fps.is_finite() || meta.fps <= 0.0 {
        return Err(ChronaError::InvalidInput(format!(
            "Video {}: fps must be positive and finite, got: {}",
            meta.id, meta.fps
        )));
    }

    if meta.width == 0 || meta.height == 0 {
        return Err(ChronaError::InvalidInput(format!(
            "Video {}: frame dimensions must be non-zero, got {}x{}",
            meta.id, meta.width, meta.height
        )));
    }

    Ok(())
}

/// Turn one video's per-frame detections into an interval set.
///
/// Frame `f` maps to the temporal slice `[f / fps, (f + 1) / fps)`.
/// Spatial coordinates are divided by frame width/height unless the
/// options disable normalization. The payload of every interval carries
/// [`CLASS_FIELD`] and [`SCORE_FIELD`].
///
/// # Examples
///
/// ```rust
/// use chrona::ingest::{detections_to_set, Detection, VideoMetadata};
///
/// let meta = VideoMetadata { id: 0, fps: 2.0, num_frames: 2, width: 100, height: 100 };
/// let frames = vec![
///     vec![Detection::new(10.0, 20.0, 30.0, 40.0, "car", 0.9)],
///     vec![],
/// ];
/// let set = detections_to_set(&meta, &frames, None)?;
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.intervals()[0].bounds.t2(), 0.5);
/// # Ok::<(), chrona::ChronaError>(())
/// ```
pub fn detections_to_set(
    meta: &VideoMetadata,
    frames: &[Vec<Detection>],
    opts: Option<&IngestOptions>,
) -> Result<IntervalSet> {
    validate_metadata(meta)?;
    let default_opts = IngestOptions::default();
    let opts = opts.unwrap_or(&default_opts);

    if frames.len() as u64 > meta.num_frames as u64 {
        log::warn!(
            "Video {}: detector produced {} frames but metadata reports {}",
            meta.id,
            frames.len(),
            meta.num_frames
        );
    }

    let (width, height) = (meta.width as f64, meta.height as f64);
    let mut intervals = Vec::new();

    for (frame, boxes) in frames.iter().enumerate() {
        let t1 = frame as f64 / meta.fps;
        let t2 = (frame + 1) as f64 / meta.fps;

        for detection in boxes {
            if let Some(min_score) = opts.min_score {
                if detection.score < min_score {
                    continue;
                }
            }

            let (x1, x2, y1, y2) = if opts.normalize_coords {
                (
                    detection.x1 / width,
                    detection.x2 / width,
                    detection.y1 / height,
                    detection.y2 / height,
                )
            } else {
                (detection.x1, detection.x2, detection.y1, detection.y2)
            };

            let bounds =
                Bounds3D::new(t1, t2, x1, x2, y1, y2).map_err(|source| ChronaError::Detection {
                    video: meta.id,
                    frame,
                    source,
                })?;
            let payload = Payload::new()
                .with(CLASS_FIELD, detection.class_label.clone())
                .with(SCORE_FIELD, detection.score);
            intervals.push(Interval::new(bounds, payload));
        }
    }

    Ok(IntervalSet::new(intervals))
}

/// Turn several videos' detections into a mapping keyed by video id.
pub fn detections_to_mapping<I>(
    videos: I,
    opts: Option<&IngestOptions>,
) -> Result<IntervalSetMapping<u64>>
where
    I: IntoIterator<Item = (VideoMetadata, Vec<Vec<Detection>>)>,
{
    let mut mapping = IntervalSetMapping::new();
    for (meta, frames) in videos {
        let set = detections_to_set(&meta, &frames, opts)?;
        mapping.add(meta.id, set);
    }
    Ok(mapping)
}
