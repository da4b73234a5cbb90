//! Embedded spatio-temporal interval algebra for deriving events from
//! per-frame detections.
//!
//! ## Features
//! - **Validated bounds**: one temporal + two spatial axes, rejected at
//!   construction when inverted or non-finite
//! - **Pure algebra**: `filter`, `map`, `dilate`, `minus`, `coalesce`,
//!   `filter_size`, `join` — every operation returns a new value
//! - **Key-wise lifting**: `IntervalSetMapping` applies every operation
//!   per video key independently, in parallel with the `par` feature
//! - **Composable predicates**: per-axis overlap, IOU thresholds, payload
//!   field checks, boolean combinators
//! - **Detector ingestion**: per-frame `(x1, y1, x2, y2, class, score)`
//!   records become one interval per box
//!
//! ```rust
//! use chrona::prelude::*;
//!
//! let track = IntervalSet::new(vec![
//!     Interval::new(Bounds3D::temporal(0.0, 30.0)?, Payload::new().with("class", "spot")),
//!     Interval::new(Bounds3D::temporal(30.0, 60.0)?, Payload::new().with("class", "spot")),
//! ]);
//!
//! let mut mapping: IntervalSetMapping = IntervalSetMapping::new();
//! mapping.insert(0, track);
//!
//! let events = mapping
//!     .coalesce(Axis::T, |a, b| a.span(b), always(), PayloadPolicy::First)?
//!     .filter_size(45.0, None)?;
//! assert_eq!(events.stats().intervals, 1);
//! # Ok::<(), chrona::ChronaError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod ingest;
pub mod mapping;
pub mod set;

pub use config::IngestOptions;
pub use error::{ChronaError, Result};
pub use ingest::{Detection, VideoMetadata, detections_to_mapping, detections_to_set};
pub use mapping::{IntervalSetMapping, MappingKey};
pub use set::IntervalSet;

pub use chrona_types::{
    Axis, Bounds3D, BoundsError, Interval, MappingStats, Payload, PayloadError, PayloadPolicy,
};

pub use compute::predicate;
pub use compute::spatial::iou;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ChronaError, Result};

    pub use crate::{IntervalSet, IntervalSetMapping};

    pub use chrona_types::{Axis, Bounds3D, Interval, Payload, PayloadPolicy};

    pub use crate::predicate::{always, and_pred, iou_at_least, overlaps};

    pub use crate::{IngestOptions, detections_to_mapping, detections_to_set};
}
