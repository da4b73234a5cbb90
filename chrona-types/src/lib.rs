//! # chrona-types
//!
//! Core value types for the Chrona interval algebra engine.
//!
//! This crate provides the fundamental types for working with spatio-temporal
//! interval data:
//!
//! - **Axis and bounds types**: `Axis`, `Bounds3D`
//! - **Payload types**: `Payload`, `PayloadPolicy`
//! - **Interval types**: `Interval`
//! - **Statistics types**: `MappingStats`
//!
//! All types are serializable with Serde. Bounds are validated at
//! construction: every coordinate must be finite and `lo <= hi` must hold on
//! each axis.
//!
//! ## Examples
//!
//! ```rust
//! use chrona_types::{Bounds3D, Interval, Payload};
//!
//! let bounds = Bounds3D::new(0.0, 30.0, 0.1, 0.2, 0.5, 0.6)?;
//! let payload = Payload::new().with("class", "car").with("score", 0.92);
//! let interval = Interval::new(bounds, payload);
//! assert_eq!(interval.duration(), 30.0);
//! # Ok::<(), chrona_types::BoundsError>(())
//! ```

pub mod bounds;
pub mod error;
pub mod interval;
pub mod payload;
pub mod stats;

pub use bounds::{Axis, Bounds3D};
pub use error::{BoundsError, PayloadError};
pub use interval::Interval;
pub use payload::{Payload, PayloadPolicy};
pub use stats::MappingStats;
