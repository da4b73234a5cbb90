//! Error types for the Chrona engine.
//!
//! Every operation either fully succeeds, returning a complete new set or
//! mapping, or fails atomically with a typed error naming the interval, key
//! or axis that triggered it. The algebra is deterministic and pure, so a
//! failure reproduces exactly on the same inputs.

use std::fmt;
use thiserror::Error;

pub use chrona_types::{BoundsError, PayloadError};

/// Errors produced by the interval algebra.
#[derive(Error, Debug)]
pub enum ChronaError {
    /// Constructing or transforming bounds produced an invalid volume.
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    /// A predicate read a payload field that is missing or mistyped.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// An operation argument is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A detection record could not be turned into an interval.
    #[error("Video {video} frame {frame}: {source}")]
    Detection {
        video: u64,
        frame: usize,
        source: BoundsError,
    },

    /// A lifted operation failed for one key of a mapping.
    #[error("Operation failed for key {key}: {source}")]
    KeyOperation {
        key: String,
        source: Box<ChronaError>,
    },
}

impl ChronaError {
    /// Wrap an error with the mapping key it occurred under.
    pub(crate) fn for_key(key: &impl fmt::Debug, source: ChronaError) -> ChronaError {
        ChronaError::KeyOperation {
            key: format!("{key:?}"),
            source: Box::new(source),
        }
    }
}

/// Result type for Chrona operations
pub type Result<T> = std::result::Result<T, ChronaError>;
