//! Ingestion options.
//!
//! Options are serializable so they can be loaded from JSON (or TOML with
//! the `toml` feature) alongside the rest of a pipeline's configuration.
//!
//! # Example
//!
//! ```rust
//! use chrona::IngestOptions;
//!
//! // Defaults: normalize coordinates, keep every detection
//! let opts = IngestOptions::default();
//! assert!(opts.normalize_coords);
//!
//! // Load from JSON; omitted fields fall back to defaults
//! let opts: IngestOptions = serde_json::from_str(r#"{"min_score": 0.5}"#).unwrap();
//! assert_eq!(opts.min_score, Some(0.5));
//! assert!(opts.normalize_coords);
//! ```

use serde::{Deserialize, Serialize};

/// Options applied while turning raw detections into intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Divide detection box coordinates by frame width/height so spatial
    /// axes land in `[0, 1]` (default: true). Disable when the detector
    /// already emits normalized coordinates.
    #[serde(default = "IngestOptions::default_normalize_coords")]
    pub normalize_coords: bool,

    /// Drop detections whose confidence score is below this floor
    /// (None means keep everything).
    #[serde(default)]
    pub min_score: Option<f64>,
}

impl IngestOptions {
    const fn default_normalize_coords() -> bool {
        true
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Keep detector coordinates as-is instead of normalizing to `[0, 1]`.
    pub fn with_raw_coords(mut self) -> Self {
        self.normalize_coords = false;
        self
    }

    /// Parse options from a TOML string.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(raw: &str) -> crate::error::Result<Self> {
        toml::from_str(raw).map_err(|e| {
            crate::error::ChronaError::InvalidInput(format!(
                "Failed to parse ingest options: {}",
                e
            ))
        })
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            normalize_coords: Self::default_normalize_coords(),
            min_score: None,
        }
    }
}
