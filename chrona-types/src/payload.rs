//! Opaque interval payloads.
//!
//! A payload is an arbitrary associative structure attached to an interval.
//! The engine enforces no schema: downstream predicates read fields by name
//! and fail with a typed [`PayloadError`] when a field is absent or has the
//! wrong type.

use crate::error::PayloadError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Merge policy applied to payloads when two intervals combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayloadPolicy {
    /// Keep the earlier payload, discard the later one (default)
    #[default]
    First,
    /// Keep the later payload, discard the earlier one
    Last,
    /// Merge field-wise; on conflicting fields the earlier payload wins
    Union,
}

/// An opaque associative value container attached to each interval.
///
/// # Examples
///
/// ```rust
/// use chrona_types::Payload;
///
/// let payload = Payload::new().with("class", "car").with("score", 0.92);
/// assert_eq!(payload.require_str("class")?, "car");
/// assert!(payload.require("color").is_err());
/// # Ok::<(), chrona_types::PayloadError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set a field, consuming and returning the payload (builder style).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Set a field in place, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Read a field, `None` when absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Read a field, failing with [`PayloadError::Missing`] when absent.
    pub fn require(&self, field: &str) -> Result<&Value, PayloadError> {
        self.0.get(field).ok_or_else(|| PayloadError::Missing {
            field: field.to_string(),
        })
    }

    /// Read a field as a string.
    pub fn require_str(&self, field: &str) -> Result<&str, PayloadError> {
        self.require(field)?
            .as_str()
            .ok_or_else(|| PayloadError::WrongType {
                field: field.to_string(),
                expected: "string",
            })
    }

    /// Read a field as a number.
    pub fn require_f64(&self, field: &str) -> Result<f64, PayloadError> {
        self.require(field)?
            .as_f64()
            .ok_or_else(|| PayloadError::WrongType {
                field: field.to_string(),
                expected: "number",
            })
    }

    /// Iterate over fields in insertion-independent map order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Combine two payloads under the given policy.
    pub fn merged(&self, other: &Payload, policy: PayloadPolicy) -> Payload {
        match policy {
            PayloadPolicy::First => self.clone(),
            PayloadPolicy::Last => other.clone(),
            PayloadPolicy::Union => {
                let mut merged = self.clone();
                for (field, value) in other.iter() {
                    merged
                        .0
                        .entry(field.clone())
                        .or_insert_with(|| value.clone());
                }
                merged
            }
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
