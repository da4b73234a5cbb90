use serde::{Deserialize, Serialize};

/// Summary statistics for an interval set mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingStats {
    /// Number of keys (tracks/videos) in the mapping
    pub keys: usize,
    /// Total number of intervals across all keys
    pub intervals: usize,
    /// Summed temporal duration of all intervals, in seconds
    pub total_duration: f64,
}

impl MappingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_set(&mut self, intervals: usize, duration: f64) {
        self.intervals += intervals;
        self.total_duration += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_accumulates() {
        let mut stats = MappingStats::new();
        stats.record_set(3, 90.0);
        stats.record_set(2, 30.0);
        assert_eq!(stats.intervals, 5);
        assert_eq!(stats.total_duration, 120.0);
    }
}
