//! Event-wide aggregate statistics derived from a zone snapshot.
//!
//! `AggregateStats` is a recomputed projection, never stored: the engine
//! recomputes it after every registry tick. `compute` is a total function
//! over any valid snapshot, including the empty one.

use crate::zone::{StatusTier, Zone};
use serde::{Deserialize, Serialize};

/// Totals and per-tier counts across all monitored zones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_capacity: u64,
    pub total_occupancy: u64,
    pub safe_count: usize,
    pub warning_count: usize,
    pub danger_count: usize,
}

impl AggregateStats {
    /// Rounded percentage of total capacity currently in use (0 when the
    /// venue has no capacity).
    pub fn overall_percentage(&self) -> u32 {
        if self.total_capacity == 0 {
            0
        } else {
            (self.total_occupancy as f64 / self.total_capacity as f64 * 100.0).round() as u32
        }
    }
}

/// Sum capacities and occupancies and partition the zone count by tier.
///
/// Guarantees `safe_count + warning_count + danger_count == zones.len()` and
/// `total_occupancy <= total_capacity` (inherited from the zone invariant).
pub fn compute(zones: &[Zone]) -> AggregateStats {
    let mut stats = AggregateStats::default();
    for zone in zones {
        stats.total_capacity += zone.capacity as u64;
        stats.total_occupancy += zone.occupancy as u64;
        match zone.status {
            StatusTier::Safe => stats.safe_count += 1,
            StatusTier::Warning => stats.warning_count += 1,
            StatusTier::Danger => stats.danger_count += 1,
        }
    }
    stats
}
