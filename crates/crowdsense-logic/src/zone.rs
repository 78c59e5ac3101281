//! Zone occupancy classification — safety tiers from occupancy ratio.
//!
//! Each monitored zone carries a fixed capacity and a live occupancy count.
//! The safety tier is a pure function of the occupancy ratio; occupancy
//! arithmetic is always clamped into `[0, capacity]` so the invariant
//! `0 <= occupancy <= capacity` cannot be violated.

use serde::{Deserialize, Serialize};

/// Safety tier for a zone, derived from its occupancy ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    /// Ratio below 70% — operating normally.
    Safe,
    /// Ratio in [70%, 90%) — monitoring required.
    Warning,
    /// Ratio at or above 90% — immediate action required.
    Danger,
}

/// Occupancy ratio thresholds for tier classification.
pub mod tier_thresholds {
    /// Ratio at or above this is at least `Warning`.
    pub const WARNING_RATIO: f64 = 0.70;
    /// Ratio at or above this is `Danger`.
    pub const DANGER_RATIO: f64 = 0.90;
}

/// A monitored zone with live occupancy.
///
/// Identity, name, and capacity are fixed at configuration time; only
/// `occupancy`, `status`, and `last_update` change during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub name: String,
    /// Maximum safe occupancy.
    pub capacity: u32,
    /// Current occupancy, always within `[0, capacity]`.
    pub occupancy: u32,
    pub status: StatusTier,
    /// Simulation time (seconds) of the last occupancy update.
    pub last_update: f64,
}

impl Zone {
    /// Occupancy as a fraction of capacity (0.0 for zero-capacity zones).
    pub fn ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.occupancy as f64 / self.capacity as f64
        }
    }
}

/// Bounds for the per-tick occupancy random walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyDriftPolicy {
    /// Maximum absolute per-tick change, drawn symmetrically from
    /// `[-max_step, +max_step]`.
    pub max_step: i64,
}

impl Default for OccupancyDriftPolicy {
    fn default() -> Self {
        Self { max_step: 50 }
    }
}

/// Classify an occupancy count against a capacity.
///
/// Boundary-inclusive on the upper side: a ratio of exactly 0.70 is
/// `Warning`, exactly 0.90 is `Danger`. Zero-capacity zones classify as
/// `Safe` (manifest validation rejects them before they reach the engine).
pub fn classify_occupancy(occupancy: u32, capacity: u32) -> StatusTier {
    use tier_thresholds::*;

    if capacity == 0 {
        return StatusTier::Safe;
    }
    let ratio = occupancy as f64 / capacity as f64;
    if ratio >= DANGER_RATIO {
        StatusTier::Danger
    } else if ratio >= WARNING_RATIO {
        StatusTier::Warning
    } else {
        StatusTier::Safe
    }
}

/// Apply a signed delta to an occupancy count, clamped into `[0, capacity]`.
pub fn apply_occupancy_delta(occupancy: u32, capacity: u32, delta: i64) -> u32 {
    (occupancy as i64 + delta).clamp(0, capacity as i64) as u32
}

/// Apply one drift step to a zone: clamp the new occupancy, reclassify,
/// and stamp the update time. Identity, name, and capacity never change.
pub fn drift_zone(zone: &mut Zone, delta: i64, now: f64) {
    zone.occupancy = apply_occupancy_delta(zone.occupancy, zone.capacity, delta);
    zone.status = classify_occupancy(zone.occupancy, zone.capacity);
    zone.last_update = now;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(capacity: u32, occupancy: u32) -> Zone {
        Zone {
            id: 1,
            name: "Main Stage".into(),
            capacity,
            occupancy,
            status: classify_occupancy(occupancy, capacity),
            last_update: 0.0,
        }
    }

    #[test]
    fn test_classify_below_warning_is_safe() {
        assert_eq!(classify_occupancy(650, 1000), StatusTier::Safe);
        assert_eq!(classify_occupancy(0, 1000), StatusTier::Safe);
    }

    #[test]
    fn test_classify_warning_boundary_inclusive() {
        // Exactly 70% is Warning, one person under is Safe.
        assert_eq!(classify_occupancy(700, 1000), StatusTier::Warning);
        assert_eq!(classify_occupancy(699, 1000), StatusTier::Safe);
    }

    #[test]
    fn test_classify_danger_boundary_inclusive() {
        // Exactly 90% is Danger, one person under is Warning.
        assert_eq!(classify_occupancy(900, 1000), StatusTier::Danger);
        assert_eq!(classify_occupancy(899, 1000), StatusTier::Warning);
    }

    #[test]
    fn test_classify_full_zone_is_danger() {
        assert_eq!(classify_occupancy(1000, 1000), StatusTier::Danger);
    }

    #[test]
    fn test_classify_zero_capacity_is_safe() {
        assert_eq!(classify_occupancy(0, 0), StatusTier::Safe);
    }

    #[test]
    fn test_delta_clamps_at_capacity() {
        assert_eq!(apply_occupancy_delta(980, 1000, 70), 1000);
    }

    #[test]
    fn test_delta_clamps_at_zero() {
        assert_eq!(apply_occupancy_delta(30, 1000, -70), 0);
    }

    #[test]
    fn test_negative_delta_applies() {
        assert_eq!(apply_occupancy_delta(500, 1000, -50), 450);
    }

    #[test]
    fn test_drift_reclassifies_through_tiers() {
        // Safe at 650, Warning at 750, Danger at 920, clamped and still
        // Danger when pushed past capacity.
        let mut z = zone(1000, 650);
        assert_eq!(z.status, StatusTier::Safe);

        drift_zone(&mut z, 100, 1.0);
        assert_eq!(z.occupancy, 750);
        assert_eq!(z.status, StatusTier::Warning);

        drift_zone(&mut z, 170, 2.0);
        assert_eq!(z.occupancy, 920);
        assert_eq!(z.status, StatusTier::Danger);

        drift_zone(&mut z, 130, 3.0);
        assert_eq!(z.occupancy, 1000, "occupancy must clamp at capacity");
        assert_eq!(z.status, StatusTier::Danger);
    }

    #[test]
    fn test_drift_stamps_update_time() {
        let mut z = zone(1000, 500);
        drift_zone(&mut z, 0, 42.5);
        assert_eq!(z.last_update, 42.5);
    }

    #[test]
    fn test_drift_preserves_identity() {
        let mut z = zone(1000, 500);
        drift_zone(&mut z, 25, 1.0);
        assert_eq!(z.id, 1);
        assert_eq!(z.name, "Main Stage");
        assert_eq!(z.capacity, 1000);
    }

    #[test]
    fn test_ratio_zero_capacity() {
        let z = zone(0, 0);
        assert_eq!(z.ratio(), 0.0);
    }
}
