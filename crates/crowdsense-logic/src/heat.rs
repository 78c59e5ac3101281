//! Heat map view tiers — density, safety risk, and capacity utilization.
//!
//! The heat map is a derived view over the zone registry snapshot, not an
//! independent simulation: density is the occupancy ratio expressed as a
//! percentage, and each view mode classifies that percentage with its own
//! thresholds.

use crate::zone::{classify_occupancy, StatusTier};
use serde::{Deserialize, Serialize};

/// Crowd density bucket for the density view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatTier {
    Low,
    Medium,
    High,
}

/// Risk bucket for the safety view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyRisk {
    Normal,
    Elevated,
    Critical,
}

/// Occupancy as a percentage of capacity (0.0 for zero-capacity zones).
pub fn density_percent(occupancy: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        occupancy as f64 / capacity as f64 * 100.0
    }
}

/// Density view: High at 80% and above, Medium at 50% and above.
pub fn heat_tier(density: f64) -> HeatTier {
    if density >= 80.0 {
        HeatTier::High
    } else if density >= 50.0 {
        HeatTier::Medium
    } else {
        HeatTier::Low
    }
}

/// Safety view: Critical at 85% and above, Elevated at 70% and above.
pub fn safety_risk(density: f64) -> SafetyRisk {
    if density >= 85.0 {
        SafetyRisk::Critical
    } else if density >= 70.0 {
        SafetyRisk::Elevated
    } else {
        SafetyRisk::Normal
    }
}

/// Capacity view: reuses the zone status thresholds (70% / 90%).
pub fn capacity_tier(occupancy: u32, capacity: u32) -> StatusTier {
    classify_occupancy(occupancy, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_percent() {
        assert_eq!(density_percent(850, 1000), 85.0);
        assert_eq!(density_percent(0, 0), 0.0);
    }

    #[test]
    fn test_heat_tier_thresholds() {
        assert_eq!(heat_tier(49.9), HeatTier::Low);
        assert_eq!(heat_tier(50.0), HeatTier::Medium);
        assert_eq!(heat_tier(79.9), HeatTier::Medium);
        assert_eq!(heat_tier(80.0), HeatTier::High);
    }

    #[test]
    fn test_safety_risk_thresholds() {
        assert_eq!(safety_risk(69.9), SafetyRisk::Normal);
        assert_eq!(safety_risk(70.0), SafetyRisk::Elevated);
        assert_eq!(safety_risk(85.0), SafetyRisk::Critical);
    }

    #[test]
    fn test_capacity_tier_matches_zone_thresholds() {
        assert_eq!(capacity_tier(650, 1000), StatusTier::Safe);
        assert_eq!(capacity_tier(700, 1000), StatusTier::Warning);
        assert_eq!(capacity_tier(900, 1000), StatusTier::Danger);
    }
}
