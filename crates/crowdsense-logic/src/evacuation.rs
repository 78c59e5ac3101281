//! Evacuation route and session rules.
//!
//! An evacuation session runs a three-phase machine: `Planning` -> `Active`
//! -> `Completed`, forward-only. Routes carry a fixed capacity and a live
//! flow figure that is always clamped into `[0, capacity]`. The stateful
//! machine itself lives in the engine crate; this module holds the plain
//! data and the pure update rules it applies each tick.

use serde::{Deserialize, Serialize};

/// Phase of an evacuation session. Never regresses; `Completed` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvacuationPhase {
    /// Routes staged, awaiting operator confirmation. No ticking.
    Planning,
    /// Evacuation underway; routes and progress update every tick.
    Active,
    /// Terminal. Summary statistics are frozen at transition time.
    Completed,
}

/// Traffic status of a single route.
///
/// `Blocked` is never produced by the tick rule — it exists as a manual or
/// terminal state for future extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Clear,
    Congested,
    Blocked,
}

/// An evacuation egress path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvacuationRoute {
    pub id: u32,
    pub name: String,
    /// Maximum throughput, people per minute.
    pub capacity: u32,
    /// Current throughput, people per minute, within `[0, capacity]`.
    pub current_flow: f64,
    /// Display label, e.g. "8 min".
    pub estimated_time: String,
    pub status: RouteStatus,
    /// Names of the zones this route serves (descriptive labels).
    pub zones: Vec<String>,
}

impl EvacuationRoute {
    /// Flow as a fraction of route capacity (0.0 for zero-capacity routes).
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.current_flow / self.capacity as f64
        }
    }
}

/// Load tier of a route's flow bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationTier {
    Low,
    Medium,
    High,
}

/// Classify a utilization fraction: High above 80%, Medium above 50%.
pub fn utilization_tier(utilization: f64) -> UtilizationTier {
    if utilization > 0.8 {
        UtilizationTier::High
    } else if utilization > 0.5 {
        UtilizationTier::Medium
    } else {
        UtilizationTier::Low
    }
}

/// Bounds for the per-tick evacuation update rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowPolicy {
    /// Maximum per-tick flow decrease (people per minute).
    pub ebb: f64,
    /// Maximum per-tick flow increase. Larger than `ebb`: evacuation flow
    /// ramps up faster than it tapers off.
    pub surge: f64,
    /// Probability a route rolls `Congested` on a given tick.
    pub congestion_chance: f64,
    /// Maximum per-tick overall progress increment (percent points).
    pub max_progress_step: f64,
}

impl Default for FlowPolicy {
    fn default() -> Self {
        Self {
            ebb: 100.0,
            surge: 200.0,
            congestion_chance: 0.2,
            max_progress_step: 5.0,
        }
    }
}

/// Apply a signed flow delta to a route, clamped into `[0, capacity]`.
pub fn apply_flow_delta(route: &mut EvacuationRoute, delta: f64) {
    route.current_flow = (route.current_flow + delta).clamp(0.0, route.capacity as f64);
}

/// Summary statistics frozen at the moment an evacuation completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvacuationSummary {
    /// Elapsed active time formatted as `m:ss`.
    pub elapsed_label: String,
    /// Total headcount moved through the routes (sum of route capacities).
    pub people_evacuated: u64,
    /// Completion percentage at transition time.
    pub success_rate: u32,
}

/// Build the completion summary for a finished session.
pub fn completion_summary(routes: &[EvacuationRoute], active_seconds: f64) -> EvacuationSummary {
    EvacuationSummary {
        elapsed_label: format_elapsed(active_seconds),
        people_evacuated: routes.iter().map(|r| r.capacity as u64).sum(),
        success_rate: 100,
    }
}

/// Format a duration in seconds as `m:ss`.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(capacity: u32, current_flow: f64) -> EvacuationRoute {
        EvacuationRoute {
            id: 1,
            name: "Main Exit A".into(),
            capacity,
            current_flow,
            estimated_time: "8 min".into(),
            status: RouteStatus::Clear,
            zones: vec!["Main Stage".into()],
        }
    }

    #[test]
    fn test_flow_delta_clamps_at_capacity() {
        let mut r = route(2000, 1950.0);
        apply_flow_delta(&mut r, 200.0);
        assert_eq!(r.current_flow, 2000.0);
    }

    #[test]
    fn test_flow_delta_clamps_at_zero() {
        let mut r = route(2000, 40.0);
        apply_flow_delta(&mut r, -100.0);
        assert_eq!(r.current_flow, 0.0);
    }

    #[test]
    fn test_utilization_fraction() {
        let r = route(2000, 500.0);
        assert!((r.utilization() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_utilization_zero_capacity() {
        let r = route(0, 0.0);
        assert_eq!(r.utilization(), 0.0);
    }

    #[test]
    fn test_utilization_tiers() {
        assert_eq!(utilization_tier(0.3), UtilizationTier::Low);
        assert_eq!(utilization_tier(0.6), UtilizationTier::Medium);
        assert_eq!(utilization_tier(0.9), UtilizationTier::High);
        // Boundaries are exclusive.
        assert_eq!(utilization_tier(0.5), UtilizationTier::Low);
        assert_eq!(utilization_tier(0.8), UtilizationTier::Medium);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "0:00");
        assert_eq!(format_elapsed(9.0), "0:09");
        assert_eq!(format_elapsed(75.0), "1:15");
        assert_eq!(format_elapsed(522.0), "8:42");
    }

    #[test]
    fn test_completion_summary_totals() {
        let routes = vec![route(2000, 100.0), route(1500, 0.0)];
        let summary = completion_summary(&routes, 522.0);
        assert_eq!(summary.people_evacuated, 3500);
        assert_eq!(summary.success_rate, 100);
        assert_eq!(summary.elapsed_label, "8:42");
    }
}
