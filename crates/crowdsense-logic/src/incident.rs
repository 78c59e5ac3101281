//! Incident data and lifecycle rules.
//!
//! Incidents arrive as discrete operator or sensor reports and stay in the
//! ledger for the whole session; resolution is a one-way flag flip, never a
//! deletion. The zone reference is a loose descriptive label rather than a
//! validated key — incidents may reference areas outside the monitored set.

use serde::{Deserialize, Serialize};

/// Category of a reported safety incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentKind {
    /// Attendee unaccounted for.
    Missing,
    /// Fire or thermal hazard.
    Fire,
    /// Physical altercation.
    Fight,
    /// Localized overcrowding.
    Overcrowd,
    /// Medical emergency.
    Medical,
}

impl IncidentKind {
    /// Recommended dispatch action for this kind of incident.
    pub fn response_action(&self) -> &'static str {
        match self {
            IncidentKind::Missing => "Locate Person",
            IncidentKind::Fire => "Deploy Response",
            IncidentKind::Fight => "Send Security",
            IncidentKind::Overcrowd => "Redistribute",
            IncidentKind::Medical => "Send Medics",
        }
    }
}

/// How urgent an incident is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Numeric rank for ordering (higher = more urgent).
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
        }
    }
}

/// A tracked safety incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: u64,
    pub kind: IncidentKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Descriptive zone label; not validated against the zone registry.
    pub zone: Option<String>,
    /// Simulation time (seconds) the report arrived.
    pub reported_at: f64,
    /// One-way flag: transitions false -> true exactly once, never back.
    pub resolved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_rank_ordering() {
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn test_response_action_per_kind() {
        assert_eq!(IncidentKind::Fire.response_action(), "Deploy Response");
        assert_eq!(IncidentKind::Fight.response_action(), "Send Security");
        assert_eq!(IncidentKind::Missing.response_action(), "Locate Person");
        assert_eq!(IncidentKind::Overcrowd.response_action(), "Redistribute");
        assert_eq!(IncidentKind::Medical.response_action(), "Send Medics");
    }
}
