//! Incident ledger — exclusive owner of the session's incidents.
//!
//! New incidents prepend (most-recent-first for display); nothing else
//! reorders. Resolution is idempotent and tolerant: resolving an unknown or
//! already-resolved id must never disturb the monitoring loop, so both are
//! silent no-ops. Resolved incidents stay in the ledger for the session.

use crate::manifest::IncidentSpec;
use crowdsense_logic::incident::{Incident, IncidentKind, Severity};

/// A new incident report, before the ledger assigns it an id.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub kind: IncidentKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Loose zone label; not validated against the registry.
    pub zone: Option<String>,
}

pub struct IncidentLedger {
    incidents: Vec<Incident>,
    next_id: u64,
}

impl IncidentLedger {
    pub fn new() -> Self {
        Self {
            incidents: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the ledger with incidents already open at session start.
    pub fn from_specs(specs: &[IncidentSpec], now: f64) -> Self {
        let mut ledger = Self::new();
        for spec in specs {
            ledger.report(
                NewIncident {
                    kind: spec.kind,
                    severity: spec.severity,
                    title: spec.title.clone(),
                    description: spec.description.clone(),
                    zone: spec.zone.clone(),
                },
                now,
            );
        }
        ledger
    }

    /// Record a new unresolved incident, most-recent-first. Returns its id.
    pub fn report(&mut self, report: NewIncident, now: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        log::info!(
            "incident #{} reported: {:?}/{:?} '{}'",
            id,
            report.kind,
            report.severity,
            report.title
        );
        self.incidents.insert(
            0,
            Incident {
                id,
                kind: report.kind,
                severity: report.severity,
                title: report.title,
                description: report.description,
                zone: report.zone,
                reported_at: now,
                resolved: false,
            },
        );
        id
    }

    /// Mark an incident resolved. Unknown ids and repeat calls are no-ops.
    pub fn resolve(&mut self, id: u64) {
        if let Some(incident) = self.incidents.iter_mut().find(|i| i.id == id) {
            if !incident.resolved {
                incident.resolved = true;
                log::info!("incident #{} resolved", id);
            }
        }
    }

    /// All incidents, most recent first, resolved ones included.
    pub fn list(&self) -> &[Incident] {
        &self.incidents
    }

    /// Unresolved incidents at the given severity.
    pub fn count_unresolved_by_severity(&self, severity: Severity) -> usize {
        self.incidents
            .iter()
            .filter(|i| !i.resolved && i.severity == severity)
            .count()
    }

    /// All unresolved incidents.
    pub fn unresolved_count(&self) -> usize {
        self.incidents.iter().filter(|i| !i.resolved).count()
    }

    /// Most urgent severity among unresolved incidents, if any are open.
    pub fn highest_unresolved_severity(&self) -> Option<Severity> {
        self.incidents
            .iter()
            .filter(|i| !i.resolved)
            .map(|i| i.severity)
            .max_by_key(|s| s.rank())
    }

    /// Whether any unresolved high-severity incident is open. Drives the
    /// critical-alert banner and the evacuation prompt.
    pub fn has_critical(&self) -> bool {
        self.highest_unresolved_severity() == Some(Severity::High)
    }
}

impl Default for IncidentLedger {
    fn default() -> Self {
        Self::new()
    }
}
