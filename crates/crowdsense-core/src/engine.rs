//! Crowd engine - main entry point for running the monitoring session.
//!
//! Owns every stateful component and drives them from a single cooperative
//! `update` call. Each simulated feed runs on its own cadence via an owned
//! [`PeriodicTask`]; the cadences are independent and no ordering between
//! feeds is guaranteed. All operator actions are explicit calls, and invalid
//! ones are absorbed as no-ops per the engine-wide policy.

use crate::evacuation::{EvacuationSession, EvacuationSimulator};
use crate::ledger::{IncidentLedger, NewIncident};
use crate::manifest::VenueManifest;
use crate::perturbation::{Perturbation, RngPerturbation};
use crate::registry::ZoneRegistry;
use crate::scheduler::PeriodicTask;
use crate::tracker::{TrackerStats, WristbandTracker};
use crowdsense_logic::evacuation::{EvacuationPhase, FlowPolicy};
use crowdsense_logic::stats::AggregateStats;
use crowdsense_logic::wristband::{SignalPolicy, Wristband};
use crowdsense_logic::zone::{OccupancyDriftPolicy, Zone};

/// Zone occupancy feed cadence, seconds.
const ZONE_INTERVAL: f64 = 3.0;
/// Wristband signal feed cadence, seconds.
const WRISTBAND_INTERVAL: f64 = 3.0;
/// Venue attendance feed cadence, seconds.
const ATTENDANCE_INTERVAL: f64 = 5.0;
/// Evacuation tick cadence while a session is active, seconds.
const EVACUATION_INTERVAL: f64 = 1.0;
/// Bound for the venue attendance random walk per tick.
const ATTENDANCE_MAX_STEP: i64 = 100;

/// Main monitoring engine for one venue session.
pub struct CrowdEngine {
    venue: String,
    zones: ZoneRegistry,
    ledger: IncidentLedger,
    tracker: WristbandTracker,
    evacuation: EvacuationSimulator,
    route_catalog: VenueManifest,

    /// Venue-gate headcount, clamped into `[0, total zone capacity]`.
    attendance: u64,
    attendance_capacity: u64,

    source: Box<dyn Perturbation>,
    sim_time: f64,

    zone_task: PeriodicTask,
    wristband_task: PeriodicTask,
    attendance_task: PeriodicTask,
    evacuation_task: Option<PeriodicTask>,
}

impl CrowdEngine {
    /// Engine with an entropy-seeded perturbation source.
    pub fn new(manifest: VenueManifest) -> Self {
        Self::with_perturbation(manifest, Box::new(RngPerturbation::from_entropy()))
    }

    /// Engine with a fixed seed, for reproducible runs.
    pub fn with_seed(manifest: VenueManifest, seed: u64) -> Self {
        Self::with_perturbation(manifest, Box::new(RngPerturbation::seeded(seed)))
    }

    /// Engine with a caller-supplied perturbation source.
    pub fn with_perturbation(manifest: VenueManifest, source: Box<dyn Perturbation>) -> Self {
        let zones = ZoneRegistry::from_specs(&manifest.zones, OccupancyDriftPolicy::default());
        let ledger = IncidentLedger::from_specs(&manifest.incidents, 0.0);
        let tracker = WristbandTracker::from_specs(&manifest.wristbands, SignalPolicy::default());
        let stats = zones.stats();
        Self {
            venue: manifest.venue.clone(),
            zones,
            ledger,
            tracker,
            evacuation: EvacuationSimulator::new(FlowPolicy::default()),
            attendance: stats.total_occupancy,
            attendance_capacity: stats.total_capacity,
            route_catalog: manifest,
            source,
            sim_time: 0.0,
            zone_task: PeriodicTask::new(ZONE_INTERVAL),
            wristband_task: PeriodicTask::new(WRISTBAND_INTERVAL),
            attendance_task: PeriodicTask::new(ATTENDANCE_INTERVAL),
            evacuation_task: None,
        }
    }

    /// Advance the session by `dt` seconds, firing every feed that fell due.
    pub fn update(&mut self, dt: f64) {
        self.sim_time += dt.max(0.0);

        for _ in 0..self.zone_task.advance(dt) {
            self.zones.tick(self.source.as_mut(), self.sim_time);
        }

        for _ in 0..self.wristband_task.advance(dt) {
            self.tracker.tick(self.source.as_mut(), self.sim_time);
        }

        for _ in 0..self.attendance_task.advance(dt) {
            let delta = self.source.attendance_delta(ATTENDANCE_MAX_STEP);
            self.attendance = (self.attendance as i64 + delta)
                .clamp(0, self.attendance_capacity as i64) as u64;
        }

        if let Some(task) = &mut self.evacuation_task {
            for _ in 0..task.advance(dt) {
                self.evacuation.tick(self.source.as_mut(), EVACUATION_INTERVAL);
            }
            // Timer is a scoped resource: release it the moment the session
            // reaches its terminal phase.
            if self.evacuation.phase() == Some(EvacuationPhase::Completed) {
                task.cancel();
                self.evacuation_task = None;
            }
        }
    }

    // ── Operator actions ────────────────────────────────────────────────

    /// Record a new incident; returns its ledger id.
    pub fn report_incident(&mut self, report: NewIncident) -> u64 {
        self.ledger.report(report, self.sim_time)
    }

    /// Resolve an incident. Unknown ids and repeats are no-ops.
    pub fn resolve_incident(&mut self, id: u64) {
        self.ledger.resolve(id);
    }

    /// Stage an evacuation session in the planning phase. No-op if one is
    /// already open.
    pub fn open_evacuation(&mut self) {
        self.evacuation.open(&self.route_catalog.routes);
    }

    /// Confirm a staged evacuation and begin ticking it.
    pub fn start_evacuation(&mut self) {
        if self.evacuation.phase() == Some(EvacuationPhase::Planning) {
            self.evacuation.start();
            self.evacuation_task = Some(PeriodicTask::new(EVACUATION_INTERVAL));
        }
    }

    /// Discard a planning or active evacuation and release its timer.
    pub fn cancel_evacuation(&mut self) {
        self.evacuation.cancel();
        if let Some(mut task) = self.evacuation_task.take() {
            task.cancel();
        }
    }

    /// Flag a wristband's holder as unaccounted for. Unknown ids are no-ops.
    pub fn mark_band_missing(&mut self, band_id: &str) {
        self.tracker.mark_missing(band_id);
    }

    /// Flag a wristband's holder for emergency response.
    pub fn mark_band_emergency(&mut self, band_id: &str) {
        self.tracker.mark_emergency(band_id);
    }

    /// Return a wristband to normal tracking.
    pub fn mark_band_active(&mut self, band_id: &str) {
        self.tracker.mark_active(band_id);
    }

    // ── Read API ────────────────────────────────────────────────────────

    pub fn venue(&self) -> &str {
        &self.venue
    }

    /// Immutable zone snapshot, in configuration order.
    pub fn zones(&self) -> Vec<Zone> {
        self.zones.snapshot()
    }

    /// Event-wide totals recomputed from the current zone state.
    pub fn stats(&self) -> AggregateStats {
        self.zones.stats()
    }

    /// All incidents, most recent first.
    pub fn incidents(&self) -> Vec<crowdsense_logic::incident::Incident> {
        self.ledger.list().to_vec()
    }

    pub fn wristbands(&self) -> Vec<Wristband> {
        self.tracker.snapshot()
    }

    pub fn tracker_stats(&self) -> TrackerStats {
        self.tracker.stats()
    }

    pub fn evacuation(&self) -> Option<EvacuationSession> {
        self.evacuation.snapshot()
    }

    pub fn total_evacuation_flow(&self) -> f64 {
        self.evacuation.total_current_flow()
    }

    /// Live venue headcount from the gate feed.
    pub fn attendance(&self) -> u64 {
        self.attendance
    }

    /// Whether any unresolved high-severity incident is open. Drives the
    /// critical banner and the evacuation prompt.
    pub fn critical_alert(&self) -> bool {
        self.ledger.has_critical()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perturbation::ScriptedPerturbation;
    use crowdsense_logic::incident::{IncidentKind, Severity};

    fn engine_with(source: ScriptedPerturbation) -> CrowdEngine {
        let manifest = VenueManifest::bundled().expect("bundled manifest");
        CrowdEngine::with_perturbation(manifest, Box::new(source))
    }

    #[test]
    fn test_engine_seeds_from_manifest() {
        let engine = engine_with(ScriptedPerturbation::new());
        assert_eq!(engine.venue(), "Riverside Amphitheater");
        assert_eq!(engine.zones().len(), 8);
        assert_eq!(engine.wristbands().len(), 4);
        // The bundled manifest opens with a high-severity fire.
        assert!(engine.critical_alert());
    }

    #[test]
    fn test_zone_feed_fires_on_its_cadence() {
        let mut engine = engine_with(ScriptedPerturbation::new().occupancy([10]));
        let before = engine.zones()[0].occupancy;

        engine.update(2.9);
        assert_eq!(engine.zones()[0].occupancy, before, "no tick before 3s");

        engine.update(0.1);
        assert_eq!(engine.zones()[0].occupancy, before + 10);
    }

    #[test]
    fn test_attendance_clamps_to_venue_capacity() {
        let mut engine = engine_with(ScriptedPerturbation::new().attendance([i64::MAX / 4]));
        engine.update(5.0);
        assert_eq!(engine.attendance(), engine.stats().total_capacity);
    }

    #[test]
    fn test_incident_lifecycle_through_engine() {
        let mut engine = engine_with(ScriptedPerturbation::new());
        let open_high = engine
            .incidents()
            .iter()
            .filter(|i| !i.resolved && i.severity == Severity::High)
            .count();

        let id = engine.report_incident(NewIncident {
            kind: IncidentKind::Fight,
            severity: Severity::High,
            title: "Altercation".into(),
            description: "Scuffle near the rail".into(),
            zone: Some("Main Stage".into()),
        });
        assert_eq!(engine.incidents()[0].id, id, "newest incident listed first");

        engine.resolve_incident(id);
        let still_high = engine
            .incidents()
            .iter()
            .filter(|i| !i.resolved && i.severity == Severity::High)
            .count();
        assert_eq!(still_high, open_high);
    }

    #[test]
    fn test_evacuation_runs_to_completion_and_releases_timer() {
        let mut engine = engine_with(ScriptedPerturbation::new().progress([5.0]));
        engine.open_evacuation();
        engine.start_evacuation();
        assert!(engine.evacuation_task.is_some());

        // 20 one-second ticks at +5 progress each.
        engine.update(20.0);
        let session = engine.evacuation().expect("session exists");
        assert_eq!(session.phase, EvacuationPhase::Completed);
        assert_eq!(session.progress, 100.0);
        assert!(engine.evacuation_task.is_none(), "timer released on completion");
    }

    #[test]
    fn test_cancel_evacuation_releases_timer() {
        let mut engine = engine_with(ScriptedPerturbation::new().progress([5.0]));
        engine.open_evacuation();
        engine.start_evacuation();
        engine.cancel_evacuation();
        assert!(engine.evacuation().is_none());
        assert!(engine.evacuation_task.is_none());

        // Further updates must not touch the torn-down session.
        engine.update(10.0);
        assert!(engine.evacuation().is_none());
    }

    #[test]
    fn test_second_evacuation_can_be_staged_after_completion() {
        let mut engine = engine_with(ScriptedPerturbation::new().progress([100.0]));
        engine.open_evacuation();
        engine.start_evacuation();
        engine.update(1.0);
        assert_eq!(
            engine.evacuation().map(|s| s.phase),
            Some(EvacuationPhase::Completed)
        );

        engine.cancel_evacuation();
        engine.open_evacuation();
        let session = engine.evacuation().expect("second session staged");
        assert_eq!(session.phase, EvacuationPhase::Planning);
        assert_eq!(session.progress, 0.0);
    }

    #[test]
    fn test_start_without_open_is_a_noop() {
        let mut engine = engine_with(ScriptedPerturbation::new());
        engine.start_evacuation();
        assert!(engine.evacuation().is_none());
        assert!(engine.evacuation_task.is_none());
    }

    #[test]
    fn test_band_marks_forward_to_tracker() {
        let mut engine = engine_with(ScriptedPerturbation::new());
        let before = engine.tracker_stats();

        // The bundled manifest ships A1234 as missing.
        engine.mark_band_active("A1234");
        assert_eq!(engine.tracker_stats().missing, before.missing - 1);

        engine.mark_band_emergency("B5678");
        assert_eq!(engine.tracker_stats().active, before.active);

        engine.mark_band_missing("Z9999"); // unknown id
        assert_eq!(engine.tracker_stats().missing, before.missing - 1);
    }

    #[test]
    fn test_stats_follow_zone_feed() {
        let mut engine = engine_with(ScriptedPerturbation::new());
        let stats = engine.stats();
        assert_eq!(
            stats.safe_count + stats.warning_count + stats.danger_count,
            engine.zones().len()
        );
        engine.update(3.0);
        let stats = engine.stats();
        assert_eq!(
            stats.safe_count + stats.warning_count + stats.danger_count,
            engine.zones().len()
        );
        assert!(stats.total_occupancy <= stats.total_capacity);
    }
}
