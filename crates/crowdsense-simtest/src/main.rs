//! CrowdSense Headless Validation Harness
//!
//! Validates the engine and its rules without any UI. Runs entirely
//! in-process — no rendering, no timers, no external input.
//!
//! Usage:
//!   cargo run -p crowdsense-simtest
//!   cargo run -p crowdsense-simtest -- --verbose

use crowdsense_core::prelude::*;
use crowdsense_logic::evacuation::EvacuationPhase;
use crowdsense_logic::incident::{IncidentKind, Severity};
use crowdsense_logic::wristband::signal_bounds;
use crowdsense_logic::zone::{classify_occupancy, StatusTier};
use serde::Deserialize;

// ── Venue manifest (same JSON the engine bundles) ───────────────────────
const MANIFEST_JSON: &str = include_str!("../../../data/venue_manifest.json");

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ZoneSpec {
    name: String,
    capacity: u32,
    occupancy: u32,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RouteSpec {
    name: String,
    capacity: u32,
    estimated_time: String,
    zones: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VenueSpec {
    venue: String,
    zones: Vec<ZoneSpec>,
    routes: Vec<RouteSpec>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== CrowdSense Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Venue manifest validation
    results.extend(validate_manifest(verbose));

    // 2. Zone tier classification sweep
    results.extend(validate_zone_tiers(verbose));

    // 3. Aggregation invariants under seeded drift
    results.extend(validate_aggregation(verbose));

    // 4. Incident lifecycle
    results.extend(validate_incidents(verbose));

    // 5. Evacuation run to completion
    results.extend(validate_evacuation(verbose));

    // 6. Scheduler cancellation semantics
    results.extend(validate_scheduler(verbose));

    // 7. Wristband drift bounds
    results.extend(validate_wristbands(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

// ── 1. Venue Manifest ───────────────────────────────────────────────────

fn validate_manifest(_verbose: bool) -> Vec<TestResult> {
    println!("--- Venue Manifest ---");
    let mut results = Vec::new();

    let manifest: VenueSpec = match serde_json::from_str(MANIFEST_JSON) {
        Ok(m) => m,
        Err(e) => {
            results.push(check("manifest_parse", false, format!("JSON parse error: {}", e)));
            return results;
        }
    };

    results.push(check(
        "manifest_venue_named",
        !manifest.venue.is_empty(),
        format!("venue '{}'", manifest.venue),
    ));

    results.push(check(
        "manifest_zones",
        manifest.zones.len() >= 6,
        format!("{} zones loaded", manifest.zones.len()),
    ));

    let bad_cap = manifest.zones.iter().filter(|z| z.capacity == 0).count();
    results.push(check(
        "manifest_positive_capacity",
        bad_cap == 0,
        if bad_cap == 0 {
            "all zones have positive capacity".into()
        } else {
            format!("{} zones with zero capacity", bad_cap)
        },
    ));

    // The engine-side parser must accept the same document.
    results.push(check(
        "manifest_engine_accepts",
        crowdsense_core::manifest::parse_manifest(MANIFEST_JSON).is_ok(),
        "core parser validates the bundled manifest".into(),
    ));

    results.push(check(
        "manifest_routes",
        manifest.routes.len() >= 3,
        format!("{} evacuation routes loaded", manifest.routes.len()),
    ));

    let over = manifest
        .zones
        .iter()
        .filter(|z| z.occupancy > z.capacity)
        .count();
    results.push(check(
        "manifest_occupancy_within_capacity",
        over == 0,
        if over == 0 {
            "all zones start within capacity".into()
        } else {
            format!("{} zones start over capacity", over)
        },
    ));

    // Every route must serve at least one named zone.
    let empty_routes = manifest.routes.iter().filter(|r| r.zones.is_empty()).count();
    results.push(check(
        "manifest_routes_serve_zones",
        empty_routes == 0,
        format!("{} routes with no served zones", empty_routes),
    ));

    results
}

// ── 2. Zone Tiers ───────────────────────────────────────────────────────

fn validate_zone_tiers(verbose: bool) -> Vec<TestResult> {
    println!("--- Zone Tier Classification ---");
    let mut results = Vec::new();

    // Sweep every occupancy of a 1000-capacity zone and verify the tier
    // matches the threshold rule exactly.
    let mut mismatches = 0;
    for occupancy in 0..=1000u32 {
        let tier = classify_occupancy(occupancy, 1000);
        let expected = if occupancy >= 900 {
            StatusTier::Danger
        } else if occupancy >= 700 {
            StatusTier::Warning
        } else {
            StatusTier::Safe
        };
        if tier != expected {
            mismatches += 1;
            if verbose {
                println!("  mismatch at {}: {:?} != {:?}", occupancy, tier, expected);
            }
        }
    }
    results.push(check(
        "tier_sweep",
        mismatches == 0,
        format!("{} mismatches over 1001 occupancies", mismatches),
    ));

    // Boundary points are inclusive on the upper side.
    results.push(check(
        "tier_boundaries",
        classify_occupancy(700, 1000) == StatusTier::Warning
            && classify_occupancy(900, 1000) == StatusTier::Danger,
        "700/1000 -> warning, 900/1000 -> danger".into(),
    ));

    results
}

// ── 3. Aggregation ──────────────────────────────────────────────────────

fn validate_aggregation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Aggregation Invariants ---");
    let mut results = Vec::new();

    let manifest = crowdsense_core::manifest::parse_manifest(MANIFEST_JSON).expect("manifest");
    let mut engine = CrowdEngine::with_seed(manifest, 1234);

    let mut partition_ok = true;
    let mut totals_ok = true;
    let mut bounds_ok = true;
    for _ in 0..200 {
        engine.update(3.0);
        let zones = engine.zones();
        let stats = engine.stats();
        partition_ok &=
            stats.safe_count + stats.warning_count + stats.danger_count == zones.len();
        totals_ok &= stats.total_occupancy <= stats.total_capacity;
        bounds_ok &= zones.iter().all(|z| z.occupancy <= z.capacity);
    }

    results.push(check(
        "aggregation_partition",
        partition_ok,
        "tier counts partition the zone count on every tick".into(),
    ));
    results.push(check(
        "aggregation_totals",
        totals_ok,
        "total occupancy never exceeds total capacity".into(),
    ));
    results.push(check(
        "occupancy_bounds",
        bounds_ok,
        "every zone stays within [0, capacity]".into(),
    ));

    results
}

// ── 4. Incidents ────────────────────────────────────────────────────────

fn validate_incidents(_verbose: bool) -> Vec<TestResult> {
    println!("--- Incident Lifecycle ---");
    let mut results = Vec::new();

    let manifest = crowdsense_core::manifest::parse_manifest(MANIFEST_JSON).expect("manifest");
    let mut engine = CrowdEngine::with_seed(manifest, 5678);

    let baseline_high = engine
        .incidents()
        .iter()
        .filter(|i| !i.resolved && i.severity == Severity::High)
        .count();

    let id = engine.report_incident(NewIncident {
        kind: IncidentKind::Fire,
        severity: Severity::High,
        title: "Pyro malfunction".into(),
        description: "Stage-left pyrotechnics misfired".into(),
        zone: Some("Main Stage".into()),
    });

    let after_report = engine
        .incidents()
        .iter()
        .filter(|i| !i.resolved && i.severity == Severity::High)
        .count();
    results.push(check(
        "incident_report_counts",
        after_report == baseline_high + 1,
        format!("{} unresolved high after report", after_report),
    ));

    results.push(check(
        "incident_critical_banner",
        engine.critical_alert(),
        "critical alert raised while high incident open".into(),
    ));

    engine.resolve_incident(id);
    engine.resolve_incident(id); // idempotent
    engine.resolve_incident(424242); // unknown id absorbed

    let after_resolve = engine
        .incidents()
        .iter()
        .filter(|i| !i.resolved && i.severity == Severity::High)
        .count();
    results.push(check(
        "incident_resolve_counts",
        after_resolve == baseline_high,
        format!("{} unresolved high after resolve", after_resolve),
    ));

    let still_listed = engine.incidents().iter().any(|i| i.id == id && i.resolved);
    results.push(check(
        "incident_audit_trail",
        still_listed,
        "resolved incident remains listed".into(),
    ));

    results
}

// ── 5. Evacuation ───────────────────────────────────────────────────────

fn validate_evacuation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Evacuation Run ---");
    let mut results = Vec::new();

    let manifest = crowdsense_core::manifest::parse_manifest(MANIFEST_JSON).expect("manifest");
    let mut engine = CrowdEngine::with_seed(manifest, 31337);

    engine.open_evacuation();
    let staged = engine.evacuation();
    results.push(check(
        "evacuation_planning",
        staged
            .as_ref()
            .map(|s| s.phase == EvacuationPhase::Planning && s.progress == 0.0)
            .unwrap_or(false),
        "session staged in planning with zero progress".into(),
    ));

    engine.start_evacuation();
    let mut monotonic = true;
    let mut last = 0.0;
    let mut ticks = 0;
    while engine
        .evacuation()
        .map(|s| s.phase == EvacuationPhase::Active)
        .unwrap_or(false)
    {
        engine.update(1.0);
        ticks += 1;
        if let Some(session) = engine.evacuation() {
            monotonic &= session.progress >= last;
            last = session.progress;
        }
        if ticks > 10_000 {
            break;
        }
    }

    let session = engine.evacuation();
    results.push(check(
        "evacuation_completes",
        session
            .as_ref()
            .map(|s| s.phase == EvacuationPhase::Completed && s.progress == 100.0)
            .unwrap_or(false),
        format!("completed after {} ticks", ticks),
    ));
    results.push(check(
        "evacuation_monotonic",
        monotonic,
        "progress never decreased".into(),
    ));
    results.push(check(
        "evacuation_summary",
        session
            .as_ref()
            .and_then(|s| s.summary.as_ref())
            .map(|sum| sum.success_rate == 100 && sum.people_evacuated > 0)
            .unwrap_or(false),
        "summary frozen with full success rate".into(),
    ));

    // A second start on the finished session must change nothing.
    engine.start_evacuation();
    let after = engine.evacuation();
    results.push(check(
        "evacuation_restart_absorbed",
        after
            .map(|s| s.phase == EvacuationPhase::Completed)
            .unwrap_or(false),
        "completed session unaffected by start".into(),
    ));

    results
}

// ── 6. Scheduler ────────────────────────────────────────────────────────

fn validate_scheduler(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scheduler Semantics ---");
    let mut results = Vec::new();

    let mut task = PeriodicTask::new(1.0);
    let fired: u32 = (0..10).map(|_| task.advance(0.5)).sum();
    results.push(check(
        "scheduler_cadence",
        fired == 5,
        format!("{} ticks over 5 seconds at 1s interval", fired),
    ));

    // Cancellation must win over ticks already accrued.
    let mut task = PeriodicTask::new(1.0);
    task.advance(0.9);
    task.cancel();
    task.cancel(); // idempotent
    let late = task.advance(100.0);
    results.push(check(
        "scheduler_cancel",
        late == 0 && task.is_cancelled(),
        "no late ticks after cancellation".into(),
    ));

    results
}

// ── 7. Wristbands ───────────────────────────────────────────────────────

fn validate_wristbands(_verbose: bool) -> Vec<TestResult> {
    println!("--- Wristband Tracking ---");
    let mut results = Vec::new();

    let manifest = crowdsense_core::manifest::parse_manifest(MANIFEST_JSON).expect("manifest");
    let mut engine = CrowdEngine::with_seed(manifest, 808);

    let mut bounds_ok = true;
    for _ in 0..200 {
        engine.update(3.0);
        bounds_ok &= engine.wristbands().iter().all(|b| {
            b.signal_strength >= signal_bounds::MIN_SIGNAL
                && b.signal_strength <= signal_bounds::MAX_SIGNAL
        });
    }
    results.push(check(
        "signal_bounds",
        bounds_ok,
        "every band stays within signal bounds".into(),
    ));

    let stats = engine.tracker_stats();
    results.push(check(
        "tracker_stats",
        stats.active + stats.missing <= engine.wristbands().len()
            && stats.average_signal >= signal_bounds::MIN_SIGNAL,
        format!(
            "{} active, {} missing, avg signal {:.0}%",
            stats.active, stats.missing, stats.average_signal
        ),
    ));

    results
}
