//! CrowdSense Core - Live-Event Crowd Safety Engine
//!
//! The stateful engine behind the CrowdSense dashboard: zone occupancy
//! monitoring, event-wide aggregation, incident tracking, wristband signal
//! tracking, and the emergency-evacuation state machine. All "sensor" input
//! is synthesized by bounded random walks behind an injectable perturbation
//! source, so every rule is deterministic under test.
//!
//! # Architecture
//!
//! - **Rules** live in `crowdsense-logic` (pure functions over plain data).
//! - **Owners** live here: each collection (zones, incidents, wristbands,
//!   evacuation routes) has exactly one owning component, and readers get
//!   cloned snapshots.
//! - **Scheduling** is cooperative and single-threaded: [`CrowdEngine::update`]
//!   advances per-feed [`scheduler::PeriodicTask`] clocks and runs due ticks
//!   inline, so ticks never overlap and cancellation is race-free.
//!
//! # Example
//!
//! ```rust,no_run
//! use crowdsense_core::prelude::*;
//!
//! let manifest = VenueManifest::bundled().expect("valid bundled manifest");
//! let mut engine = CrowdEngine::new(manifest);
//!
//! // Run the session
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS frontend driving the engine
//! }
//! ```

pub mod engine;
pub mod evacuation;
pub mod ledger;
pub mod manifest;
pub mod perturbation;
pub mod registry;
pub mod scheduler;
pub mod tracker;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::CrowdEngine;
    pub use crate::evacuation::{EvacuationSession, EvacuationSimulator};
    pub use crate::ledger::{IncidentLedger, NewIncident};
    pub use crate::manifest::{ManifestError, VenueManifest};
    pub use crate::perturbation::{Perturbation, RngPerturbation, ScriptedPerturbation};
    pub use crate::registry::ZoneRegistry;
    pub use crate::scheduler::PeriodicTask;
    pub use crate::tracker::{TrackerStats, WristbandTracker};
}
