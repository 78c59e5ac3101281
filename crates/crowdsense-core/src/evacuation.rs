//! Evacuation simulator — the three-phase session state machine.
//!
//! `Planning -> Active -> Completed`, forward-only. Invalid transitions are
//! absorbed as no-ops: starting outside Planning, ticking outside Active,
//! and cancelling a completed or absent session all leave state untouched.
//! Cancel tears the session object down rather than adding a phase value.
//! A completed session stays readable until the next `open`, which replaces
//! it with a fresh Planning session.

use crate::manifest::RouteSpec;
use crate::perturbation::Perturbation;
use crowdsense_logic::evacuation::{
    apply_flow_delta, completion_summary, EvacuationPhase, EvacuationRoute, EvacuationSummary,
    FlowPolicy, RouteStatus,
};
use serde::{Deserialize, Serialize};

/// One end-to-end evacuation run, from planning to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvacuationSession {
    pub phase: EvacuationPhase,
    /// Overall completion percent, in `[0, 100]`, non-decreasing while
    /// the session is active.
    pub progress: f64,
    pub routes: Vec<EvacuationRoute>,
    /// Wall time spent in the active phase, seconds.
    pub active_seconds: f64,
    /// Frozen at the Active -> Completed transition, never re-derived.
    pub summary: Option<EvacuationSummary>,
}

pub struct EvacuationSimulator {
    session: Option<EvacuationSession>,
    policy: FlowPolicy,
}

impl EvacuationSimulator {
    pub fn new(policy: FlowPolicy) -> Self {
        Self {
            session: None,
            policy,
        }
    }

    /// Stage a fresh Planning session from the route catalog: flows zeroed,
    /// all routes clear, progress zero. No-op while a session is staged or
    /// running; a completed session is replaced so another evacuation can be
    /// staged after the first finishes.
    pub fn open(&mut self, catalog: &[RouteSpec]) {
        match self.session.as_ref().map(|s| s.phase) {
            Some(EvacuationPhase::Planning) | Some(EvacuationPhase::Active) => return,
            _ => {}
        }
        let routes = catalog
            .iter()
            .enumerate()
            .map(|(i, spec)| EvacuationRoute {
                id: i as u32 + 1,
                name: spec.name.clone(),
                capacity: spec.capacity,
                current_flow: 0.0,
                estimated_time: spec.estimated_time.clone(),
                status: RouteStatus::Clear,
                zones: spec.zones.clone(),
            })
            .collect();
        self.session = Some(EvacuationSession {
            phase: EvacuationPhase::Planning,
            progress: 0.0,
            routes,
            active_seconds: 0.0,
            summary: None,
        });
        log::info!("evacuation session staged in planning phase");
    }

    /// Confirm the evacuation: Planning -> Active. No-op from any other
    /// phase (guards against double-start) or with no session open.
    pub fn start(&mut self) {
        if let Some(session) = &mut self.session {
            if session.phase == EvacuationPhase::Planning {
                session.phase = EvacuationPhase::Active;
                log::info!("evacuation started");
            }
        }
    }

    /// Advance the active session by one tick of `dt` seconds.
    ///
    /// Progress gains a bounded step (clamped at 100), each route's flow
    /// walks within `[0, capacity]`, and each route independently re-rolls
    /// congestion. Reaching 100% completes the session and freezes the
    /// summary; further ticks are no-ops even if the driver keeps firing.
    pub fn tick(&mut self, source: &mut dyn Perturbation, dt: f64) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.phase != EvacuationPhase::Active {
            return;
        }

        session.active_seconds += dt;
        session.progress = (session.progress + source.progress_step(&self.policy)).min(100.0);

        for route in &mut session.routes {
            apply_flow_delta(route, source.flow_delta(&self.policy));
            route.status = if source.congestion_roll(&self.policy) {
                RouteStatus::Congested
            } else {
                RouteStatus::Clear
            };
        }

        if session.progress >= 100.0 {
            session.phase = EvacuationPhase::Completed;
            session.summary = Some(completion_summary(&session.routes, session.active_seconds));
            log::info!(
                "evacuation completed in {}",
                session.summary.as_ref().map(|s| s.elapsed_label.as_str()).unwrap_or("?")
            );
        }
    }

    /// Discard the session from Planning or Active. A completed session is
    /// kept (its summary stays readable); no session is a no-op.
    pub fn cancel(&mut self) {
        match self.session.as_ref().map(|s| s.phase) {
            Some(EvacuationPhase::Planning) | Some(EvacuationPhase::Active) => {
                self.session = None;
                log::info!("evacuation cancelled");
            }
            _ => {}
        }
    }

    /// Immutable copy of the current session, if one exists.
    pub fn snapshot(&self) -> Option<EvacuationSession> {
        self.session.clone()
    }

    pub fn phase(&self) -> Option<EvacuationPhase> {
        self.session.as_ref().map(|s| s.phase)
    }

    pub fn is_active(&self) -> bool {
        self.phase() == Some(EvacuationPhase::Active)
    }

    /// Aggregate people-per-minute figure across all routes.
    pub fn total_current_flow(&self) -> f64 {
        self.session
            .as_ref()
            .map(|s| s.routes.iter().map(|r| r.current_flow).sum())
            .unwrap_or(0.0)
    }
}
