//! Injectable randomness for the simulated sensor feeds.
//!
//! Every random draw in the engine flows through the [`Perturbation`] trait:
//! occupancy drift, evacuation flow and progress, congestion rolls, wristband
//! signal drift, and the venue-level attendance walk. Production uses
//! [`RngPerturbation`]; tests and the headless harness can substitute
//! [`ScriptedPerturbation`] to assert exact resulting states.

use crowdsense_logic::evacuation::FlowPolicy;
use crowdsense_logic::wristband::SignalPolicy;
use crowdsense_logic::zone::OccupancyDriftPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of all per-tick perturbations.
pub trait Perturbation {
    /// Zone occupancy delta, drawn from `[-max_step, +max_step]`.
    fn occupancy_delta(&mut self, policy: &OccupancyDriftPolicy) -> i64;

    /// Route flow delta, drawn from `[-ebb, +surge]`.
    fn flow_delta(&mut self, policy: &FlowPolicy) -> f64;

    /// Overall progress increment, drawn from `[0, max_progress_step]`.
    fn progress_step(&mut self, policy: &FlowPolicy) -> f64;

    /// Whether a route becomes congested this tick.
    fn congestion_roll(&mut self, policy: &FlowPolicy) -> bool;

    /// Wristband signal delta, drawn from `[-max_step, +max_step]`.
    fn signal_delta(&mut self, policy: &SignalPolicy) -> f64;

    /// Venue attendance delta, drawn from `[-max_step, +max_step]`.
    fn attendance_delta(&mut self, max_step: i64) -> i64;
}

/// Uniform random draws from a seedable RNG.
pub struct RngPerturbation<R: Rng> {
    rng: R,
}

impl RngPerturbation<StdRng> {
    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Source with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngPerturbation<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Perturbation for RngPerturbation<R> {
    fn occupancy_delta(&mut self, policy: &OccupancyDriftPolicy) -> i64 {
        if policy.max_step == 0 {
            return 0;
        }
        self.rng.gen_range(-policy.max_step..=policy.max_step)
    }

    fn flow_delta(&mut self, policy: &FlowPolicy) -> f64 {
        self.rng.gen_range(-policy.ebb..=policy.surge)
    }

    fn progress_step(&mut self, policy: &FlowPolicy) -> f64 {
        self.rng.gen_range(0.0..policy.max_progress_step)
    }

    fn congestion_roll(&mut self, policy: &FlowPolicy) -> bool {
        self.rng.gen::<f64>() < policy.congestion_chance
    }

    fn signal_delta(&mut self, policy: &SignalPolicy) -> f64 {
        self.rng.gen_range(-policy.max_step..=policy.max_step)
    }

    fn attendance_delta(&mut self, max_step: i64) -> i64 {
        if max_step == 0 {
            return 0;
        }
        self.rng.gen_range(-max_step..=max_step)
    }
}

/// Deterministic perturbation source driven by scripted value queues.
///
/// Each channel pops from its own queue; when a queue is down to its final
/// value, that value repeats forever. Empty queues yield zero (or `false`
/// for congestion rolls). Policies are ignored — scripted values are used
/// verbatim, so tests can drive exact scenarios.
#[derive(Debug, Default)]
pub struct ScriptedPerturbation {
    occupancy_deltas: VecDeque<i64>,
    flow_deltas: VecDeque<f64>,
    progress_steps: VecDeque<f64>,
    congestion_rolls: VecDeque<bool>,
    signal_deltas: VecDeque<f64>,
    attendance_deltas: VecDeque<i64>,
}

/// Pop the next scripted value, holding the last one forever.
fn next<T: Copy + Default>(queue: &mut VecDeque<T>) -> T {
    match queue.len() {
        0 => T::default(),
        1 => queue[0],
        _ => queue.pop_front().unwrap_or_default(),
    }
}

impl ScriptedPerturbation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupancy(mut self, deltas: impl IntoIterator<Item = i64>) -> Self {
        self.occupancy_deltas.extend(deltas);
        self
    }

    pub fn flow(mut self, deltas: impl IntoIterator<Item = f64>) -> Self {
        self.flow_deltas.extend(deltas);
        self
    }

    pub fn progress(mut self, steps: impl IntoIterator<Item = f64>) -> Self {
        self.progress_steps.extend(steps);
        self
    }

    pub fn congestion(mut self, rolls: impl IntoIterator<Item = bool>) -> Self {
        self.congestion_rolls.extend(rolls);
        self
    }

    pub fn signal(mut self, deltas: impl IntoIterator<Item = f64>) -> Self {
        self.signal_deltas.extend(deltas);
        self
    }

    pub fn attendance(mut self, deltas: impl IntoIterator<Item = i64>) -> Self {
        self.attendance_deltas.extend(deltas);
        self
    }
}

impl Perturbation for ScriptedPerturbation {
    fn occupancy_delta(&mut self, _policy: &OccupancyDriftPolicy) -> i64 {
        next(&mut self.occupancy_deltas)
    }

    fn flow_delta(&mut self, _policy: &FlowPolicy) -> f64 {
        next(&mut self.flow_deltas)
    }

    fn progress_step(&mut self, _policy: &FlowPolicy) -> f64 {
        next(&mut self.progress_steps)
    }

    fn congestion_roll(&mut self, _policy: &FlowPolicy) -> bool {
        next(&mut self.congestion_rolls)
    }

    fn signal_delta(&mut self, _policy: &SignalPolicy) -> f64 {
        next(&mut self.signal_deltas)
    }

    fn attendance_delta(&mut self, _max_step: i64) -> i64 {
        next(&mut self.attendance_deltas)
    }
}
