//! Wristband tracker — exclusive owner of the registered band set.
//!
//! Signal strength drifts within bounds every tick; tracking status only
//! changes through explicit marks (operator or sensor events). Unknown band
//! ids on a mark are silently ignored, matching the ledger's absorption
//! policy.

use crate::manifest::WristbandSpec;
use crate::perturbation::Perturbation;
use crowdsense_logic::wristband::{
    active_count, apply_signal_delta, average_signal, missing_count, SignalPolicy, SignalStatus,
    Wristband,
};
use serde::{Deserialize, Serialize};

/// Headline figures for the tracking panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerStats {
    pub active: usize,
    pub missing: usize,
    pub average_signal: f64,
}

pub struct WristbandTracker {
    bands: Vec<Wristband>,
    policy: SignalPolicy,
}

impl WristbandTracker {
    pub fn from_specs(specs: &[WristbandSpec], policy: SignalPolicy) -> Self {
        let bands = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Wristband {
                id: i as u32 + 1,
                holder: spec.holder.clone(),
                band_id: spec.band_id.clone(),
                kind: spec.kind,
                zone: spec.zone.clone(),
                signal_strength: spec.signal_strength,
                last_seen: 0.0,
                status: spec.status,
            })
            .collect();
        Self { bands, policy }
    }

    /// Drift every band's signal within bounds. Active bands refresh their
    /// last-seen stamp; missing and emergency bands keep the stale one.
    pub fn tick(&mut self, source: &mut dyn Perturbation, now: f64) {
        for band in &mut self.bands {
            let delta = source.signal_delta(&self.policy);
            apply_signal_delta(band, delta);
            if band.status == SignalStatus::Active {
                band.last_seen = now;
            }
        }
    }

    /// Immutable copy of all bands.
    pub fn snapshot(&self) -> Vec<Wristband> {
        self.bands.clone()
    }

    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            active: active_count(&self.bands),
            missing: missing_count(&self.bands),
            average_signal: average_signal(&self.bands),
        }
    }

    /// Flag a band's holder as unaccounted for. Unknown ids are ignored.
    pub fn mark_missing(&mut self, band_id: &str) {
        self.set_status(band_id, SignalStatus::Missing);
    }

    /// Flag a band's holder for emergency response. Unknown ids are ignored.
    pub fn mark_emergency(&mut self, band_id: &str) {
        self.set_status(band_id, SignalStatus::Emergency);
    }

    /// Return a band to normal tracking. Unknown ids are ignored.
    pub fn mark_active(&mut self, band_id: &str) {
        self.set_status(band_id, SignalStatus::Active);
    }

    fn set_status(&mut self, band_id: &str, status: SignalStatus) {
        if let Some(band) = self.bands.iter_mut().find(|b| b.band_id == band_id) {
            if band.status != status {
                log::info!("wristband {} marked {:?}", band.band_id, status);
                band.status = status;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}
