//! Zone registry — exclusive owner of the monitored zone set.
//!
//! Zones are created once from the venue manifest, kept in configuration
//! order, and mutated only by the tick rule. Readers get cloned snapshots,
//! never mutable access.

use crate::manifest::ZoneSpec;
use crate::perturbation::Perturbation;
use crowdsense_logic::stats::{self, AggregateStats};
use crowdsense_logic::zone::{
    classify_occupancy, drift_zone, OccupancyDriftPolicy, StatusTier, Zone,
};

pub struct ZoneRegistry {
    zones: Vec<Zone>,
    policy: OccupancyDriftPolicy,
}

impl ZoneRegistry {
    /// Build the registry from the manifest's zone catalog.
    pub fn from_specs(specs: &[ZoneSpec], policy: OccupancyDriftPolicy) -> Self {
        let zones = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Zone {
                id: i as u32 + 1,
                name: spec.name.clone(),
                capacity: spec.capacity,
                occupancy: spec.occupancy.min(spec.capacity),
                status: classify_occupancy(spec.occupancy, spec.capacity),
                last_update: 0.0,
            })
            .collect();
        Self { zones, policy }
    }

    /// Apply one bounded random-walk step to every zone and reclassify.
    ///
    /// Cannot fail: arithmetic is clamped into `[0, capacity]`.
    pub fn tick(&mut self, source: &mut dyn Perturbation, now: f64) {
        for zone in &mut self.zones {
            let was = zone.status;
            let delta = source.occupancy_delta(&self.policy);
            drift_zone(zone, delta, now);
            if zone.status == StatusTier::Danger && was != StatusTier::Danger {
                log::warn!(
                    "zone '{}' entered danger tier at {}/{}",
                    zone.name,
                    zone.occupancy,
                    zone.capacity
                );
            }
        }
    }

    /// Immutable copy of all zones, in configuration order.
    pub fn snapshot(&self) -> Vec<Zone> {
        self.zones.clone()
    }

    /// Event-wide totals recomputed from the current zone state.
    pub fn stats(&self) -> AggregateStats {
        stats::compute(&self.zones)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
