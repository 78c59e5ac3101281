//! Wristband signal tracking rules.
//!
//! Each attendee wristband reports a signal strength that drifts within a
//! bounded band; tracking status (active / missing / emergency) is set by
//! operator or sensor events, never by the drift itself.

use serde::{Deserialize, Serialize};

/// Wristband class issued to the holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Vip,
    General,
    Staff,
}

/// Tracking status of a wristband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    /// Reporting normally.
    Active,
    /// No reliable position fix; holder unaccounted for.
    Missing,
    /// Holder flagged for emergency response.
    Emergency,
}

/// Signal strength bounds and drift step.
pub mod signal_bounds {
    /// Floor below which the receiver drops the band entirely.
    pub const MIN_SIGNAL: f64 = 20.0;
    /// Full strength.
    pub const MAX_SIGNAL: f64 = 100.0;
    /// Signal above this renders as strong.
    pub const STRONG_SIGNAL: f64 = 70.0;
    /// Signal above this renders as fair; at or below is weak.
    pub const FAIR_SIGNAL: f64 = 40.0;
}

/// Per-tick signal drift bound, drawn symmetrically from
/// `[-max_step, +max_step]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalPolicy {
    pub max_step: f64,
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self { max_step: 10.0 }
    }
}

/// A tracked attendee wristband.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wristband {
    pub id: u32,
    /// Holder display name.
    pub holder: String,
    /// Printed wristband code, e.g. "A1234".
    pub band_id: String,
    pub kind: BandKind,
    /// Last known zone label (descriptive, not validated).
    pub zone: String,
    /// Signal strength percent, within `[MIN_SIGNAL, MAX_SIGNAL]`.
    pub signal_strength: f64,
    /// Simulation time (seconds) of the last position report.
    pub last_seen: f64,
    pub status: SignalStatus,
}

/// Rendering bucket for a signal strength bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalTier {
    Weak,
    Fair,
    Strong,
}

/// Apply a signed drift to a band's signal, clamped into the signal bounds.
pub fn apply_signal_delta(band: &mut Wristband, delta: f64) {
    use signal_bounds::*;
    band.signal_strength = (band.signal_strength + delta).clamp(MIN_SIGNAL, MAX_SIGNAL);
}

/// Classify a signal strength: strong above 70, fair above 40.
pub fn signal_tier(strength: f64) -> SignalTier {
    use signal_bounds::*;
    if strength > STRONG_SIGNAL {
        SignalTier::Strong
    } else if strength > FAIR_SIGNAL {
        SignalTier::Fair
    } else {
        SignalTier::Weak
    }
}

/// Count of bands reporting normally.
pub fn active_count(bands: &[Wristband]) -> usize {
    bands
        .iter()
        .filter(|b| b.status == SignalStatus::Active)
        .count()
}

/// Count of bands flagged missing.
pub fn missing_count(bands: &[Wristband]) -> usize {
    bands
        .iter()
        .filter(|b| b.status == SignalStatus::Missing)
        .count()
}

/// Mean signal strength across all bands (0.0 for an empty set).
pub fn average_signal(bands: &[Wristband]) -> f64 {
    if bands.is_empty() {
        0.0
    } else {
        bands.iter().map(|b| b.signal_strength).sum::<f64>() / bands.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(signal: f64, status: SignalStatus) -> Wristband {
        Wristband {
            id: 1,
            holder: "Mike R.".into(),
            band_id: "B5678".into(),
            kind: BandKind::General,
            zone: "Main Floor".into(),
            signal_strength: signal,
            last_seen: 0.0,
            status,
        }
    }

    #[test]
    fn test_signal_clamps_at_max() {
        let mut b = band(95.0, SignalStatus::Active);
        apply_signal_delta(&mut b, 10.0);
        assert_eq!(b.signal_strength, 100.0);
    }

    #[test]
    fn test_signal_clamps_at_floor() {
        let mut b = band(25.0, SignalStatus::Active);
        apply_signal_delta(&mut b, -10.0);
        assert_eq!(b.signal_strength, 20.0);
    }

    #[test]
    fn test_signal_tiers() {
        assert_eq!(signal_tier(90.0), SignalTier::Strong);
        assert_eq!(signal_tier(70.0), SignalTier::Fair);
        assert_eq!(signal_tier(55.0), SignalTier::Fair);
        assert_eq!(signal_tier(40.0), SignalTier::Weak);
    }

    #[test]
    fn test_counts_by_status() {
        let bands = vec![
            band(90.0, SignalStatus::Active),
            band(85.0, SignalStatus::Missing),
            band(70.0, SignalStatus::Active),
        ];
        assert_eq!(active_count(&bands), 2);
        assert_eq!(missing_count(&bands), 1);
    }

    #[test]
    fn test_average_signal() {
        let bands = vec![
            band(80.0, SignalStatus::Active),
            band(60.0, SignalStatus::Active),
        ];
        assert_eq!(average_signal(&bands), 70.0);
        assert_eq!(average_signal(&[]), 0.0);
    }
}
