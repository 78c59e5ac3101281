//! Venue configuration — the static catalog the engine is seeded from.
//!
//! The manifest lists the monitored zones, the evacuation route catalog,
//! the registered wristbands, and any incidents already open when the
//! session starts. It is the only fallible boundary in the engine: once a
//! manifest validates, nothing downstream can fail.

use crowdsense_logic::incident::{IncidentKind, Severity};
use crowdsense_logic::wristband::{BandKind, SignalStatus};
use serde::{Deserialize, Serialize};

/// Bundled default venue, shared with the simtest harness.
const BUNDLED_MANIFEST: &str = include_str!("../../../data/venue_manifest.json");

/// One monitored zone in the venue catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub name: String,
    pub capacity: u32,
    /// Occupancy at session start.
    pub occupancy: u32,
}

/// One evacuation route in the venue catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSpec {
    pub name: String,
    /// Throughput in people per minute.
    pub capacity: u32,
    /// Display label, e.g. "8 min".
    pub estimated_time: String,
    /// Zones this route serves.
    pub zones: Vec<String>,
}

/// One registered wristband.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WristbandSpec {
    pub holder: String,
    pub band_id: String,
    pub kind: BandKind,
    pub zone: String,
    pub signal_strength: f64,
    pub status: SignalStatus,
}

/// An incident already open at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentSpec {
    pub kind: IncidentKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub zone: Option<String>,
}

/// Complete static configuration for one venue session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueManifest {
    pub venue: String,
    pub zones: Vec<ZoneSpec>,
    pub routes: Vec<RouteSpec>,
    #[serde(default)]
    pub wristbands: Vec<WristbandSpec>,
    #[serde(default)]
    pub incidents: Vec<IncidentSpec>,
}

impl VenueManifest {
    /// Parse and validate the manifest bundled with the crate.
    pub fn bundled() -> Result<Self, ManifestError> {
        parse_manifest(BUNDLED_MANIFEST)
    }
}

/// Errors from loading a venue manifest.
#[derive(Debug)]
pub enum ManifestError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl From<serde_json::Error> for ManifestError {
    fn from(e: serde_json::Error) -> Self {
        ManifestError::Parse(e)
    }
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::Parse(e) => write!(f, "manifest parse error: {}", e),
            ManifestError::Invalid(reason) => write!(f, "invalid manifest: {}", reason),
        }
    }
}

impl std::error::Error for ManifestError {}

/// Parse a manifest from JSON and validate it.
pub fn parse_manifest(json: &str) -> Result<VenueManifest, ManifestError> {
    let manifest: VenueManifest = serde_json::from_str(json)?;
    validate(&manifest)?;
    Ok(manifest)
}

fn validate(manifest: &VenueManifest) -> Result<(), ManifestError> {
    if manifest.zones.is_empty() {
        return Err(ManifestError::Invalid("no zones defined".into()));
    }
    for zone in &manifest.zones {
        if zone.capacity == 0 {
            return Err(ManifestError::Invalid(format!(
                "zone '{}' has zero capacity",
                zone.name
            )));
        }
        if zone.occupancy > zone.capacity {
            return Err(ManifestError::Invalid(format!(
                "zone '{}' starts over capacity ({} > {})",
                zone.name, zone.occupancy, zone.capacity
            )));
        }
    }
    for route in &manifest.routes {
        if route.capacity == 0 {
            return Err(ManifestError::Invalid(format!(
                "route '{}' has zero capacity",
                route.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_manifest_parses() {
        let manifest = VenueManifest::bundled().expect("bundled manifest must validate");
        assert!(!manifest.zones.is_empty());
        assert!(!manifest.routes.is_empty());
        assert!(!manifest.wristbands.is_empty());
    }

    #[test]
    fn test_rejects_empty_zones() {
        let json = r#"{ "venue": "Test", "zones": [], "routes": [] }"#;
        assert!(matches!(
            parse_manifest(json),
            Err(ManifestError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_zero_capacity_zone() {
        let json = r#"{
            "venue": "Test",
            "zones": [{ "name": "Pit", "capacity": 0, "occupancy": 0 }],
            "routes": []
        }"#;
        assert!(matches!(
            parse_manifest(json),
            Err(ManifestError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_initial_overcapacity() {
        let json = r#"{
            "venue": "Test",
            "zones": [{ "name": "Pit", "capacity": 100, "occupancy": 150 }],
            "routes": []
        }"#;
        assert!(matches!(
            parse_manifest(json),
            Err(ManifestError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            parse_manifest("not json"),
            Err(ManifestError::Parse(_))
        ));
    }

    #[test]
    fn test_wristbands_and_incidents_default_empty() {
        let json = r#"{
            "venue": "Test",
            "zones": [{ "name": "Pit", "capacity": 100, "occupancy": 50 }],
            "routes": [{
                "name": "Exit",
                "capacity": 500,
                "estimated_time": "5 min",
                "zones": ["Pit"]
            }]
        }"#;
        let manifest = parse_manifest(json).expect("minimal manifest must parse");
        assert!(manifest.wristbands.is_empty());
        assert!(manifest.incidents.is_empty());
    }
}
