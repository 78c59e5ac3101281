//! Pure crowd-safety rules for CrowdSense.
//!
//! This crate contains all classification, aggregation, and update rules
//! that are independent of any timer, random source, or presentation layer.
//! Functions take plain data and return results, making them unit-testable
//! and portable across the engine, headless harnesses, and any future
//! frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`zone`] | Occupancy safety tiers (70% / 90% thresholds) and clamped drift |
//! | [`stats`] | Event-wide totals and per-tier zone counts |
//! | [`incident`] | Incident kinds, severities, and dispatch actions |
//! | [`evacuation`] | Route flow rules, phase data, completion summary |
//! | [`heat`] | Heat map view tiers (density, safety, capacity) |
//! | [`wristband`] | Wristband signal drift bounds and tracking aggregates |

pub mod evacuation;
pub mod heat;
pub mod incident;
pub mod stats;
pub mod wristband;
pub mod zone;
