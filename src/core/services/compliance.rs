//! Compliance service - geofence and certification scoring
//!
//! This service contains the pure business logic for scoring a batch's
//! recorded events. Scoring is deduction-based: every batch starts at 100
//! and loses a fixed penalty per rule violation.

use serde::{Deserialize, Serialize};

use crate::core::models::{ApprovedZone, Event, GeoPoint};

/// Starting score before deductions
pub const MAX_SCORE: i32 = 100;

/// Deduction when no harvest was recorded
pub const MISSING_COLLECTION_PENALTY: i32 = 20;

/// Deduction when no lab test was recorded
pub const MISSING_QUALITY_TEST_PENALTY: i32 = 15;

/// Deduction per harvest outside every approved zone
pub const OUTSIDE_ZONE_PENALTY: i32 = 25;

/// Violation text for a batch without a harvest record
pub const MISSING_COLLECTION: &str = "Missing collection event";

/// Violation text for a batch without a lab test
pub const MISSING_QUALITY_TEST: &str = "Missing quality test certification";

/// Violation text for a harvest outside the approved zones
pub const OUTSIDE_APPROVED_ZONES: &str = "Collection location outside approved zones";

/// Violation text for an unknown batch
pub const BATCH_NOT_FOUND: &str = "Batch not found";

/// Result of verifying a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// True iff there are no violations
    pub valid: bool,
    /// Human-readable rule violations, in detection order
    pub violations: Vec<String>,
    /// Score in `0..=100`
    pub compliance_score: u8,
}

impl Verification {
    /// Fixed result for a batch that does not exist
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            valid: false,
            violations: vec![BATCH_NOT_FOUND.to_string()],
            compliance_score: 0,
        }
    }
}

/// Score a batch's events against the approved zones
///
/// This is pure business logic with no I/O.
///
/// # Rules
///
/// 1. No collection event: "Missing collection event", -20
/// 2. No quality test: "Missing quality test certification", -15
/// 3. Each collection event outside every zone: -25 (stacks)
///
/// The raw score may go below zero; the reported score is clamped to 0.
#[must_use]
pub fn check_compliance(events: &[Event], zones: &[ApprovedZone]) -> Verification {
    let mut violations = Vec::new();
    let mut score = MAX_SCORE;

    if !events.iter().any(|e| e.collector_id().is_some()) {
        violations.push(MISSING_COLLECTION.to_string());
        score -= MISSING_COLLECTION_PENALTY;
    }

    if !events.iter().any(|e| e.lab_id().is_some()) {
        violations.push(MISSING_QUALITY_TEST.to_string());
        score -= MISSING_QUALITY_TEST_PENALTY;
    }

    for point in events.iter().filter_map(Event::gps_location) {
        if !in_approved_zone(point, zones) {
            log::debug!("Collection at {point} is outside all approved zones");
            violations.push(OUTSIDE_APPROVED_ZONES.to_string());
            score -= OUTSIDE_ZONE_PENALTY;
        }
    }

    Verification {
        valid: violations.is_empty(),
        violations,
        compliance_score: clamp_score(score),
    }
}

/// Whether any zone contains the point
#[must_use]
pub fn in_approved_zone(point: GeoPoint, zones: &[ApprovedZone]) -> bool {
    zones.iter().any(|zone| zone.contains(point))
}

/// The zone whose center is closest to the point, with the distance in meters
#[must_use]
pub fn nearest_zone(point: GeoPoint, zones: &[ApprovedZone]) -> Option<(&ApprovedZone, f64)> {
    zones
        .iter()
        .map(|zone| (zone, zone.distance_from_center(point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn clamp_score(score: i32) -> u8 {
    u8::try_from(score.clamp(0, MAX_SCORE)).unwrap_or(0)
}
