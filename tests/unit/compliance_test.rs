//! Tests for compliance scoring and reports

use herbtrace::core::models::{ApprovedZone, EntityType, GeoPoint, StepType, default_zones};
use herbtrace::core::services::compliance::{
    MISSING_COLLECTION, MISSING_QUALITY_TEST, OUTSIDE_APPROVED_ZONES,
};
use herbtrace::core::services::{
    ComplianceReport, Verification, check_compliance, in_approved_zone, nearest_zone,
};

use crate::common::{DELHI, MUNNAR, collection, processing, quality_test, transfer};

// =============================================================================
// SCORING
// =============================================================================

#[test]
fn test_complete_batch_scores_full() {
    let events = vec![
        collection("c1", MUNNAR),
        processing("p1", StepType::Drying),
        quality_test("q1", true),
    ];

    let v = check_compliance(&events, &default_zones());
    assert!(v.valid);
    assert!(v.violations.is_empty());
    assert_eq!(v.compliance_score, 100);
}

#[test]
fn test_no_events_loses_both_evidence_penalties() {
    let v = check_compliance(&[], &default_zones());
    assert!(!v.valid);
    assert_eq!(v.violations, vec![MISSING_COLLECTION, MISSING_QUALITY_TEST]);
    assert_eq!(v.compliance_score, 65);
}

#[test]
fn test_missing_quality_test() {
    let v = check_compliance(&[collection("c1", MUNNAR)], &default_zones());
    assert_eq!(v.violations, vec![MISSING_QUALITY_TEST]);
    assert_eq!(v.compliance_score, 85);
}

#[test]
fn test_failed_lab_test_still_counts_as_evidence() {
    let events = vec![collection("c1", MUNNAR), quality_test("q1", false)];
    let v = check_compliance(&events, &default_zones());
    assert!(v.valid);
    assert_eq!(v.compliance_score, 100);
}

#[test]
fn test_harvest_outside_zones() {
    let events = vec![collection("c1", DELHI), quality_test("q1", true)];
    let v = check_compliance(&events, &default_zones());
    assert!(!v.valid);
    assert_eq!(v.violations, vec![OUTSIDE_APPROVED_ZONES]);
    assert_eq!(v.compliance_score, 75);
}

#[test]
fn test_outside_zone_penalty_stacks_per_harvest() {
    let events = vec![
        collection("c1", DELHI),
        collection("c2", DELHI),
        collection("c3", MUNNAR),
        quality_test("q1", true),
    ];
    let v = check_compliance(&events, &default_zones());
    assert_eq!(v.violations.len(), 2);
    assert_eq!(v.compliance_score, 50);
}

#[test]
fn test_score_clamps_at_zero() {
    let mut events: Vec<_> = (0..6).map(|i| collection(&format!("c{i}"), DELHI)).collect();
    events.push(transfer("t1", EntityType::Retailer));
    let v = check_compliance(&events, &default_zones());
    assert_eq!(v.compliance_score, 0);
    assert_eq!(v.violations.len(), 7);
}

#[test]
fn test_no_zones_means_every_harvest_is_outside() {
    let events = vec![collection("c1", MUNNAR), quality_test("q1", true)];
    let v = check_compliance(&events, &[]);
    assert_eq!(v.violations, vec![OUTSIDE_APPROVED_ZONES]);
}

#[test]
fn test_not_found_sentinel() {
    let v = Verification::not_found();
    assert!(!v.valid);
    assert_eq!(v.violations, vec!["Batch not found"]);
    assert_eq!(v.compliance_score, 0);
}

// =============================================================================
// ZONES
// =============================================================================

#[test]
fn test_zone_boundary_is_inclusive() {
    let zone = ApprovedZone::new("Edge", 0.0, 0.0, 1000.0);
    let edge = GeoPoint::new(0.0, 0.0);
    assert!(zone.contains(edge));
    assert!(in_approved_zone(GeoPoint::new(0.0, 0.005), &[zone]));
}

#[test]
fn test_nearest_zone() {
    let zones = default_zones();
    let (zone, distance) = nearest_zone(GeoPoint::new(15.0, 75.5), &zones).unwrap();
    assert!(zone.name.contains("Karnataka"));
    assert!(distance < 50_000.0);
    assert!(nearest_zone(GeoPoint::new(0.0, 0.0), &[]).is_none());
}

// =============================================================================
// REPORTS
// =============================================================================

fn verification(score: u8) -> Verification {
    Verification {
        valid: score == 100,
        violations: vec![],
        compliance_score: score,
    }
}

#[test]
fn test_report_thresholds() {
    let r = ComplianceReport::from_verification("B", &verification(79));
    assert!(!r.ayush_compliance);
    assert!(!r.fair_trade);
    assert!(!r.organic_certified);

    let r = ComplianceReport::from_verification("B", &verification(80));
    assert!(r.ayush_compliance);
    assert!(!r.fair_trade);

    let r = ComplianceReport::from_verification("B", &verification(85));
    assert!(r.fair_trade);
    assert!(!r.organic_certified);

    let r = ComplianceReport::from_verification("B", &verification(90));
    assert!(r.organic_certified);
    assert_eq!(r.sustainability_score, 90);
}

#[test]
fn test_report_issuer_and_violations() {
    let v = check_compliance(&[], &default_zones());
    let r = ComplianceReport::from_verification("ASH-1", &v);
    assert_eq!(r.batch_id, "ASH-1");
    assert_eq!(r.generated_by, "AYUSH Compliance System");
    assert_eq!(r.violations, v.violations);
    assert_eq!(r.sustainability_score, 65);
}
