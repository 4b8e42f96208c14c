//! Tests for the ledger service
//!
//! Batch creation, event recording, role permissions and status
//! transitions, over both store implementations.

use herbtrace::core::LedgerError;
use herbtrace::core::models::{BatchStatus, EntityType, StepType, UserRole};
use herbtrace::core::services::DEMO_SPECIES;

use crate::common::{
    DELHI, FileLedger, MUNNAR, collection, harvest_date, memory_ledger, processing, quality_test,
    transfer,
};

// =============================================================================
// CREATION
// =============================================================================

#[test]
fn test_create_batch_defaults() {
    let ledger = memory_ledger();
    let batch = ledger.create_batch("Curcuma longa (Turmeric)", harvest_date(), 42.5).unwrap();

    assert!(batch.id.starts_with("ASH-"));
    assert_eq!(batch.unit, "kg");
    assert_eq!(batch.status, BatchStatus::Harvested);
    assert!(batch.events.is_empty());
    assert_eq!(batch.qr_code, format!("https://ayur-trace.com/verify/{}", batch.id));
}

#[test]
fn test_create_batch_ids_are_unique() {
    let ledger = memory_ledger();
    let a = ledger.create_batch("Tulsi", harvest_date(), 1.0).unwrap();
    let b = ledger.create_batch("Tulsi", harvest_date(), 1.0).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(ledger.list_batches().unwrap().len(), 2);
}

#[test]
fn test_create_batch_rejects_bad_input() {
    let ledger = memory_ledger();
    assert!(matches!(
        ledger.create_batch("  ", harvest_date(), 1.0),
        Err(LedgerError::EmptyField("species"))
    ));
    assert!(matches!(
        ledger.create_batch("Tulsi", harvest_date(), 0.0),
        Err(LedgerError::InvalidQuantity(_))
    ));
    assert!(matches!(
        ledger.create_batch("Tulsi", harvest_date(), f64::NAN),
        Err(LedgerError::InvalidQuantity(_))
    ));
}

#[test]
fn test_only_farmers_create_batches() {
    let ledger = memory_ledger();
    assert!(ledger.create_batch_as(UserRole::Farmer, "Tulsi", harvest_date(), 1.0).is_ok());
    assert!(matches!(
        ledger.create_batch_as(UserRole::Lab, "Tulsi", harvest_date(), 1.0),
        Err(LedgerError::CreateNotPermitted(UserRole::Lab))
    ));
}

// =============================================================================
// EVENTS & STATUS
// =============================================================================

#[test]
fn test_status_follows_supply_chain() {
    let ledger = memory_ledger();
    let id = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap().id;

    let b = ledger.add_event(&id, UserRole::Farmer, collection("c1", MUNNAR)).unwrap();
    assert_eq!(b.status, BatchStatus::Harvested);

    let b = ledger.add_event(&id, UserRole::Processor, processing("p1", StepType::Drying)).unwrap();
    assert_eq!(b.status, BatchStatus::Processing);

    let b = ledger.add_event(&id, UserRole::Lab, quality_test("q1", true)).unwrap();
    assert_eq!(b.status, BatchStatus::Tested);

    let b = ledger
        .add_event(&id, UserRole::Manufacturer, transfer("t1", EntityType::Manufacturer))
        .unwrap();
    assert_eq!(b.status, BatchStatus::Manufactured);

    let b = ledger
        .add_event(&id, UserRole::Manufacturer, processing("p2", StepType::Packaging))
        .unwrap();
    assert_eq!(b.status, BatchStatus::Packaged);

    let b = ledger
        .add_event(&id, UserRole::Manufacturer, transfer("t2", EntityType::Retailer))
        .unwrap();
    assert_eq!(b.status, BatchStatus::Distributed);
    assert_eq!(b.events.len(), 6);
}

#[test]
fn test_status_never_moves_backwards() {
    let ledger = memory_ledger();
    let id = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap().id;

    ledger.add_event(&id, UserRole::Lab, quality_test("q1", true)).unwrap();
    let b = ledger.add_event(&id, UserRole::Processor, processing("p1", StepType::Grinding)).unwrap();
    assert_eq!(b.status, BatchStatus::Tested);

    let b = ledger
        .add_event(&id, UserRole::Manufacturer, transfer("t1", EntityType::Processor))
        .unwrap();
    assert_eq!(b.status, BatchStatus::Tested);
}

#[test]
fn test_role_permissions_enforced() {
    let ledger = memory_ledger();
    let id = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap().id;

    for role in [UserRole::Processor, UserRole::Lab, UserRole::Regulator, UserRole::Consumer] {
        assert!(matches!(
            ledger.add_event(&id, role, collection("c1", MUNNAR)),
            Err(LedgerError::RoleNotPermitted { .. })
        ));
    }
    assert!(matches!(
        ledger.add_event(&id, UserRole::Manufacturer, processing("p1", StepType::Drying)),
        Err(LedgerError::RoleNotPermitted { .. })
    ));

    // Rejected writes leave the batch untouched
    assert!(ledger.require_batch(&id).unwrap().events.is_empty());
}

#[test]
fn test_add_event_to_unknown_batch() {
    let ledger = memory_ledger();
    assert!(matches!(
        ledger.add_event("ASH-missing", UserRole::Farmer, collection("c1", MUNNAR)),
        Err(LedgerError::BatchNotFound(id)) if id == "ASH-missing"
    ));
}

#[test]
fn test_add_event_rejects_bad_coordinates() {
    let ledger = memory_ledger();
    let id = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap().id;
    assert!(matches!(
        ledger.add_event(&id, UserRole::Farmer, collection("c1", (95.0, 10.0))),
        Err(LedgerError::InvalidCoordinates { .. })
    ));
}

// =============================================================================
// READS
// =============================================================================

#[test]
fn test_verify_unknown_batch_is_sentinel() {
    let ledger = memory_ledger();
    let v = ledger.verify_batch("nope").unwrap();
    assert!(!v.valid);
    assert_eq!(v.violations, vec!["Batch not found"]);
    assert_eq!(v.compliance_score, 0);
}

#[test]
fn test_verify_and_report_use_configured_zones() {
    let ledger = memory_ledger();
    let id = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap().id;
    ledger.add_event(&id, UserRole::Farmer, collection("c1", DELHI)).unwrap();
    ledger.add_event(&id, UserRole::Lab, quality_test("q1", true)).unwrap();

    let v = ledger.verify_batch(&id).unwrap();
    assert_eq!(v.compliance_score, 75);

    let report = ledger.generate_report(&id).unwrap();
    assert!(!report.ayush_compliance);
    assert_eq!(report.sustainability_score, 75);
}

#[test]
fn test_timeline_and_map() {
    let ledger = memory_ledger();
    let id = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap().id;
    ledger.add_event(&id, UserRole::Lab, quality_test("q1", true)).unwrap();
    ledger.add_event(&id, UserRole::Farmer, collection("c1", MUNNAR)).unwrap();

    let timeline = ledger.timeline(&id).unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].event_id, "c1");
    assert_eq!(timeline[0].title, "Harvested by Anita Nair");

    let map = ledger.map_view(&id).unwrap();
    assert_eq!(map.points.len(), 1);
    assert!((map.center.latitude - MUNNAR.0).abs() < 1e-9);

    assert!(matches!(ledger.timeline("nope"), Err(LedgerError::BatchNotFound(_))));
}

#[test]
fn test_scan_resolves_url_and_bare_id() {
    let ledger = memory_ledger();
    let batch = ledger.create_batch("Tulsi", harvest_date(), 10.0).unwrap();

    let (id, v) = ledger.scan(&batch.qr_code).unwrap();
    assert_eq!(id, batch.id);
    assert_eq!(v.compliance_score, 65);

    let (id, _) = ledger.scan(&format!("  {}  ", batch.id)).unwrap();
    assert_eq!(id, batch.id);

    assert!(matches!(ledger.scan("   "), Err(LedgerError::InvalidPayload(_))));
}

#[test]
fn test_seed_demo_data() {
    let ledger = memory_ledger();
    let batch = ledger.seed_demo_data().unwrap();

    assert_eq!(batch.species, DEMO_SPECIES);
    assert_eq!(batch.total_quantity, 150.0);
    assert_eq!(batch.events.len(), 3);
    assert_eq!(batch.status, BatchStatus::Tested);

    let v = ledger.verify_batch(&batch.id).unwrap();
    assert!(v.valid);
    assert_eq!(v.compliance_score, 100);
}

// =============================================================================
// FILE-BACKED LEDGER
// =============================================================================

#[test]
fn test_file_ledger_persists_between_instances() {
    let fixture = FileLedger::new();
    let id = fixture.ledger.create_batch("Tulsi", harvest_date(), 5.0).unwrap().id;
    fixture.ledger.add_event(&id, UserRole::Farmer, collection("c1", MUNNAR)).unwrap();

    let reopened = fixture.reopen();
    let batch = reopened.require_batch(&id).unwrap();
    assert_eq!(batch.events.len(), 1);
    assert_eq!(batch.events[0].id(), "c1");
}

#[test]
fn test_demo_seed_skips_non_empty_file_ledger() {
    let fixture = FileLedger::new();
    assert!(fixture.ledger.seed_demo_if_empty().unwrap().is_some());

    for _ in 0..2 {
        assert!(fixture.reopen().seed_demo_if_empty().unwrap().is_none());
    }
    assert_eq!(fixture.reopen().list_batches().unwrap().len(), 1);
}

#[test]
fn test_demo_seed_skips_ledger_with_other_batches() {
    let ledger = memory_ledger();
    ledger.create_batch("Tulsi", harvest_date(), 5.0).unwrap();
    assert!(ledger.seed_demo_if_empty().unwrap().is_none());
    assert_eq!(ledger.list_batches().unwrap().len(), 1);
}
