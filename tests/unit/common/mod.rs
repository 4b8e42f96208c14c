//! Shared test fixtures and helpers
//!
//! This module provides event builders and ledger setups for testing
//! herbtrace components.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use herbtrace::adapters::{InMemoryBatchStore, JsonFileStore};
use herbtrace::core::models::{
    CollectionEvent, EntityType, Event, GeoPoint, ProcessingStep, QualityMetrics, QualityTest,
    StepType, TestResults, TestType, Transfer,
};
use herbtrace::core::services::{Ledger, LedgerSettings};
use tempfile::TempDir;

/// Munnar, inside the Kerala zone
pub const MUNNAR: (f64, f64) = (10.0889, 77.0595);

/// Delhi, far from every default zone
pub const DELHI: (f64, f64) = (28.6139, 77.2090);

/// Fixed timestamp on 2024-03-01 at the given hour
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

pub fn harvest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// Harvest at the given coordinates
pub fn collection(id: &str, (lat, lng): (f64, f64)) -> Event {
    Event::Collection(CollectionEvent {
        id: id.to_string(),
        timestamp: at(6),
        collector_id: "farmer-1".to_string(),
        collector_name: "Anita Nair".to_string(),
        species: "Withania somnifera".to_string(),
        gps_location: GeoPoint::new(lat, lng),
        location_name: "Test field".to_string(),
        quality_metrics: QualityMetrics {
            moisture: 11.0,
            appearance: "Good".to_string(),
            aroma: "Earthy".to_string(),
        },
        photos: vec![],
    })
}

pub fn processing(id: &str, step_type: StepType) -> Event {
    Event::Processing(ProcessingStep {
        id: id.to_string(),
        timestamp: at(9),
        processor_id: "processor-1".to_string(),
        processor_name: "Spice Mill".to_string(),
        step_type,
        temperature: Some(40.0),
        duration: 48.0,
        notes: String::new(),
    })
}

pub fn quality_test(id: &str, passed: bool) -> Event {
    Event::QualityTest(QualityTest {
        id: id.to_string(),
        timestamp: at(12),
        lab_id: "lab-1".to_string(),
        lab_name: "Certified Lab".to_string(),
        test_type: TestType::Moisture,
        results: TestResults {
            passed,
            value: 8.0,
            unit: "%".to_string(),
            standard: "AYUSH Guidelines ≤10%".to_string(),
        },
        certificate_url: None,
    })
}

pub fn transfer(id: &str, entity_type: EntityType) -> Event {
    Event::Transfer(Transfer {
        id: id.to_string(),
        timestamp: at(15),
        from_entity: "Spice Mill".to_string(),
        to_entity: "Receiver".to_string(),
        entity_type,
        quantity: 100.0,
        unit: "kg".to_string(),
        signature: "sig".to_string(),
    })
}

/// Ledger over a fresh in-memory store with default settings
pub fn memory_ledger() -> Ledger {
    Ledger::new(InMemoryBatchStore::new(), LedgerSettings::default())
}

/// Ledger over a JSON file in a temporary directory
pub struct FileLedger {
    pub dir: TempDir,
    pub ledger: Ledger,
}

impl FileLedger {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let ledger = Ledger::new(
            JsonFileStore::new(dir.path().join("ledger.json")),
            LedgerSettings::default(),
        );
        Self { dir, ledger }
    }

    /// A second ledger over the same file
    pub fn reopen(&self) -> Ledger {
        Ledger::new(
            JsonFileStore::new(self.dir.path().join("ledger.json")),
            LedgerSettings::default(),
        )
    }
}
