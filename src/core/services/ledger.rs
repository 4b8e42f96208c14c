//! Ledger service - records and reads batches through a [`BatchStore`]
//!
//! All writes go through here so that role checks, validation and status
//! transitions are applied in one place.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::compliance::{Verification, check_compliance};
use super::qr::{DEFAULT_VERIFY_BASE_URL, parse_scanned, verification_url};
use super::report::ComplianceReport;
use super::timeline::{MapView, TimelineEntry, build_timeline, map_view};
use crate::core::error::LedgerError;
use crate::core::models::{
    ApprovedZone, Batch, BatchStatus, CollectionEvent, Event, GeoPoint, ProcessingStep, QualityMetrics,
    QualityTest, StepType, TestResults, TestType, UserRole, default_zones, generate_batch_id,
};
use crate::core::ports::BatchStore;

/// Species used for the demo batch
pub const DEMO_SPECIES: &str = "Withania somnifera (Ashwagandha)";

/// Settings the ledger needs from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSettings {
    /// Approved harvest zones
    pub zones: Vec<ApprovedZone>,
    /// Base URL embedded in QR payloads
    pub verify_base_url: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            zones: default_zones(),
            verify_base_url: DEFAULT_VERIFY_BASE_URL.to_string(),
        }
    }
}

/// The traceability ledger
pub struct Ledger {
    store: Box<dyn BatchStore>,
    settings: LedgerSettings,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger").field("settings", &self.settings).finish_non_exhaustive()
    }
}

impl Ledger {
    /// Create a ledger over a store
    pub fn new(store: impl BatchStore + 'static, settings: LedgerSettings) -> Self {
        Self {
            store: Box::new(store),
            settings,
        }
    }

    /// Ledger settings
    #[must_use]
    pub const fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Open a new batch in the `harvested` state
    pub fn create_batch(
        &self,
        species: &str,
        harvest_date: NaiveDate,
        quantity: f64,
    ) -> Result<Batch, LedgerError> {
        if species.trim().is_empty() {
            return Err(LedgerError::EmptyField("species"));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(LedgerError::InvalidQuantity(quantity));
        }

        let mut id = generate_batch_id();
        while self.store.contains(&id)? {
            id = generate_batch_id();
        }

        let qr_code = verification_url(&self.settings.verify_base_url, &id);
        let batch = Batch::new(id, species.trim().to_string(), harvest_date, quantity, qr_code);
        self.store.save(&batch)?;

        log::info!("Created new batch: {}", batch.id);
        Ok(batch)
    }

    /// Open a new batch on behalf of a role
    pub fn create_batch_as(
        &self,
        role: UserRole,
        species: &str,
        harvest_date: NaiveDate,
        quantity: f64,
    ) -> Result<Batch, LedgerError> {
        if !role.can_create_batch() {
            return Err(LedgerError::CreateNotPermitted(role));
        }
        self.create_batch(species, harvest_date, quantity)
    }

    /// Append an event to a batch, advancing its status
    pub fn add_event(&self, batch_id: &str, role: UserRole, event: Event) -> Result<Batch, LedgerError> {
        if !role.permits(&event) {
            return Err(LedgerError::RoleNotPermitted {
                role,
                kind: event.kind(),
            });
        }
        event.validate()?;

        let mut batch = self.require_batch(batch_id)?;
        let event_id = event.id().to_string();
        batch.push_event(event);
        self.store.save(&batch)?;

        log::info!("Added event {event_id} to batch {batch_id} (status: {})", batch.status);
        Ok(batch)
    }

    /// Get a batch by ID
    pub fn get_batch(&self, batch_id: &str) -> Result<Option<Batch>, LedgerError> {
        Ok(self.store.get(batch_id)?)
    }

    /// Get a batch by ID, failing if absent
    pub fn require_batch(&self, batch_id: &str) -> Result<Batch, LedgerError> {
        self.get_batch(batch_id)?
            .ok_or_else(|| LedgerError::BatchNotFound(batch_id.to_string()))
    }

    /// All batches, ordered by ID
    pub fn list_batches(&self) -> Result<Vec<Batch>, LedgerError> {
        Ok(self.store.list()?)
    }

    /// Batches in the given status, or all when `None`, ordered by ID
    pub fn list_batches_by_status(
        &self,
        status: Option<BatchStatus>,
    ) -> Result<Vec<Batch>, LedgerError> {
        Ok(self.store.list_filtered(status)?)
    }

    /// Score a batch; unknown batches get the fixed not-found result
    pub fn verify_batch(&self, batch_id: &str) -> Result<Verification, LedgerError> {
        Ok(self
            .get_batch(batch_id)?
            .map_or_else(Verification::not_found, |batch| self.score(&batch)))
    }

    /// Score a batch that is already loaded
    #[must_use]
    pub fn score(&self, batch: &Batch) -> Verification {
        check_compliance(&batch.events, &self.settings.zones)
    }

    /// Certification report for a batch
    pub fn generate_report(&self, batch_id: &str) -> Result<ComplianceReport, LedgerError> {
        let verification = self.verify_batch(batch_id)?;
        Ok(ComplianceReport::from_verification(batch_id, &verification))
    }

    /// Chronological timeline of a batch
    pub fn timeline(&self, batch_id: &str) -> Result<Vec<TimelineEntry>, LedgerError> {
        Ok(build_timeline(&self.require_batch(batch_id)?.events))
    }

    /// Harvest points of a batch
    pub fn map_view(&self, batch_id: &str) -> Result<MapView, LedgerError> {
        Ok(map_view(&self.require_batch(batch_id)?.events, &self.settings.zones))
    }

    /// QR payload for a batch
    #[must_use]
    pub fn qr_payload(&self, batch_id: &str) -> String {
        verification_url(&self.settings.verify_base_url, batch_id)
    }

    /// Resolve a scanned payload to a batch ID and its verification
    pub fn scan(&self, payload: &str) -> Result<(String, Verification), LedgerError> {
        let batch_id = parse_scanned(payload)?;
        let verification = self.verify_batch(&batch_id)?;
        Ok((batch_id, verification))
    }

    /// Seed the demo batch only into an empty ledger
    pub fn seed_demo_if_empty(&self) -> Result<Option<Batch>, LedgerError> {
        if !self.store.list()?.is_empty() {
            log::debug!("Ledger already has batches, skipping demo seed");
            return Ok(None);
        }
        self.seed_demo_data().map(Some)
    }

    /// Create the Ashwagandha demo batch: harvest, drying and a passing test
    pub fn seed_demo_data(&self) -> Result<Batch, LedgerError> {
        let harvest_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
        let batch = self.create_batch(DEMO_SPECIES, harvest_date, 150.0)?;

        let collection = Event::Collection(CollectionEvent {
            id: "collection-001".to_string(),
            timestamp: demo_time(15, 6, 30),
            collector_id: "farmer-001".to_string(),
            collector_name: "Rajesh Kumar".to_string(),
            species: "Withania somnifera".to_string(),
            gps_location: GeoPoint::new(10.8505, 76.2711),
            location_name: "Munnar, Kerala".to_string(),
            quality_metrics: QualityMetrics {
                moisture: 12.5,
                appearance: "Fresh, unblemished roots".to_string(),
                aroma: "Strong, characteristic".to_string(),
            },
            photos: vec!["harvest-001.jpg".to_string()],
        });

        let processing = Event::Processing(ProcessingStep {
            id: "processing-001".to_string(),
            timestamp: demo_time(16, 10, 0),
            processor_id: "processor-001".to_string(),
            processor_name: "Kerala Ayurveda Processing Co.".to_string(),
            step_type: StepType::Drying,
            temperature: Some(40.0),
            duration: 72.0,
            notes: "Shade dried at controlled temperature".to_string(),
        });

        let quality = Event::QualityTest(QualityTest {
            id: "quality-001".to_string(),
            timestamp: demo_time(18, 14, 0),
            lab_id: "lab-001".to_string(),
            lab_name: "AYUSH Certified Testing Lab".to_string(),
            test_type: TestType::Moisture,
            results: TestResults {
                passed: true,
                value: 8.2,
                unit: "%".to_string(),
                standard: "AYUSH Guidelines ≤10%".to_string(),
            },
            certificate_url: Some("cert-moisture-001.pdf".to_string()),
        });

        self.add_event(&batch.id, UserRole::Farmer, collection)?;
        self.add_event(&batch.id, UserRole::Processor, processing)?;
        self.add_event(&batch.id, UserRole::Lab, quality)
    }
}

fn demo_time(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).single().unwrap_or_else(Utc::now)
}
