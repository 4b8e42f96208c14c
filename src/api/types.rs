//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiErrorData};
use crate::core::models::{
    Batch, BatchStatus, CollectionEvent, EntityType, Event, EventKind, GeoPoint, HerbInfo,
    ProcessingStep, QualityMetrics, QualityTest, StepType, TestResults, TestType, Transfer,
    UserRole, generate_event_id,
};
use crate::core::services::{ComplianceReport, MapView, TimelineEntry, Verification};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Failed response carrying the error's code and message
    #[must_use]
    pub fn error(error: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData::from(error)),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a batch
#[derive(Debug, Deserialize)]
pub struct CreateBatchRequest {
    /// Role performing the action
    #[serde(default = "default_creator_role")]
    pub role: UserRole,
    /// Species label
    pub species: String,
    /// Harvest date (defaults to today)
    #[serde(default)]
    pub harvest_date: Option<NaiveDate>,
    /// Quantity in kg
    pub quantity: f64,
    /// Harvest record to attach immediately
    #[serde(default)]
    pub collection: Option<CollectionInput>,
}

const fn default_creator_role() -> UserRole {
    UserRole::Farmer
}

/// Request body for recording an event
#[derive(Debug, Deserialize)]
pub struct RecordEventRequest {
    /// Role performing the action
    pub role: UserRole,
    /// The event to record
    pub event: EventInput,
}

/// Request body for resolving a scanned QR payload
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Raw scanned text
    pub payload: String,
}

/// Event as submitted by a client; IDs and timestamps are filled in
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventInput {
    /// Harvest record
    Collection(CollectionInput),
    /// Processing step
    Processing(ProcessingInput),
    /// Lab test result
    QualityTest(QualityTestInput),
    /// Custody transfer
    Transfer(TransferInput),
}

impl EventInput {
    /// Kind of event this input produces
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Collection(_) => EventKind::Collection,
            Self::Processing(_) => EventKind::Processing,
            Self::QualityTest(_) => EventKind::QualityTest,
            Self::Transfer(_) => EventKind::Transfer,
        }
    }

    /// Build the event, generating an ID and timestamp where absent
    #[must_use]
    pub fn into_event(self) -> Event {
        let kind = self.kind();
        let id = generate_event_id(kind);
        match self {
            Self::Collection(c) => Event::Collection(CollectionEvent {
                id: c.id.unwrap_or(id),
                timestamp: c.timestamp.unwrap_or_else(Utc::now),
                collector_id: c.collector_id.unwrap_or_else(|| actor_id("farmer")),
                collector_name: c.collector_name,
                species: c.species,
                gps_location: GeoPoint::new(
                    c.latitude.unwrap_or(DEFAULT_LATITUDE),
                    c.longitude.unwrap_or(DEFAULT_LONGITUDE),
                ),
                location_name: c.location_name.unwrap_or_else(|| "Kerala, India".to_string()),
                quality_metrics: QualityMetrics {
                    moisture: c.moisture.unwrap_or(12.0),
                    appearance: c.appearance.unwrap_or_else(|| "Good quality".to_string()),
                    aroma: c.aroma.unwrap_or_else(|| "Normal".to_string()),
                },
                photos: c.photos,
            }),
            Self::Processing(p) => Event::Processing(ProcessingStep {
                id: p.id.unwrap_or(id),
                timestamp: p.timestamp.unwrap_or_else(Utc::now),
                processor_id: p.processor_id.unwrap_or_else(|| actor_id("processor")),
                processor_name: p.processor_name,
                step_type: p.step_type,
                temperature: p.temperature,
                duration: p.duration.unwrap_or(24.0),
                notes: p.notes.unwrap_or_else(|| "Processing completed".to_string()),
            }),
            Self::QualityTest(q) => Event::QualityTest(QualityTest {
                id: q.id.unwrap_or(id),
                timestamp: q.timestamp.unwrap_or_else(Utc::now),
                lab_id: q.lab_id.unwrap_or_else(|| actor_id("lab")),
                lab_name: q.lab_name,
                test_type: q.test_type,
                results: TestResults {
                    passed: q.passed,
                    value: q.value.unwrap_or(0.0),
                    unit: q.unit.unwrap_or_else(|| "%".to_string()),
                    standard: q.standard.unwrap_or_else(|| "AYUSH Guidelines ≤10%".to_string()),
                },
                certificate_url: q.certificate_url,
            }),
            Self::Transfer(t) => Event::Transfer(Transfer {
                id: t.id.unwrap_or(id),
                timestamp: t.timestamp.unwrap_or_else(Utc::now),
                from_entity: t.from_entity,
                to_entity: t.to_entity,
                entity_type: t.entity_type,
                quantity: t.quantity,
                unit: t.unit.unwrap_or_else(|| "kg".to_string()),
                signature: t.signature.unwrap_or_default(),
            }),
        }
    }
}

/// Latitude used when a harvest omits coordinates (Kerala zone center)
pub const DEFAULT_LATITUDE: f64 = 10.8505;

/// Longitude used when a harvest omits coordinates (Kerala zone center)
pub const DEFAULT_LONGITUDE: f64 = 76.2711;

fn actor_id(role: &str) -> String {
    format!("{role}-{}", Utc::now().timestamp_millis())
}

const fn default_passed() -> bool {
    true
}

/// Harvest input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionInput {
    /// Event ID override
    #[serde(default)]
    pub id: Option<String>,
    /// Timestamp override
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Collector identity
    #[serde(default)]
    pub collector_id: Option<String>,
    /// Collector display name
    pub collector_name: String,
    /// Species harvested
    pub species: String,
    /// Latitude
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Place name
    #[serde(default)]
    pub location_name: Option<String>,
    /// Moisture percent
    #[serde(default)]
    pub moisture: Option<f64>,
    /// Appearance
    #[serde(default)]
    pub appearance: Option<String>,
    /// Aroma
    #[serde(default)]
    pub aroma: Option<String>,
    /// Photo references
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Processing input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessingInput {
    /// Event ID override
    #[serde(default)]
    pub id: Option<String>,
    /// Timestamp override
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Processor identity
    #[serde(default)]
    pub processor_id: Option<String>,
    /// Processor display name
    pub processor_name: String,
    /// What was done
    #[serde(default)]
    pub step_type: StepType,
    /// Temperature in degrees Celsius
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Duration in hours (defaults to 24)
    #[serde(default)]
    pub duration: Option<f64>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Lab test input
#[derive(Debug, Clone, Deserialize)]
pub struct QualityTestInput {
    /// Event ID override
    #[serde(default)]
    pub id: Option<String>,
    /// Timestamp override
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Lab identity
    #[serde(default)]
    pub lab_id: Option<String>,
    /// Lab display name
    pub lab_name: String,
    /// What was tested
    #[serde(default)]
    pub test_type: TestType,
    /// Whether the sample passed
    #[serde(default = "default_passed")]
    pub passed: bool,
    /// Measured value
    #[serde(default)]
    pub value: Option<f64>,
    /// Unit of the value
    #[serde(default)]
    pub unit: Option<String>,
    /// Standard compared against
    #[serde(default)]
    pub standard: Option<String>,
    /// Certificate reference
    #[serde(default)]
    pub certificate_url: Option<String>,
}

/// Transfer input
#[derive(Debug, Clone, Deserialize)]
pub struct TransferInput {
    /// Event ID override
    #[serde(default)]
    pub id: Option<String>,
    /// Timestamp override
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Sending entity
    pub from_entity: String,
    /// Receiving entity
    pub to_entity: String,
    /// Type of the receiving entity
    pub entity_type: EntityType,
    /// Quantity handed over
    pub quantity: f64,
    /// Unit (defaults to kg)
    #[serde(default)]
    pub unit: Option<String>,
    /// Sender signature
    #[serde(default)]
    pub signature: Option<String>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Status endpoint response data
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusData {
    /// Batch counts by status
    pub batches: StatusCounts,
    /// Batches with no violations
    pub verified: usize,
    /// Number of approved zones
    pub zones: usize,
}

/// Batch count breakdown
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusCounts {
    /// Total number of batches
    pub total: usize,
    /// Harvested batches
    pub harvested: usize,
    /// Batches in processing
    pub processing: usize,
    /// Tested batches
    pub tested: usize,
    /// Manufactured batches
    pub manufactured: usize,
    /// Packaged batches
    pub packaged: usize,
    /// Distributed batches
    pub distributed: usize,
}

impl StatusCounts {
    /// Count one batch in the given status
    pub const fn add(&mut self, status: BatchStatus) {
        self.total += 1;
        match status {
            BatchStatus::Harvested => self.harvested += 1,
            BatchStatus::Processing => self.processing += 1,
            BatchStatus::Tested => self.tested += 1,
            BatchStatus::Manufactured => self.manufactured += 1,
            BatchStatus::Packaged => self.packaged += 1,
            BatchStatus::Distributed => self.distributed += 1,
        }
    }

    /// Batches not yet distributed
    #[must_use]
    pub const fn active(&self) -> usize {
        self.total - self.distributed
    }
}

/// Batch list endpoint response data
#[derive(Debug, Serialize)]
pub struct BatchesData {
    /// List of batches
    pub batches: Vec<BatchSummary>,
}

/// Single batch in a list
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    /// Batch ID
    pub id: String,
    /// Species label
    pub species: String,
    /// Common name from the herb catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// Lifecycle status
    pub status: BatchStatus,
    /// Harvest date
    pub harvest_date: NaiveDate,
    /// Quantity
    pub total_quantity: f64,
    /// Unit
    pub unit: String,
    /// Number of recorded events
    pub events: usize,
    /// Compliance score
    pub compliance_score: u8,
    /// Whether the batch has no violations
    pub valid: bool,
}

/// Batch detail endpoint response data
#[derive(Debug, Serialize)]
pub struct BatchDetailData {
    /// The batch with all events
    pub batch: Batch,
    /// Current verification
    pub verification: Verification,
    /// Catalog entry for the species, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub herb: Option<HerbInfo>,
}

/// Verification endpoint response data (also the QR landing view)
#[derive(Debug, Serialize)]
pub struct VerifyData {
    /// Batch ID that was looked up
    pub batch_id: String,
    /// Whether the batch exists
    pub found: bool,
    /// Lifecycle status, if found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BatchStatus>,
    /// Species, if found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Verification result
    pub verification: Verification,
}

/// Report endpoint response data
#[derive(Debug, Serialize)]
pub struct ReportData {
    /// The report
    pub report: ComplianceReport,
}

/// Timeline endpoint response data
#[derive(Debug, Serialize)]
pub struct TimelineData {
    /// Batch ID
    pub batch_id: String,
    /// Entries in chronological order
    pub entries: Vec<TimelineEntry>,
}

/// Map endpoint response data
#[derive(Debug, Serialize)]
pub struct MapData {
    /// Batch ID
    pub batch_id: String,
    /// Harvest points and center
    #[serde(flatten)]
    pub map: MapView,
}

/// QR endpoint response data
#[derive(Debug, Serialize)]
pub struct QrData {
    /// Batch ID
    pub batch_id: String,
    /// Payload to encode in the QR code
    pub payload: String,
}

/// Event mutation response data
#[derive(Debug, Serialize)]
pub struct EventRecordedData {
    /// Batch ID
    pub batch_id: String,
    /// Recorded event ID
    pub event_id: String,
    /// Event kind
    pub kind: EventKind,
    /// Batch status after the event
    pub status: BatchStatus,
}

/// Herb catalog response data
#[derive(Debug, Serialize)]
pub struct HerbsData {
    /// Known species
    pub herbs: Vec<HerbInfo>,
}

/// One supply-chain role and what it may write
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleInfo {
    /// Role identifier, as accepted by `--role`
    pub role: UserRole,
    /// Display title
    pub title: &'static str,
    /// Whether the role may open batches
    pub can_create_batch: bool,
    /// Whether the role is limited to reading
    pub read_only: bool,
    /// Event kinds the role may record
    pub records: &'static [&'static str],
}

impl From<UserRole> for RoleInfo {
    fn from(role: UserRole) -> Self {
        Self {
            role,
            title: role.title(),
            can_create_batch: role.can_create_batch(),
            read_only: role.is_read_only(),
            records: role.records(),
        }
    }
}

/// Roles response data
#[derive(Debug, Serialize)]
pub struct RolesData {
    /// Every role, in supply-chain order
    pub roles: Vec<RoleInfo>,
}
