//! Supply-chain events
//!
//! Every entry appended to a batch is one variant of [`Event`]. The variant
//! is carried explicitly in the serialized form as a `kind` tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use crate::core::error::LedgerError;

/// Discriminant of an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Harvest at a GPS location
    Collection,
    /// Drying, grinding, storage or packaging
    Processing,
    /// Laboratory test
    QualityTest,
    /// Custody handover between entities
    Transfer,
}

impl EventKind {
    /// Prefix used for generated event IDs
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Processing => "processing",
            Self::QualityTest => "quality",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Processing => write!(f, "processing"),
            Self::QualityTest => write!(f, "quality test"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// A recorded event on a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Harvest record
    Collection(CollectionEvent),
    /// Processing step
    Processing(ProcessingStep),
    /// Lab test result
    QualityTest(QualityTest),
    /// Custody transfer
    Transfer(Transfer),
}

impl Event {
    /// The event's discriminant
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Collection(_) => EventKind::Collection,
            Self::Processing(_) => EventKind::Processing,
            Self::QualityTest(_) => EventKind::QualityTest,
            Self::Transfer(_) => EventKind::Transfer,
        }
    }

    /// Event ID
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Collection(e) => &e.id,
            Self::Processing(e) => &e.id,
            Self::QualityTest(e) => &e.id,
            Self::Transfer(e) => &e.id,
        }
    }

    /// When the event happened
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Collection(e) => e.timestamp,
            Self::Processing(e) => e.timestamp,
            Self::QualityTest(e) => e.timestamp,
            Self::Transfer(e) => e.timestamp,
        }
    }

    /// Collector identity, present only on harvest records
    #[must_use]
    pub fn collector_id(&self) -> Option<&str> {
        match self {
            Self::Collection(e) => Some(&e.collector_id),
            _ => None,
        }
    }

    /// Lab identity, present only on test results
    #[must_use]
    pub fn lab_id(&self) -> Option<&str> {
        match self {
            Self::QualityTest(e) => Some(&e.lab_id),
            _ => None,
        }
    }

    /// Harvest location, present only on harvest records
    #[must_use]
    pub const fn gps_location(&self) -> Option<GeoPoint> {
        match self {
            Self::Collection(e) => Some(e.gps_location),
            _ => None,
        }
    }

    /// Reject events with malformed numeric fields
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.id().trim().is_empty() {
            return Err(LedgerError::EmptyField("event id"));
        }
        match self {
            Self::Collection(e) => {
                e.gps_location.validate()?;
                if e.collector_id.trim().is_empty() {
                    return Err(LedgerError::EmptyField("collector id"));
                }
            },
            Self::Processing(e) => {
                if !e.duration.is_finite() || e.duration < 0.0 {
                    return Err(LedgerError::InvalidQuantity(e.duration));
                }
            },
            Self::QualityTest(e) => {
                if e.lab_id.trim().is_empty() {
                    return Err(LedgerError::EmptyField("lab id"));
                }
            },
            Self::Transfer(e) => {
                if !e.quantity.is_finite() || e.quantity <= 0.0 {
                    return Err(LedgerError::InvalidQuantity(e.quantity));
                }
            },
        }
        Ok(())
    }
}

/// Subjective quality notes taken at harvest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Moisture content in percent
    pub moisture: f64,
    /// Visual appearance
    pub appearance: String,
    /// Aroma
    pub aroma: String,
}

/// Harvest of raw herbs at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEvent {
    /// Event ID
    pub id: String,
    /// Harvest time
    pub timestamp: DateTime<Utc>,
    /// Collector identity
    pub collector_id: String,
    /// Collector display name
    pub collector_name: String,
    /// Species harvested
    pub species: String,
    /// Where the harvest happened
    pub gps_location: GeoPoint,
    /// Human-readable place name
    pub location_name: String,
    /// Quality at harvest
    pub quality_metrics: QualityMetrics,
    /// Photo references
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Kind of processing performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    /// Drying
    #[default]
    Drying,
    /// Grinding to powder
    Grinding,
    /// Storage
    Storage,
    /// Final packaging
    Packaging,
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drying => write!(f, "drying"),
            Self::Grinding => write!(f, "grinding"),
            Self::Storage => write!(f, "storage"),
            Self::Packaging => write!(f, "packaging"),
        }
    }
}

impl std::str::FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drying" => Ok(Self::Drying),
            "grinding" => Ok(Self::Grinding),
            "storage" => Ok(Self::Storage),
            "packaging" => Ok(Self::Packaging),
            _ => Err(format!("Invalid step type: {s}. Use: drying, grinding, storage, packaging")),
        }
    }
}

/// A processing step applied to a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    /// Event ID
    pub id: String,
    /// When the step was logged
    pub timestamp: DateTime<Utc>,
    /// Processor identity
    pub processor_id: String,
    /// Processor display name
    pub processor_name: String,
    /// What was done
    pub step_type: StepType,
    /// Temperature in degrees Celsius, if controlled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Duration in hours
    pub duration: f64,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

/// Kind of laboratory test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Moisture content
    #[default]
    Moisture,
    /// Pesticide residue
    Pesticide,
    /// DNA barcoding for species authentication
    Dna,
    /// Heavy metal contamination
    HeavyMetals,
    /// Microbial load
    Microbial,
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moisture => write!(f, "moisture"),
            Self::Pesticide => write!(f, "pesticide"),
            Self::Dna => write!(f, "dna"),
            Self::HeavyMetals => write!(f, "heavy_metals"),
            Self::Microbial => write!(f, "microbial"),
        }
    }
}

impl std::str::FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "moisture" => Ok(Self::Moisture),
            "pesticide" => Ok(Self::Pesticide),
            "dna" => Ok(Self::Dna),
            "heavy_metals" => Ok(Self::HeavyMetals),
            "microbial" => Ok(Self::Microbial),
            _ => Err(format!(
                "Invalid test type: {s}. Use: moisture, pesticide, dna, heavy_metals, microbial"
            )),
        }
    }
}

/// Measured outcome of a lab test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResults {
    /// Whether the sample met the standard
    pub passed: bool,
    /// Measured value
    pub value: f64,
    /// Unit of the measured value
    pub unit: String,
    /// Standard the value was compared against
    pub standard: String,
}

/// A laboratory test on a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityTest {
    /// Event ID
    pub id: String,
    /// When the test was reported
    pub timestamp: DateTime<Utc>,
    /// Lab identity
    pub lab_id: String,
    /// Lab display name
    pub lab_name: String,
    /// What was tested
    pub test_type: TestType,
    /// Outcome
    pub results: TestResults,
    /// Certificate reference, if issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

/// Type of the receiving party in a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Farmer or collector
    Farmer,
    /// Processor
    Processor,
    /// Testing lab
    Lab,
    /// Manufacturer
    Manufacturer,
    /// Retail outlet
    Retailer,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Farmer => write!(f, "farmer"),
            Self::Processor => write!(f, "processor"),
            Self::Lab => write!(f, "lab"),
            Self::Manufacturer => write!(f, "manufacturer"),
            Self::Retailer => write!(f, "retailer"),
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "farmer" => Ok(Self::Farmer),
            "processor" => Ok(Self::Processor),
            "lab" => Ok(Self::Lab),
            "manufacturer" => Ok(Self::Manufacturer),
            "retailer" => Ok(Self::Retailer),
            _ => Err(format!(
                "Invalid entity type: {s}. Use: farmer, processor, lab, manufacturer, retailer"
            )),
        }
    }
}

/// Custody handover between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Event ID
    pub id: String,
    /// When custody changed
    pub timestamp: DateTime<Utc>,
    /// Sending entity
    pub from_entity: String,
    /// Receiving entity
    pub to_entity: String,
    /// Type of the receiving entity
    pub entity_type: EntityType,
    /// Quantity handed over
    pub quantity: f64,
    /// Unit of the quantity
    pub unit: String,
    /// Signature of the sender
    #[serde(default)]
    pub signature: String,
}
