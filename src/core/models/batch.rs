//! Batch model
//!
//! A batch is one harvest lot followed through the supply chain. Its status
//! only ever moves forward as events are appended.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::{EntityType, Event, StepType};

/// Default unit for batch quantities
pub const DEFAULT_UNIT: &str = "kg";

/// Lifecycle stage of a batch, in supply-chain order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Collected from the field
    #[default]
    Harvested,
    /// Undergoing drying, grinding or storage
    Processing,
    /// Lab-tested
    Tested,
    /// Handed to a manufacturer
    Manufactured,
    /// Packaged for sale
    Packaged,
    /// Delivered to retail
    Distributed,
}

impl BatchStatus {
    /// Status implied by a single event, if it implies one
    #[must_use]
    pub const fn implied_by(event: &Event) -> Option<Self> {
        match event {
            Event::Collection(_) => Some(Self::Harvested),
            Event::Processing(step) => match step.step_type {
                StepType::Packaging => Some(Self::Packaged),
                StepType::Drying | StepType::Grinding | StepType::Storage => {
                    Some(Self::Processing)
                },
            },
            Event::QualityTest(_) => Some(Self::Tested),
            Event::Transfer(t) => match t.entity_type {
                EntityType::Manufacturer => Some(Self::Manufactured),
                EntityType::Retailer => Some(Self::Distributed),
                EntityType::Farmer | EntityType::Processor | EntityType::Lab => None,
            },
        }
    }

    /// Status after applying an event; never earlier than `self`
    #[must_use]
    pub fn advance(self, event: &Event) -> Self {
        Self::implied_by(event).map_or(self, |implied| self.max(implied))
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Harvested => write!(f, "harvested"),
            Self::Processing => write!(f, "processing"),
            Self::Tested => write!(f, "tested"),
            Self::Manufactured => write!(f, "manufactured"),
            Self::Packaged => write!(f, "packaged"),
            Self::Distributed => write!(f, "distributed"),
        }
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "harvested" => Ok(Self::Harvested),
            "processing" => Ok(Self::Processing),
            "tested" => Ok(Self::Tested),
            "manufactured" => Ok(Self::Manufactured),
            "packaged" => Ok(Self::Packaged),
            "distributed" => Ok(Self::Distributed),
            _ => Err(format!(
                "Invalid status: {s}. Use: harvested, processing, tested, manufactured, packaged, distributed"
            )),
        }
    }
}

/// A traceable lot of herbs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Batch ID (e.g. `ASH-1705300200000-k3j9x0q2m`)
    pub id: String,
    /// Species label
    pub species: String,
    /// Date of harvest
    pub harvest_date: NaiveDate,
    /// Total quantity at creation
    pub total_quantity: f64,
    /// Unit of the quantity
    pub unit: String,
    /// Current lifecycle status
    pub status: BatchStatus,
    /// Payload encoded in the batch's QR code
    pub qr_code: String,
    /// Events in append order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Batch {
    /// Create an empty batch in the `harvested` state
    #[must_use]
    pub fn new(
        id: String,
        species: String,
        harvest_date: NaiveDate,
        total_quantity: f64,
        qr_code: String,
    ) -> Self {
        Self {
            id,
            species,
            harvest_date,
            total_quantity,
            unit: DEFAULT_UNIT.to_string(),
            status: BatchStatus::Harvested,
            qr_code,
            events: Vec::new(),
        }
    }

    /// Append an event and advance the status
    pub fn push_event(&mut self, event: Event) {
        self.status = self.status.advance(&event);
        self.events.push(event);
    }
}
