//! Participant roles
//!
//! Each role may write only the events it is responsible for.

use serde::{Deserialize, Serialize};

use super::event::{Event, StepType};

/// A participant role in the supply chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Harvests wild or cultivated herbs
    Farmer,
    /// Dries, grinds and stores raw material
    Processor,
    /// Runs quality tests and issues certificates
    Lab,
    /// Packages product and hands it on
    Manufacturer,
    /// Audits batches and compliance reports
    Regulator,
    /// Verifies a product by its QR code
    Consumer,
}

impl UserRole {
    /// All roles, in supply-chain order
    pub const ALL: [Self; 6] = [
        Self::Farmer,
        Self::Processor,
        Self::Lab,
        Self::Manufacturer,
        Self::Regulator,
        Self::Consumer,
    ];

    /// Human-readable title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer/Collector",
            Self::Processor => "Processor",
            Self::Lab => "Testing Lab",
            Self::Manufacturer => "Manufacturer",
            Self::Regulator => "Regulator",
            Self::Consumer => "Consumer",
        }
    }

    /// Whether this role may open a new batch
    #[must_use]
    pub const fn can_create_batch(self) -> bool {
        matches!(self, Self::Farmer)
    }

    /// Whether this role may append the given event
    #[must_use]
    pub fn permits(self, event: &Event) -> bool {
        match (self, event) {
            (Self::Farmer, Event::Collection(_))
            | (Self::Processor, Event::Processing(_))
            | (Self::Lab, Event::QualityTest(_))
            | (Self::Manufacturer, Event::Transfer(_)) => true,
            (Self::Manufacturer, Event::Processing(step)) => {
                matches!(step.step_type, StepType::Packaging)
            },
            _ => false,
        }
    }

    /// Whether this role has any write access
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Regulator | Self::Consumer)
    }

    /// Event kinds this role may record, as shown to users
    #[must_use]
    pub const fn records(self) -> &'static [&'static str] {
        match self {
            Self::Farmer => &["collection"],
            Self::Processor => &["processing"],
            Self::Lab => &["quality_test"],
            Self::Manufacturer => &["processing (packaging)", "transfer"],
            Self::Regulator | Self::Consumer => &[],
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Farmer => write!(f, "farmer"),
            Self::Processor => write!(f, "processor"),
            Self::Lab => write!(f, "lab"),
            Self::Manufacturer => write!(f, "manufacturer"),
            Self::Regulator => write!(f, "regulator"),
            Self::Consumer => write!(f, "consumer"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "farmer" | "collector" => Ok(Self::Farmer),
            "processor" => Ok(Self::Processor),
            "lab" => Ok(Self::Lab),
            "manufacturer" => Ok(Self::Manufacturer),
            "regulator" => Ok(Self::Regulator),
            "consumer" => Ok(Self::Consumer),
            _ => Err(format!(
                "Invalid role: {s}. Use: farmer, processor, lab, manufacturer, regulator, consumer"
            )),
        }
    }
}
