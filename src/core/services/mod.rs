//! Business logic services
//!
//! Pure functions and orchestration with no direct I/O:
//!
//! - [`compliance`] - Geofence and certification scoring
//! - [`ledger`] - Batch creation and event recording over a store
//! - [`report`] - Certification report
//! - [`timeline`] - Provenance timeline and map points
//! - [`qr`] - QR payload generation and parsing

pub mod compliance;
pub mod ledger;
pub mod qr;
pub mod report;
pub mod timeline;

pub use compliance::{Verification, check_compliance, in_approved_zone, nearest_zone};
pub use ledger::{DEMO_SPECIES, Ledger, LedgerSettings};
pub use qr::{DEFAULT_VERIFY_BASE_URL, parse_scanned, verification_url};
pub use report::ComplianceReport;
pub use timeline::{MapPoint, MapView, TimelineEntry, build_timeline, map_view};
