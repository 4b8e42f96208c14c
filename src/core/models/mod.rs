//! Domain models for herbtrace
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Batch`] - A harvest lot and its ordered events
//! - [`Event`] - Collection, processing, quality test or transfer
//! - [`GeoPoint`] / [`ApprovedZone`] - GPS points and geofences
//! - [`UserRole`] - Who may record what
//! - [`HerbInfo`] - Reference data for known species

mod batch;
mod event;
mod geo;
pub mod herb;
mod ids;
mod role;

pub use batch::{Batch, BatchStatus, DEFAULT_UNIT};
pub use event::{
    CollectionEvent, EntityType, Event, EventKind, ProcessingStep, QualityMetrics, QualityTest,
    StepType, TestResults, TestType, Transfer,
};
pub use geo::{ApprovedZone, EARTH_RADIUS_M, GeoPoint, default_zones, haversine_distance};
pub use herb::HerbInfo;
pub use ids::{BATCH_ID_PREFIX, generate_batch_id, generate_event_id, random_base36};
pub use role::UserRole;
