//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients (the CLI).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take a ledger and typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    create_batch, get_batch, get_map, get_qr, get_report, get_status, get_timeline, list_batches,
    list_batches_with_status, list_herbs, list_roles, record_event, scan, seed_demo, verify_batch,
};
pub use types::{
    ApiResponse, BatchDetailData, BatchSummary, BatchesData, CollectionInput, CreateBatchRequest,
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, EventInput, EventRecordedData, HerbsData, MapData,
    ProcessingInput, QrData, QualityTestInput, RecordEventRequest, ReportData, RoleInfo, RolesData,
    ScanRequest,
    StatusCounts, StatusData, TimelineData, TransferInput, VerifyData,
};
