//! herbtrace - Traceability ledger for Ayurvedic herb batches
//!
//! Records the life of a herb batch from harvest through processing, lab
//! testing and custody transfers, and verifies each batch against geofenced
//! harvest zones and mandatory-evidence rules.
//!
//! ## Layout
//!
//! - [`core`] - Domain models, the [`core::ports::BatchStore`] port and services
//! - [`adapters`] - In-memory and JSON file stores
//! - [`api`] - HTTP-agnostic handlers shared by the CLI and the web server
//! - [`config`] - `herbtrace.toml` loading
//! - [`output`] - Human and JSON rendering

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
