//! Core domain logic for herbtrace
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Batch, Event, GeoPoint, UserRole)
//! - `services/` - Compliance scoring, ledger orchestration, timelines
//! - `ports/` - Trait definitions for external dependencies
//! - `error` - Typed ledger errors

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::LedgerError;
