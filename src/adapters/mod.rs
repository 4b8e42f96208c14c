//! Adapter implementations for port traits
//!
//! This module contains concrete implementations of [`BatchStore`]:
//!
//! - `memory` - Process-lifetime map, lost on exit
//! - `file/` - JSON ledger file, kept between CLI invocations
//!
//! [`BatchStore`]: crate::core::ports::BatchStore

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryBatchStore;
