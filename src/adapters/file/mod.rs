//! File-based batch storage
//!
//! Implements `BatchStore` using a single JSON ledger file.

mod store;

pub use store::JsonFileStore;
