//! Domain errors for the ledger

use thiserror::Error;

use super::models::{EventKind, UserRole};

/// Errors raised while recording or reading ledger state
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No batch exists with the given ID
    #[error("batch not found: {0}")]
    BatchNotFound(String),

    /// The role may not record this kind of event
    #[error("role '{role}' is not permitted to record {kind} events")]
    RoleNotPermitted {
        /// Role that attempted the write
        role: UserRole,
        /// Kind of event that was rejected
        kind: EventKind,
    },

    /// The role may not create batches
    #[error("role '{0}' is not permitted to create batches")]
    CreateNotPermitted(UserRole),

    /// Quantity was zero, negative or not finite
    #[error("invalid quantity: {0}")]
    InvalidQuantity(f64),

    /// Coordinates were not finite or out of range
    #[error("invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },

    /// A scanned payload did not contain a batch ID
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A required text field was blank
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
