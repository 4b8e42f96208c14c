//! Ledger failures as API errors
//!
//! Every [`LedgerError`] maps onto one [`ErrorCode`], which fixes the HTTP
//! status a server sends back. Handlers return [`ApiError`] so the CLI and
//! the server report the same failure the same way.

use serde::Serialize;

use crate::core::LedgerError;

/// Failure category, one per HTTP status the API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No batch with the requested ID (404)
    NotFound,
    /// Malformed body, bad coordinates or quantities, unreadable QR payload (400)
    BadRequest,
    /// The acting role may not record this event or open a batch (403)
    Forbidden,
    /// The ledger store failed (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this category
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    /// Code string carried in the response envelope
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// A failed ledger request
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Category, which decides the HTTP status
    pub code: ErrorCode,
    /// Message shown to the caller
    pub message: String,
}

impl ApiError {
    /// Error of the given category
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Request the ledger could not act on as sent
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::BatchNotFound(_) => ErrorCode::NotFound,
            LedgerError::RoleNotPermitted { .. } | LedgerError::CreateNotPermitted(_) => {
                ErrorCode::Forbidden
            },
            LedgerError::InvalidQuantity(_)
            | LedgerError::InvalidCoordinates { .. }
            | LedgerError::InvalidPayload(_)
            | LedgerError::EmptyField(_) => ErrorCode::BadRequest,
            LedgerError::Store(_) => ErrorCode::Internal,
        };
        Self::new(code, err.to_string())
    }
}

/// Error body inside a failed response envelope
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// Code string, e.g. `FORBIDDEN`
    pub code: String,
    /// Message shown to the caller
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
