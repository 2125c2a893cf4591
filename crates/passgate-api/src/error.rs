//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Gate refusals keep their stable code; the HTTP status groups them:
//!
//! | Status | Codes |
//! |--------|-------|
//! | 403 | `UNAUTHORIZED`, `INVALID_PROOF` |
//! | 404 | `NONEXISTENT_TOKEN`, `INDEX_OUT_OF_BOUNDS` |
//! | 409 | pause, phase, ledger and supply refusals |
//! | 422 | `WRONG_PAYMENT_AMOUNT` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use passgate_issuance::GateError;
use passgate_registry::RegistryError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "ALREADY_CLAIMED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The gate refused the operation.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Request could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No caller identity supplied (401).
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Gate(err) => (gate_status(err), err.code()),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        }
    }
}

fn gate_status(err: &GateError) -> StatusCode {
    match err {
        GateError::Unauthorized(_) | GateError::InvalidProof => StatusCode::FORBIDDEN,
        GateError::WrongPaymentAmount { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        GateError::Registry(
            RegistryError::NonexistentToken(_)
            | RegistryError::IndexOutOfBounds { .. }
            | RegistryError::OwnerIndexOutOfBounds { .. },
        ) => StatusCode::NOT_FOUND,
        GateError::Guard(_)
        | GateError::Phase(_)
        | GateError::Ledger(_)
        | GateError::BalanceOverflow
        | GateError::Registry(RegistryError::IdSpaceExhausted) => StatusCode::CONFLICT,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        tracing::debug!(status = status.as_u16(), code, "request refused");

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<passgate_core::ValidationError> for AppError {
    fn from(err: passgate_core::ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<passgate_crypto::CryptoError> for AppError {
    fn from(err: passgate_crypto::CryptoError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
