//! # Custom Extractors
//!
//! The caller identity header and a JSON body helper that maps
//! deserialization failures to [`AppError::BadRequest`].

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::Json;

use passgate_core::Identity;

use crate::error::AppError;

/// Header carrying the caller's identity.
///
/// The service trusts whatever sits in front of it to have authenticated
/// the caller; the gate only checks which roles that identity holds.
pub const CALLER_HEADER: &str = "x-passgate-caller";

/// The identity on whose behalf a request acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_HEADER)
            .ok_or_else(|| AppError::Unauthenticated(format!("missing {CALLER_HEADER} header")))?;
        let text = raw
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("{CALLER_HEADER} is not valid text")))?;
        Ok(Self(Identity::from_hex(text.trim())?))
    }
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Parse an identity taken from a path segment.
pub fn parse_identity(raw: &str) -> Result<Identity, AppError> {
    Ok(Identity::from_hex(raw)?)
}
