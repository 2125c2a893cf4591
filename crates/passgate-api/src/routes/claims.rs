//! # Claims
//!
//! Routes:
//! - POST /v1/claims/allow-list: claim with an allow-list proof
//! - POST /v1/claims/open: claim during the open phase
//! - POST /v1/claims/check: check a proof without claiming
//! - GET  /v1/claims/{identity}: whether an identity has claimed

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use passgate_core::{Amount, Identity, TokenId};
use passgate_crypto::{ClaimTicket, ProofPath};

use crate::error::AppError;
use crate::extractors::{extract_json, parse_identity, Caller};
use crate::state::AppState;

/// Allow-list claim request.
#[derive(Debug, Deserialize)]
pub struct AllowListClaimRequest {
    /// Sibling hashes from the caller's leaf to the root.
    pub proof: ProofPath,
    /// Leaf position, required by indexed allow lists.
    #[serde(default)]
    pub index: Option<u64>,
    /// Payment attached to the claim.
    #[serde(default)]
    pub payment: Amount,
}

/// Open claim request.
#[derive(Debug, Deserialize)]
pub struct OpenClaimRequest {
    #[serde(default)]
    pub payment: Amount,
}

/// Proof check request. The identity checked is the caller.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub proof: ProofPath,
    #[serde(default)]
    pub index: Option<u64>,
}

/// An issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub token_id: TokenId,
    pub owner: Identity,
    pub token_uri: String,
}

/// Result of a proof check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub identity: Identity,
    pub eligible: bool,
}

/// Claim status of one identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimStatusResponse {
    pub identity: Identity,
    pub claimed: bool,
}

/// Build the claims router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/claims/allow-list", post(claim_allow_list))
        .route("/v1/claims/open", post(claim_open))
        .route("/v1/claims/check", post(check))
        .route("/v1/claims/{identity}", get(claim_status))
}

fn ticket(proof: ProofPath, index: Option<u64>) -> ClaimTicket {
    match index {
        Some(index) => ClaimTicket::indexed(proof, index),
        None => ClaimTicket::new(proof),
    }
}

/// POST /v1/claims/allow-list
async fn claim_allow_list(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<AllowListClaimRequest>, JsonRejection>,
) -> Result<Json<ClaimResponse>, AppError> {
    let req = extract_json(body)?;
    let ticket = ticket(req.proof, req.index);
    let response = state.gate.write(|gate| {
        let token_id = gate.claim_allow_list(caller, &ticket, req.payment)?;
        Ok::<_, AppError>(ClaimResponse {
            token_id,
            owner: caller,
            token_uri: gate.token_uri(token_id)?,
        })
    })?;
    Ok(Json(response))
}

/// POST /v1/claims/open
async fn claim_open(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<OpenClaimRequest>, JsonRejection>,
) -> Result<Json<ClaimResponse>, AppError> {
    let req = extract_json(body)?;
    let response = state.gate.write(|gate| {
        let token_id = gate.claim_open(caller, req.payment)?;
        Ok::<_, AppError>(ClaimResponse {
            token_id,
            owner: caller,
            token_uri: gate.token_uri(token_id)?,
        })
    })?;
    Ok(Json(response))
}

/// POST /v1/claims/check
///
/// Succeeds when the proof binds the caller to the root. Pause, phase
/// and claim state are not consulted; a bad proof is `INVALID_PROOF`.
async fn check(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, AppError> {
    let req = extract_json(body)?;
    let ticket = ticket(req.proof, req.index);
    state.gate.read(|gate| gate.check_redeem(&caller, &ticket))?;
    Ok(Json(CheckResponse {
        identity: caller,
        eligible: true,
    }))
}

/// GET /v1/claims/{identity}
async fn claim_status(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<ClaimStatusResponse>, AppError> {
    let identity = parse_identity(&identity)?;
    let claimed = state.gate.read(|gate| gate.has_claimed(&identity));
    Ok(Json(ClaimStatusResponse { identity, claimed }))
}
