//! # Administration
//!
//! Every route here needs a caller. The gate decides whether that caller
//! holds the role the operation requires.
//!
//! Routes:
//! - POST /v1/admin/open-mint: activate the open phase
//! - POST /v1/admin/end: end all minting
//! - POST /v1/admin/pause, /v1/admin/unpause
//! - POST /v1/admin/withdraw: pay the balance to the beneficiary
//! - POST /v1/admin/recover: pay the balance to the admin while paused
//! - PUT  /v1/admin/base-uri: replace the metadata prefix
//! - PUT  /v1/admin/admin: hand the admin role to another identity

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use passgate_core::Identity;
use passgate_issuance::Payout;
use passgate_state::{MintPhase, MintStage};

use crate::error::AppError;
use crate::extractors::{extract_json, Caller};
use crate::state::AppState;

/// Phase after a stage change.
#[derive(Debug, Serialize, Deserialize)]
pub struct StageResponse {
    pub phase: MintPhase,
    pub stage: MintStage,
}

/// Pause flag after a pause or unpause.
#[derive(Debug, Serialize, Deserialize)]
pub struct PauseResponse {
    pub paused: bool,
}

/// New metadata prefix.
#[derive(Debug, Serialize, Deserialize)]
pub struct BaseUriRequest {
    pub base_uri: String,
}

/// Incoming administrator.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminRequest {
    pub admin: Identity,
}

/// Build the administration router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/open-mint", post(activate_open_mint))
        .route("/v1/admin/end", post(end_all_minting))
        .route("/v1/admin/pause", post(pause))
        .route("/v1/admin/unpause", post(unpause))
        .route("/v1/admin/withdraw", post(withdraw))
        .route("/v1/admin/recover", post(recover_funds))
        .route("/v1/admin/base-uri", put(set_base_uri))
        .route("/v1/admin/admin", put(transfer_admin))
}

/// POST /v1/admin/open-mint
async fn activate_open_mint(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<StageResponse>, AppError> {
    let response = state.gate.write(|gate| {
        let phase = gate.activate_open_mint(caller)?;
        Ok::<_, AppError>(StageResponse {
            phase,
            stage: gate.stage(),
        })
    })?;
    Ok(Json(response))
}

/// POST /v1/admin/end
async fn end_all_minting(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<StageResponse>, AppError> {
    let response = state.gate.write(|gate| {
        let phase = gate.end_all_minting(caller)?;
        Ok::<_, AppError>(StageResponse {
            phase,
            stage: gate.stage(),
        })
    })?;
    Ok(Json(response))
}

/// POST /v1/admin/pause
async fn pause(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<PauseResponse>, AppError> {
    state.gate.write(|gate| gate.pause(caller))?;
    Ok(Json(PauseResponse { paused: true }))
}

/// POST /v1/admin/unpause
async fn unpause(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<PauseResponse>, AppError> {
    state.gate.write(|gate| gate.unpause(caller))?;
    Ok(Json(PauseResponse { paused: false }))
}

/// POST /v1/admin/withdraw
async fn withdraw(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Payout>, AppError> {
    let payout = state.gate.write(|gate| gate.withdraw(caller))?;
    Ok(Json(payout))
}

/// POST /v1/admin/recover
async fn recover_funds(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Payout>, AppError> {
    let payout = state.gate.write(|gate| gate.recover_funds(caller))?;
    Ok(Json(payout))
}

/// PUT /v1/admin/base-uri
async fn set_base_uri(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<BaseUriRequest>, JsonRejection>,
) -> Result<Json<BaseUriRequest>, AppError> {
    let req = extract_json(body)?;
    let base_uri = state.gate.write(|gate| {
        gate.set_base_uri(caller, req.base_uri)?;
        Ok::<_, AppError>(gate.base_uri().to_string())
    })?;
    Ok(Json(BaseUriRequest { base_uri }))
}

/// PUT /v1/admin/admin
async fn transfer_admin(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<AdminRequest>, JsonRejection>,
) -> Result<Json<AdminRequest>, AppError> {
    let req = extract_json(body)?;
    state.gate.write(|gate| gate.transfer_admin(caller, req.admin))?;
    Ok(Json(AdminRequest { admin: req.admin }))
}
