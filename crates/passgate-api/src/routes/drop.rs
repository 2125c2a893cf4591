//! # Drop Queries
//!
//! Read-only views of the drop and its tokens.
//!
//! Routes:
//! - GET /v1/drop: status snapshot
//! - GET /v1/tokens/{token_id}: owner and metadata URI
//! - GET /v1/tokens/by-index/{index}: the token at a global position
//! - GET /v1/owners/{identity}/tokens: an owner's tokens
//! - GET /v1/events: accepted operations, oldest first

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use passgate_core::{Identity, TokenId};
use passgate_issuance::{DropStatus, GateError, GateEvent};

use crate::error::AppError;
use crate::extractors::parse_identity;
use crate::state::{AppState, ServedGate};

/// One issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token_id: TokenId,
    pub owner: Identity,
    pub token_uri: String,
}

/// Tokens held by one owner, in mint order.
#[derive(Debug, Serialize, Deserialize)]
pub struct HoldingsResponse {
    pub owner: Identity,
    pub balance: u64,
    pub tokens: Vec<TokenId>,
}

/// Build the drop query router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/drop", get(status))
        .route("/v1/tokens/{token_id}", get(token))
        .route("/v1/tokens/by-index/{index}", get(token_by_index))
        .route("/v1/owners/{identity}/tokens", get(holdings))
        .route("/v1/events", get(events))
}

fn describe(gate: &ServedGate, token_id: TokenId) -> Result<TokenResponse, GateError> {
    Ok(TokenResponse {
        token_id,
        owner: gate.owner_of(token_id)?,
        token_uri: gate.token_uri(token_id)?,
    })
}

/// GET /v1/drop
async fn status(State(state): State<AppState>) -> Json<DropStatus> {
    Json(state.gate.read(|gate| gate.status()))
}

/// GET /v1/tokens/{token_id}
async fn token(
    State(state): State<AppState>,
    Path(token_id): Path<u64>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = state.gate.read(|gate| describe(gate, TokenId(token_id)))?;
    Ok(Json(response))
}

/// GET /v1/tokens/by-index/{index}
async fn token_by_index(
    State(state): State<AppState>,
    Path(index): Path<u64>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = state.gate.read(|gate| {
        let token_id = gate.token_by_index(index)?;
        describe(gate, token_id)
    })?;
    Ok(Json(response))
}

/// GET /v1/owners/{identity}/tokens
async fn holdings(
    State(state): State<AppState>,
    Path(identity): Path<String>,
) -> Result<Json<HoldingsResponse>, AppError> {
    let owner = parse_identity(&identity)?;
    let response = state.gate.read(|gate| {
        let balance = gate.balance_of(&owner);
        let tokens = (0..balance)
            .map(|i| gate.token_of_owner_by_index(&owner, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok::<_, GateError>(HoldingsResponse {
            owner,
            balance,
            tokens,
        })
    })?;
    Ok(Json(response))
}

/// GET /v1/events
async fn events(State(state): State<AppState>) -> Json<Vec<GateEvent>> {
    Json(state.gate.read(|gate| gate.events().to_vec()))
}
