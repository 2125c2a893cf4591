//! # passgate-api: HTTP Service
//!
//! Serves one drop over HTTP, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `/v1/drop`, `/v1/tokens/*`, `/v1/owners/*`, `/v1/events`: queries
//! - `/v1/claims/*`: allow-list and open claims, proof checks
//! - `/v1/admin/*`: phase, pause, payouts, metadata, admin handover
//! - `/health/liveness`: unauthenticated probe
//!
//! ## Callers
//!
//! Mutating routes read the caller from the `x-passgate-caller` header
//! (see [`extractors::Caller`]). Role checks happen inside the gate, so a
//! request from the wrong identity is refused with `UNAUTHORIZED` and the
//! same status a direct library call would report.
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers; they delegate to the gate.
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::drop::router())
        .merge(routes::claims::router())
        .merge(routes::admin::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new().route("/health/liveness", axum::routing::get(liveness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}
