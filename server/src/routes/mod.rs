//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API the site's pages call: the lawyer
//! directory, appointment and contact intake, and a health check.

pub mod error;
pub mod intake;
pub mod lawyers;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the API router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/lawyers", get(lawyers::list_lawyers))
        .route("/api/lawyers/{id}", get(lawyers::get_lawyer))
        .route("/api/lawyers/referral/{code}", get(lawyers::get_lawyer_by_referral))
        .route("/api/appointments", post(intake::create_appointment))
        .route("/api/contact", post(intake::submit_contact))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
