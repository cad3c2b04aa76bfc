//! Lawyer directory routes.

use axum::extract::{Path, State};
use axum::response::Json;
use backend::records::Lawyer;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::services::directory;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct LawyersResponse {
    pub success: bool,
    pub lawyers: Vec<Lawyer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LawyerResponse {
    pub success: bool,
    pub lawyer: Lawyer,
}

/// `GET /api/lawyers`: active lawyers ordered by id.
pub async fn list_lawyers(State(state): State<AppState>) -> Result<Json<LawyersResponse>, ApiError> {
    let lawyers = directory::list_active_lawyers(state.backend.as_ref()).await?;
    Ok(Json(LawyersResponse { success: true, lawyers }))
}

/// `GET /api/lawyers/{id}`: one active lawyer.
pub async fn get_lawyer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LawyerResponse>, ApiError> {
    let lawyer = directory::get_lawyer(state.backend.as_ref(), id).await?;
    Ok(Json(LawyerResponse { success: true, lawyer }))
}

/// `GET /api/lawyers/referral/{code}`: one active lawyer by referral code.
pub async fn get_lawyer_by_referral(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LawyerResponse>, ApiError> {
    let lawyer = directory::get_lawyer_by_referral(state.backend.as_ref(), &code).await?;
    Ok(Json(LawyerResponse { success: true, lawyer }))
}

#[cfg(test)]
#[path = "lawyers_test.rs"]
mod tests;
