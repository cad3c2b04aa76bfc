//! Appointment and contact-form routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use backend::records::{Appointment, ContactMessage};
use serde::Serialize;

use super::error::ApiError;
use crate::services::intake::{self, AppointmentRequest, ContactRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub success: bool,
    pub appointment: Appointment,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub contact: ContactMessage,
}

/// `POST /api/appointments`: request a consultation.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(body): Json<AppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), ApiError> {
    let appointment = intake::create_appointment(state.backend.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(AppointmentResponse { success: true, appointment })))
}

/// `POST /api/contact`: submit the contact form.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let contact = intake::submit_contact(state.backend.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(ContactResponse { success: true, contact })))
}

#[cfg(test)]
#[path = "intake_test.rs"]
mod tests;
