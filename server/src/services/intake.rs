//! Appointment and contact-form intake.
//!
//! DESIGN
//! ======
//! Requests are validated into the backend's `New*` records before any
//! network call, so a rejected form never reaches the backend. Appointments
//! that name a lawyer must name an active one.

use backend::records::{
    APPOINTMENTS_TABLE, Appointment, AppointmentStatus, CONTACT_MESSAGES_TABLE, ContactMessage, NewAppointment,
    NewContactMessage,
};
use backend::{Backend, BackendError, from_row, normalize_email, to_row};
use serde::Deserialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::info;

use super::directory::{self, DirectoryError};

const MAX_NAME_LEN: usize = 200;
const MAX_FIELD_LEN: usize = 500;
const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{0}")]
    Validation(String),
    #[error("unknown lawyer: {0}")]
    UnknownLawyer(i64),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentRequest {
    pub lawyer_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_date: String,
    pub preferred_time: Option<String>,
    pub practice_area: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// VALIDATION
// =============================================================================

fn required(field: &str, value: &str, max: usize) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(IntakeError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(trimmed.to_owned())
}

fn optional(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, IntakeError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => required(field, v, max).map(Some),
    }
}

fn email(value: &str) -> Result<String, IntakeError> {
    normalize_email(value).ok_or_else(|| IntakeError::Validation("a valid email is required".into()))
}

/// Parse `YYYY-MM-DD` and reject dates before `today`.
fn preferred_date(value: &str, today: Date) -> Result<String, IntakeError> {
    let format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(value.trim(), &format)
        .map_err(|_| IntakeError::Validation("preferred_date must be YYYY-MM-DD".into()))?;
    if date < today {
        return Err(IntakeError::Validation("preferred_date is in the past".into()));
    }
    Ok(value.trim().to_owned())
}

/// Validate an appointment request against `today`.
///
/// # Errors
///
/// Returns [`IntakeError::Validation`] naming the first invalid field.
pub fn validate_appointment(req: &AppointmentRequest, today: Date) -> Result<NewAppointment, IntakeError> {
    Ok(NewAppointment {
        lawyer_id: req.lawyer_id,
        name: required("name", &req.name, MAX_NAME_LEN)?,
        email: email(&req.email)?,
        phone: optional("phone", req.phone.as_deref(), MAX_FIELD_LEN)?,
        preferred_date: preferred_date(&req.preferred_date, today)?,
        preferred_time: optional("preferred_time", req.preferred_time.as_deref(), MAX_FIELD_LEN)?,
        practice_area: optional("practice_area", req.practice_area.as_deref(), MAX_FIELD_LEN)?,
        message: optional("message", req.message.as_deref(), MAX_MESSAGE_LEN)?,
        status: AppointmentStatus::Pending,
    })
}

/// Validate a contact-form submission.
///
/// # Errors
///
/// Returns [`IntakeError::Validation`] naming the first invalid field.
pub fn validate_contact(req: &ContactRequest) -> Result<NewContactMessage, IntakeError> {
    Ok(NewContactMessage {
        name: required("name", &req.name, MAX_NAME_LEN)?,
        email: email(&req.email)?,
        phone: optional("phone", req.phone.as_deref(), MAX_FIELD_LEN)?,
        subject: optional("subject", req.subject.as_deref(), MAX_FIELD_LEN)?,
        message: required("message", &req.message, MAX_MESSAGE_LEN)?,
    })
}

// =============================================================================
// WRITES
// =============================================================================

async fn insert_one<T: serde::Serialize>(backend: &dyn Backend, table: &str, record: &T) -> Result<backend::Row, IntakeError> {
    let mut written = backend.insert(table, vec![to_row(record)?]).await?;
    written
        .pop()
        .ok_or_else(|| IntakeError::Backend(BackendError::decode(format!("insert into {table} returned no row"))))
}

/// Validate and store an appointment request.
pub async fn create_appointment(backend: &dyn Backend, req: &AppointmentRequest) -> Result<Appointment, IntakeError> {
    let today = OffsetDateTime::now_utc().date();
    let record = validate_appointment(req, today)?;

    if let Some(lawyer_id) = record.lawyer_id {
        match directory::get_lawyer(backend, lawyer_id).await {
            Ok(_) => {}
            Err(DirectoryError::NotFound(_)) => return Err(IntakeError::UnknownLawyer(lawyer_id)),
            Err(DirectoryError::Backend(e)) => return Err(e.into()),
        }
    }

    let row = insert_one(backend, APPOINTMENTS_TABLE, &record).await?;
    let appointment: Appointment = from_row(row)?;
    info!(appointment_id = %appointment.id, lawyer_id = ?appointment.request.lawyer_id, "appointment requested");
    Ok(appointment)
}

/// Validate and store a contact-form message.
pub async fn submit_contact(backend: &dyn Backend, req: &ContactRequest) -> Result<ContactMessage, IntakeError> {
    let record = validate_contact(req)?;
    let row = insert_one(backend, CONTACT_MESSAGES_TABLE, &record).await?;
    let message: ContactMessage = from_row(row)?;
    info!(message_id = %message.id, "contact message received");
    Ok(message)
}

#[cfg(test)]
#[path = "intake_test.rs"]
mod tests;
