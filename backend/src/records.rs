//! Site records persisted in the hosted backend.
//!
//! Column lists here are the schema the CLI migrations create and the
//! in-memory backend registers; keep them in step with `cli/migrations`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// TABLES
// =============================================================================

pub const LAWYERS_TABLE: &str = "lawyers";
pub const ADMIN_USERS_TABLE: &str = "admin_users";
pub const APPOINTMENTS_TABLE: &str = "appointments";
pub const CONTACT_MESSAGES_TABLE: &str = "contact_messages";

pub const LAWYER_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "phone",
    "title",
    "practice_areas",
    "bio",
    "years_experience",
    "status",
    "image_url",
    "referral_code",
    "created_at",
];

pub const ADMIN_USER_COLUMNS: &[&str] = &["user_id", "email", "created_at"];

pub const APPOINTMENT_COLUMNS: &[&str] = &[
    "id",
    "lawyer_id",
    "name",
    "email",
    "phone",
    "preferred_date",
    "preferred_time",
    "practice_area",
    "message",
    "status",
    "created_at",
];

pub const CONTACT_MESSAGE_COLUMNS: &[&str] = &["id", "name", "email", "phone", "subject", "message", "created_at"];

// =============================================================================
// LAWYER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LawyerStatus {
    Active,
    Inactive,
}

impl LawyerStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A directory entry. `id` is the roster's external identifier and the
/// upsert conflict key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lawyer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    #[serde(default)]
    pub practice_areas: Vec<String>,
    pub bio: String,
    pub years_experience: i32,
    pub status: LawyerStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    pub referral_code: String,
}

// =============================================================================
// ADMIN LINK
// =============================================================================

/// Marks an auth identity as a site administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLink {
    pub user_id: Uuid,
    pub email: String,
}

// =============================================================================
// INTAKE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Appointment request as written to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub lawyer_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`.
    pub preferred_date: String,
    pub preferred_time: Option<String>,
    pub practice_area: Option<String>,
    pub message: Option<String>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: NewAppointment,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: NewContactMessage,
    #[serde(default)]
    pub created_at: Option<String>,
}
