//! Auth identities as seen through the admin API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Backend, BackendError};

/// An authentication identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Admin-API payload for creating an identity.
#[derive(Debug, Clone, Serialize)]
pub struct NewAuthUser {
    pub email: String,
    pub password: String,
    /// Mark the email confirmed so no verification mail is sent.
    pub email_confirm: bool,
}

/// Trim and lower-case an email, rejecting anything without exactly one `@`
/// separating two non-empty parts.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Find an identity whose email matches `email`, ignoring case and
/// surrounding whitespace.
///
/// # Errors
///
/// Returns the backend error if the identity list cannot be read.
pub async fn find_auth_user_by_email(backend: &dyn Backend, email: &str) -> Result<Option<AuthUser>, BackendError> {
    let wanted = email.trim();
    let users = backend.list_auth_users().await?;
    Ok(users.into_iter().find(|u| {
        u.email
            .as_deref()
            .is_some_and(|e| e.trim().eq_ignore_ascii_case(wanted))
    }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
