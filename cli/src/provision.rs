//! Admin provisioning.
//!
//! DESIGN
//! ======
//! Two idempotent steps. First make sure an auth identity exists for the
//! admin email: create it, or when the auth service reports it already
//! exists, find it by a case-insensitive email scan. Then upsert the
//! `admin_users` link keyed on `user_id`. Re-running against a provisioned
//! backend changes nothing and still succeeds.

use backend::records::{ADMIN_USERS_TABLE, AdminLink};
use backend::{
    AuthUser, Backend, BackendError, ErrorKind, NewAuthUser, find_auth_user_by_email, normalize_email, to_row,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityOutcome {
    Created,
    Existing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Upserted,
    AlreadyLinked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminReport {
    pub user_id: Uuid,
    pub email: String,
    pub identity: IdentityOutcome,
    pub link: LinkOutcome,
}

impl AdminReport {
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let identity = match self.identity {
            IdentityOutcome::Created => "created",
            IdentityOutcome::Existing => "already existed",
        };
        let link = match self.link {
            LinkOutcome::Upserted => "linked",
            LinkOutcome::AlreadyLinked => "already linked",
        };
        vec![
            format!("admin email:   {}", self.email),
            format!("auth identity: {} ({identity})", self.user_id),
            format!("admin link:    {link}"),
        ]
    }
}

async fn ensure_identity(
    backend: &dyn Backend,
    email: &str,
    password: &str,
) -> Result<(AuthUser, IdentityOutcome), CliError> {
    let request = NewAuthUser { email: email.to_owned(), password: password.to_owned(), email_confirm: true };
    match backend.create_auth_user(&request).await {
        Ok(user) => {
            info!(user_id = %user.id, "auth identity created");
            Ok((user, IdentityOutcome::Created))
        }
        Err(e) if e.is(ErrorKind::AlreadyExists) => {
            info!(email, "auth identity already exists; looking it up");
            let user = find_auth_user_by_email(backend, email).await?.ok_or_else(|| {
                BackendError::new(
                    ErrorKind::NotFound,
                    format!("auth service reported {email} as registered but it is not in the user list"),
                )
            })?;
            Ok((user, IdentityOutcome::Existing))
        }
        Err(e) => Err(e.into()),
    }
}

/// Ensure `email` has an auth identity and an `admin_users` link.
///
/// # Errors
///
/// Returns [`CliError::InvalidInput`] for a malformed email or empty password,
/// and the backend error for any failure other than "already exists" on the
/// identity or a unique violation on the link.
pub async fn provision_admin(backend: &dyn Backend, email: &str, password: &str) -> Result<AdminReport, CliError> {
    let email = normalize_email(email).ok_or_else(|| CliError::InvalidInput(format!("invalid admin email: {email:?}")))?;
    if password.is_empty() {
        return Err(CliError::InvalidInput("admin password must not be empty".into()));
    }

    let (user, identity) = ensure_identity(backend, &email, password).await?;

    let link = AdminLink { user_id: user.id, email: email.clone() };
    let link = match backend.upsert(ADMIN_USERS_TABLE, vec![to_row(&link)?], "user_id").await {
        Ok(_) => {
            info!(user_id = %user.id, "admin link upserted");
            LinkOutcome::Upserted
        }
        Err(e) if e.is(ErrorKind::UniqueViolation) => {
            warn!(user_id = %user.id, code = ?e.code, "admin link already present");
            LinkOutcome::AlreadyLinked
        }
        Err(e) => return Err(e.into()),
    };

    Ok(AdminReport { user_id: user.id, email, identity, link })
}

#[cfg(test)]
#[path = "provision_test.rs"]
mod tests;
