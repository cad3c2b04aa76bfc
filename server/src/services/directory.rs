//! Lawyer directory reads.
//!
//! The public site only ever sees active lawyers; inactive rows stay in the
//! table for history but read as not found.

use backend::records::{LAWYERS_TABLE, Lawyer, LawyerStatus};
use backend::{Backend, BackendError, Select, select_as};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("lawyer not found: {0}")]
    NotFound(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

fn active() -> Select {
    Select::from(LAWYERS_TABLE).eq("status", LawyerStatus::Active.as_str())
}

/// Active lawyers ordered by directory id.
pub async fn list_active_lawyers(backend: &dyn Backend) -> Result<Vec<Lawyer>, DirectoryError> {
    Ok(select_as(backend, &active().order_by("id", true)).await?)
}

/// A single active lawyer by id.
pub async fn get_lawyer(backend: &dyn Backend, id: i64) -> Result<Lawyer, DirectoryError> {
    let found: Vec<Lawyer> = select_as(backend, &active().eq("id", id).limit(1)).await?;
    found
        .into_iter()
        .next()
        .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
}

/// A single active lawyer by referral code, matched without regard to case.
pub async fn get_lawyer_by_referral(backend: &dyn Backend, code: &str) -> Result<Lawyer, DirectoryError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DirectoryError::NotFound(String::new()));
    }
    let query = active().eq_ignore_case("referral_code", code).limit(1);
    let found: Vec<Lawyer> = select_as(backend, &query).await?;
    found
        .into_iter()
        .next()
        .ok_or_else(|| DirectoryError::NotFound(code.to_owned()))
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
