//! Connectivity and schema verification.
//!
//! DESIGN
//! ======
//! Every check runs regardless of earlier failures so one run reports the
//! whole picture. Backend errors are translated into a short reason an
//! operator can act on: missing table, permission denied, missing column,
//! or an empty result where rows are expected.

use std::fmt;

use backend::records::{
    ADMIN_USERS_TABLE, APPOINTMENTS_TABLE, CONTACT_MESSAGES_TABLE, LAWYERS_TABLE, LawyerStatus,
};
use backend::{Backend, BackendError, ErrorKind, Select};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    MissingTable,
    PermissionDenied,
    MissingColumn(String),
    NoRows(String),
    Backend(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTable => f.write_str("table does not exist"),
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::MissingColumn(column) => write!(f, "column `{column}` missing"),
            Self::NoRows(what) => f.write_str(what),
            Self::Backend(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass(String),
    Fail(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub outcome: Outcome,
}

impl CheckResult {
    fn new(name: impl Into<String>, outcome: Outcome) -> Self {
        let result = Self { name: name.into(), outcome };
        match &result.outcome {
            Outcome::Pass(detail) => debug!(check = %result.name, detail, "check passed"),
            Outcome::Fail(reason) => warn!(check = %result.name, %reason, "check failed"),
        }
        result
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Pass(_))
    }
}

fn failure(err: &BackendError, column: Option<&str>) -> Failure {
    match err.kind {
        ErrorKind::MissingRelation => Failure::MissingTable,
        ErrorKind::PermissionDenied => Failure::PermissionDenied,
        ErrorKind::MissingColumn => Failure::MissingColumn(column.unwrap_or("unknown").to_owned()),
        _ => Failure::Backend(err.to_string()),
    }
}

// =============================================================================
// CHECKS
// =============================================================================

/// The table answers a one-row read.
pub async fn check_reachable(backend: &dyn Backend, table: &str) -> CheckResult {
    let query = Select::from(table).limit(1);
    let outcome = match backend.select(&query).await {
        Ok(_) => Outcome::Pass("reachable".into()),
        Err(e) => Outcome::Fail(failure(&e, None)),
    };
    CheckResult::new(format!("{table} reachable"), outcome)
}

/// At least one lawyer is active, so the public directory is not empty.
pub async fn check_active_lawyers(backend: &dyn Backend) -> CheckResult {
    let query = Select::from(LAWYERS_TABLE).columns("id").eq("status", LawyerStatus::Active.as_str());
    let outcome = match backend.select(&query).await {
        Ok(rows) if rows.is_empty() => Outcome::Fail(Failure::NoRows("no active lawyers".into())),
        Ok(rows) => Outcome::Pass(format!("{} active", rows.len())),
        Err(e) => Outcome::Fail(failure(&e, Some("status"))),
    };
    CheckResult::new("active lawyers present", outcome)
}

/// `table.column` exists.
pub async fn check_column(backend: &dyn Backend, table: &str, column: &str) -> CheckResult {
    let query = Select::from(table).columns(column).limit(1);
    let outcome = match backend.select(&query).await {
        Ok(_) => Outcome::Pass("present".into()),
        Err(e) => Outcome::Fail(failure(&e, Some(column))),
    };
    CheckResult::new(format!("{table}.{column} present"), outcome)
}

/// The auth admin API answers. Needs the service-role key.
pub async fn check_auth_admin(backend: &dyn Backend) -> CheckResult {
    let outcome = match backend.list_auth_users().await {
        Ok(users) => Outcome::Pass(format!("{} identities", users.len())),
        Err(e) => Outcome::Fail(failure(&e, None)),
    };
    CheckResult::new("auth admin API", outcome)
}

/// Run every check in order. `include_auth` adds the auth admin check.
pub async fn run_checks(backend: &dyn Backend, include_auth: bool) -> Vec<CheckResult> {
    let mut results = vec![
        check_reachable(backend, LAWYERS_TABLE).await,
        check_active_lawyers(backend).await,
        check_reachable(backend, APPOINTMENTS_TABLE).await,
        check_column(backend, APPOINTMENTS_TABLE, "lawyer_id").await,
        check_reachable(backend, CONTACT_MESSAGES_TABLE).await,
        check_reachable(backend, ADMIN_USERS_TABLE).await,
    ];
    if include_auth {
        results.push(check_auth_admin(backend).await);
    }
    results
}

#[must_use]
pub fn failed_count(results: &[CheckResult]) -> usize {
    results.iter().filter(|r| !r.passed()).count()
}

/// One line per check followed by a totals line.
#[must_use]
pub fn render_summary(results: &[CheckResult]) -> Vec<String> {
    let width = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut lines: Vec<String> = results
        .iter()
        .map(|r| match &r.outcome {
            Outcome::Pass(detail) => format!("  PASS  {:<width$}  {detail}", r.name),
            Outcome::Fail(reason) => format!("  FAIL  {:<width$}  {reason}", r.name),
        })
        .collect();
    let failed = failed_count(results);
    lines.push(format!("{} passed, {failed} failed", results.len() - failed));
    lines
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod tests;
