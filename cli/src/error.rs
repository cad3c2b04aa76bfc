//! CLI error type. Every variant ends the process with exit status 1.

use backend::{BackendError, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Backend(#[from] BackendError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api check failed: {0}")]
    ApiCheck(String),
    #[error("{failed} verification check(s) failed")]
    ChecksFailed { failed: usize },
    #[error("{errors} blocking deployment issue(s) found")]
    DeployBlocked { errors: usize },
    #[error("failed to read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl CliError {
    /// Lines for operator output. Backend errors include their details and hint.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            Self::Backend(e) => e.report_lines(),
            other => vec![other.to_string()],
        }
    }
}
