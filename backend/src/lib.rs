//! Hosted-backend client shared by the API server and the `firm-admin` CLI.
//!
//! ARCHITECTURE
//! ============
//! The site's data lives in a hosted Postgres with an auth service in front
//! of it. Everything that talks to it goes through the [`Backend`] trait:
//! auth-identity admin calls plus generic table select/insert/upsert.
//!
//! [`RestBackend`] speaks the hosted REST dialect over `reqwest`.
//! [`MemoryBackend`] keeps tables in-process with the same error kinds, so
//! provisioning, seeding and route handlers are testable without a network.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures are classified once, when the response is decoded, into
//! an [`ErrorKind`]. Callers branch on the kind and never on message text.

pub mod auth;
pub mod config;
pub mod error;
pub mod memory;
pub mod query;
pub mod records;
pub mod rest;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use auth::{AuthUser, NewAuthUser, find_auth_user_by_email, normalize_email};
pub use config::{BackendConfig, ConfigError, KeyRole};
pub use error::{BackendError, ErrorKind};
pub use memory::MemoryBackend;
pub use query::{Filter, FilterOp, Order, Row, Select};
pub use rest::RestBackend;

/// Remote CRUD + auth-admin surface of the hosted backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Create an authentication identity.
    async fn create_auth_user(&self, user: &NewAuthUser) -> Result<AuthUser, BackendError>;

    /// List every authentication identity (all pages).
    async fn list_auth_users(&self) -> Result<Vec<AuthUser>, BackendError>;

    /// Run a filtered, ordered select against one table.
    async fn select(&self, query: &Select) -> Result<Vec<Row>, BackendError>;

    /// Insert rows and return their stored representation.
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, BackendError>;

    /// Insert rows, or overwrite the existing row sharing the `on_conflict` column.
    async fn upsert(&self, table: &str, rows: Vec<Row>, on_conflict: &str) -> Result<Vec<Row>, BackendError>;
}

/// Run a select and decode each row into `T`.
///
/// # Errors
///
/// Returns the backend error, or a `Decode` error if a row does not match `T`.
pub async fn select_as<T: DeserializeOwned>(backend: &dyn Backend, query: &Select) -> Result<Vec<T>, BackendError> {
    backend
        .select(query)
        .await?
        .into_iter()
        .map(from_row)
        .collect()
}

/// Decode a single row into a record.
///
/// # Errors
///
/// Returns a `Decode` error if the row does not match `T`.
pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, BackendError> {
    serde_json::from_value(serde_json::Value::Object(row)).map_err(|e| BackendError::decode(e.to_string()))
}

/// Encode a record as a row. The record must serialize to a JSON object.
///
/// # Errors
///
/// Returns a `Decode` error if `value` does not serialize to an object.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, BackendError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(BackendError::decode(format!("expected a JSON object, got {other}"))),
        Err(e) => Err(BackendError::decode(e.to_string())),
    }
}
