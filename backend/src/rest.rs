//! REST client for the hosted backend.
//!
//! Thin HTTP wrapper over `/auth/v1/admin/users` and `/rest/v1/{table}`.
//! Response decoding lives in pure `parse_*` functions for testability.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::{BackendConfig, KeyRole};
use crate::error::{BackendError, ErrorKind};
use crate::query::{Row, Select};
use crate::{AuthUser, Backend, NewAuthUser};

const AUTH_ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
const REST_PATH: &str = "/rest/v1";
const USERS_PER_PAGE: usize = 1000;
const PREFER_REPRESENTATION: &str = "return=representation";
const PREFER_MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

// =============================================================================
// CLIENT
// =============================================================================

pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    key: String,
    role: KeyRole,
}

impl RestBackend {
    /// Build a client authenticating as `role`.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the key for `role` is not configured, or a
    /// `Transport` error if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig, role: KeyRole) -> Result<Self, BackendError> {
        let key = config
            .key(role)
            .map_err(|e| BackendError::new(ErrorKind::Config, e.to_string()))?
            .to_owned();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(BackendError::transport)?;
        Ok(Self { http, base_url: config.url.clone(), key, role })
    }

    #[must_use]
    pub fn role(&self) -> KeyRole {
        self.role
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}{REST_PATH}/{table}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await
            .map_err(BackendError::transport)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(BackendError::transport)?;
        debug!(status, bytes = text.len(), "backend response");

        if !(200..300).contains(&status) {
            return Err(BackendError::from_response(status, &text));
        }
        Ok(text)
    }

    /// Table calls answer 404 for an unknown relation on older servers.
    async fn send_table(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        self.send(request).await.map_err(|mut e| {
            if e.kind == ErrorKind::NotFound {
                e.kind = ErrorKind::MissingRelation;
            }
            e
        })
    }
}

#[async_trait::async_trait]
impl Backend for RestBackend {
    async fn create_auth_user(&self, user: &NewAuthUser) -> Result<AuthUser, BackendError> {
        debug!(email = %user.email, "creating auth user");
        let url = format!("{}{AUTH_ADMIN_USERS_PATH}", self.base_url);
        let text = self.send(self.http.post(url).json(user)).await?;
        parse_user(&text)
    }

    async fn list_auth_users(&self) -> Result<Vec<AuthUser>, BackendError> {
        let url = format!("{}{AUTH_ADMIN_USERS_PATH}", self.base_url);
        let mut users = Vec::new();
        let mut page = 1_usize;
        loop {
            let request = self.http.get(&url).query(&[("page", page), ("per_page", USERS_PER_PAGE)]);
            let text = self.send(request).await?;
            let batch = parse_user_page(&text)?;
            let done = batch.len() < USERS_PER_PAGE;
            users.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        debug!(count = users.len(), "listed auth users");
        Ok(users)
    }

    async fn select(&self, query: &Select) -> Result<Vec<Row>, BackendError> {
        debug!(table = %query.table, "select");
        let request = self
            .http
            .get(self.table_url(&query.table))
            .query(&query.query_pairs());
        let text = self.send_table(request).await?;
        parse_rows(&text)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, BackendError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        debug!(table, count = rows.len(), "insert");
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&rows);
        let text = self.send_table(request).await?;
        parse_rows(&text)
    }

    async fn upsert(&self, table: &str, rows: Vec<Row>, on_conflict: &str) -> Result<Vec<Row>, BackendError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        debug!(table, on_conflict, count = rows.len(), "upsert");
        let request = self
            .http
            .post(self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", PREFER_MERGE_DUPLICATES)
            .json(&rows);
        let text = self.send_table(request).await?;
        parse_rows(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct UserPage {
    users: Vec<AuthUser>,
}

fn parse_user(json: &str) -> Result<AuthUser, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::decode(format!("auth user: {e}")))
}

fn parse_user_page(json: &str) -> Result<Vec<AuthUser>, BackendError> {
    let page: UserPage = serde_json::from_str(json).map_err(|e| BackendError::decode(format!("auth user list: {e}")))?;
    Ok(page.users)
}

fn parse_rows(json: &str) -> Result<Vec<Row>, BackendError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| BackendError::decode(format!("rows: {e}")))
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;
