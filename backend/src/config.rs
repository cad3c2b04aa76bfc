//! Backend connection settings parsed from environment variables.

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const URL_VARS: &[&str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const ANON_KEY_VARS: &[&str] = &["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];
const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
const APP_URL_VAR: &str = "NEXT_PUBLIC_APP_URL";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var: {var}")]
    MissingVar { var: String },
    #[error("service role key required for this operation: set {SERVICE_ROLE_KEY_VAR}")]
    MissingServiceRoleKey,
}

/// Which API key a client authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Public key; subject to row-level policies.
    Anon,
    /// Privileged key; required for auth-admin calls.
    ServiceRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: Option<String>,
    pub app_url: Option<String>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl BackendConfig {
    /// Build config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL` (or `NEXT_PUBLIC_SUPABASE_URL`)
    /// - `SUPABASE_ANON_KEY` (or `NEXT_PUBLIC_SUPABASE_ANON_KEY`)
    ///
    /// Optional:
    /// - `SUPABASE_SERVICE_ROLE_KEY`
    /// - `NEXT_PUBLIC_APP_URL`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let first = |keys: &[&str]| keys.iter().find_map(|k| get(k));

        let url = first(URL_VARS).ok_or_else(|| ConfigError::MissingVar { var: URL_VARS[0].into() })?;
        let anon_key = first(ANON_KEY_VARS).ok_or_else(|| ConfigError::MissingVar { var: ANON_KEY_VARS[0].into() })?;

        Ok(Self {
            url: url.trim_end_matches('/').to_owned(),
            anon_key,
            service_role_key: get(SERVICE_ROLE_KEY_VAR),
            app_url: get(APP_URL_VAR).map(|u| u.trim_end_matches('/').to_owned()),
            request_timeout_secs: parse_or(get("BACKEND_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: parse_or(get("BACKEND_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// The API key for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingServiceRoleKey`] if the service key is requested but unset.
    pub fn key(&self, role: KeyRole) -> Result<&str, ConfigError> {
        match role {
            KeyRole::Anon => Ok(&self.anon_key),
            KeyRole::ServiceRole => self
                .service_role_key
                .as_deref()
                .ok_or(ConfigError::MissingServiceRoleKey),
        }
    }

    /// The most privileged role this config can authenticate as.
    #[must_use]
    pub fn strongest_role(&self) -> KeyRole {
        if self.service_role_key.is_some() { KeyRole::ServiceRole } else { KeyRole::Anon }
    }
}

fn parse_or(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
