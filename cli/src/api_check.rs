//! Smoke test for the deployed `GET /api/lawyers` endpoint.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::CliError;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    lawyers: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// One listed entry. Entries are only counted; `id` and `name` are shown when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Summary {
    fn from_value(value: &serde_json::Value) -> Self {
        Self {
            id: value.get("id").and_then(serde_json::Value::as_i64),
            name: value.get("name").and_then(serde_json::Value::as_str).map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCheckReport {
    pub lawyers: Vec<Summary>,
}

impl ApiCheckReport {
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        if self.lawyers.is_empty() {
            return vec!["warning: the API answered but returned no lawyers; is the directory seeded?".into()];
        }
        let mut lines = vec![format!("{} lawyer(s) returned:", self.lawyers.len())];
        lines.extend(self.lawyers.iter().map(|l| {
            let id = l.id.map_or_else(|| "?".to_owned(), |id| id.to_string());
            format!("  {id:>4}  {}", l.name.as_deref().unwrap_or("(unnamed)"))
        }));
        lines
    }
}

/// Interpret a response from the lawyers endpoint.
///
/// # Errors
///
/// Returns [`CliError::ApiCheck`] for a non-2xx status, a body that is not
/// the expected envelope, or `success: false`.
pub fn interpret(status: u16, body: &str) -> Result<ApiCheckReport, CliError> {
    let envelope: Option<Envelope> = serde_json::from_str(body).ok();
    if !(200..300).contains(&status) {
        let detail = envelope.and_then(|e| e.error).unwrap_or_else(|| body.chars().take(200).collect());
        return Err(CliError::ApiCheck(format!("status {status}: {detail}")));
    }
    let envelope = envelope.ok_or_else(|| CliError::ApiCheck("response is not the lawyers envelope".into()))?;
    if !envelope.success {
        let detail = envelope.error.unwrap_or_else(|| "no error message".into());
        return Err(CliError::ApiCheck(format!("endpoint reported failure: {detail}")));
    }
    Ok(ApiCheckReport { lawyers: envelope.lawyers.iter().map(Summary::from_value).collect() })
}

/// Call `{base_url}/api/lawyers` and interpret the answer.
///
/// # Errors
///
/// Returns [`CliError::Http`] when the request cannot be made, otherwise
/// whatever [`interpret`] returns.
pub async fn check_lawyers_api(base_url: &str) -> Result<ApiCheckReport, CliError> {
    let url = format!("{}/api/lawyers", base_url.trim_end_matches('/'));
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;

    info!(%url, "checking lawyers endpoint");
    let response = http.get(&url).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    interpret(status, &body)
}

#[cfg(test)]
#[path = "api_check_test.rs"]
mod tests;
