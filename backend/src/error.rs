//! Backend error type and its classification.
//!
//! The hosted REST layer reports Postgres SQLSTATE codes (`23505`, `42P01`),
//! its own `PGRST…` codes, and auth-service `error_code` strings. They are
//! folded into [`ErrorKind`] in one place so callers can match on intent.

use serde::Deserialize;
use serde_json::Value;

const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";
const SQLSTATE_UNDEFINED_TABLE: &str = "42P01";
const SQLSTATE_UNDEFINED_COLUMN: &str = "42703";
const SQLSTATE_INSUFFICIENT_PRIVILEGE: &str = "42501";
const PGRST_TABLE_NOT_IN_SCHEMA: &str = "PGRST205";
const PGRST_COLUMN_NOT_IN_SCHEMA: &str = "PGRST204";
const AUTH_EMAIL_EXISTS: &str = "email_exists";
const AUTH_USER_ALREADY_EXISTS: &str = "user_already_exists";

/// What went wrong, independent of the backend's wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An auth identity with this email already exists.
    AlreadyExists,
    /// A unique constraint rejected the write.
    UniqueViolation,
    /// The table (relation) does not exist.
    MissingRelation,
    /// A referenced column does not exist.
    MissingColumn,
    /// The key in use is not allowed to touch this resource.
    PermissionDenied,
    /// The addressed resource was not found.
    NotFound,
    /// The request never produced a response.
    Transport,
    /// The response body could not be decoded.
    Decode,
    /// Client-side configuration is incomplete.
    Config,
    /// Anything else the backend reported.
    Other,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::UniqueViolation => "unique_violation",
            Self::MissingRelation => "missing_relation",
            Self::MissingColumn => "missing_column",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

/// A classified backend failure, carrying whatever detail and hint the
/// backend supplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: ErrorKind,
    pub message: String,
    pub code: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
    pub status: Option<u16>,
}

impl BackendError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), code: None, details: None, hint: None, status: None }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    #[must_use]
    pub fn transport(err: reqwest::Error) -> Self {
        Self::new(ErrorKind::Transport, err.to_string())
    }

    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Build an error from a non-success HTTP response.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.code.as_ref().and_then(code_string);
        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback_message(status, body));
        let kind = classify(status, code.as_deref().or(parsed.error_code.as_deref()), &message);

        Self {
            kind,
            message,
            code: code.or(parsed.error_code),
            details: parsed.details.as_ref().and_then(text_value),
            hint: parsed.hint.as_ref().and_then(text_value),
            status: Some(status),
        }
    }

    /// Message followed by any details and hint, one per line, for operator output.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![self.message.clone()];
        if let Some(code) = &self.code {
            lines.push(format!("code: {code}"));
        }
        if let Some(details) = &self.details {
            lines.push(format!("details: {details}"));
        }
        if let Some(hint) = &self.hint {
            lines.push(format!("hint: {hint}"));
        }
        lines
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<Value>,
    error_code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    details: Option<Value>,
    hint: Option<Value>,
}

/// Auth responses use a numeric `code` (the HTTP status); only string codes
/// carry classification information.
fn code_string(value: &Value) -> Option<String> {
    value.as_str().map(ToOwned::to_owned)
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() { format!("backend returned HTTP {status}") } else { format!("HTTP {status}: {body}") }
}

fn classify(status: u16, code: Option<&str>, message: &str) -> ErrorKind {
    match code {
        Some(SQLSTATE_UNIQUE_VIOLATION) => return ErrorKind::UniqueViolation,
        Some(SQLSTATE_UNDEFINED_TABLE | PGRST_TABLE_NOT_IN_SCHEMA) => return ErrorKind::MissingRelation,
        Some(SQLSTATE_UNDEFINED_COLUMN | PGRST_COLUMN_NOT_IN_SCHEMA) => return ErrorKind::MissingColumn,
        Some(SQLSTATE_INSUFFICIENT_PRIVILEGE) => return ErrorKind::PermissionDenied,
        Some(AUTH_EMAIL_EXISTS | AUTH_USER_ALREADY_EXISTS) => return ErrorKind::AlreadyExists,
        _ => {}
    }

    match status {
        401 | 403 => ErrorKind::PermissionDenied,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::UniqueViolation,
        // Older auth servers answer duplicate sign-ups with a bare 422.
        422 if mentions_existing(message) => ErrorKind::AlreadyExists,
        _ => ErrorKind::Other,
    }
}

fn mentions_existing(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("already been registered") || lower.contains("already exists")
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
