use super::*;
use crate::MemoryBackend;

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Foo@Bar.COM "), Some("foo@bar.com".into()));
}

#[test]
fn normalize_email_rejects_malformed() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("no-at-sign"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[tokio::test]
async fn find_by_email_is_case_insensitive() {
    let backend = MemoryBackend::new();
    let existing = backend.add_auth_user("Foo@Bar.com");
    let found = find_auth_user_by_email(&backend, "foo@bar.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(existing.id));
}

#[tokio::test]
async fn find_by_email_returns_none_when_absent() {
    let backend = MemoryBackend::new();
    backend.add_auth_user("someone@example.com");
    assert!(find_auth_user_by_email(&backend, "other@example.com").await.unwrap().is_none());
}

#[test]
fn auth_user_deserializes_admin_api_shape() {
    let json = r#"{"id":"7b1d6a3e-8f55-4a8c-9d0e-1f2a3b4c5d6e","aud":"authenticated","role":"authenticated","email":"admin@example.com","email_confirmed_at":"2024-01-01T00:00:00Z","created_at":"2024-01-01T00:00:00Z","app_metadata":{}}"#;
    let user: AuthUser = serde_json::from_str(json).unwrap();
    assert_eq!(user.email.as_deref(), Some("admin@example.com"));
    assert!(user.email_confirmed_at.is_some());
}
