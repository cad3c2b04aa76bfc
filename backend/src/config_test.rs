use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn minimal_config_uses_defaults() {
    let cfg = BackendConfig::from_lookup(lookup(&[
        ("SUPABASE_URL", "https://proj.example.co/"),
        ("SUPABASE_ANON_KEY", "anon"),
    ]))
    .unwrap();
    assert_eq!(cfg.url, "https://proj.example.co");
    assert_eq!(cfg.anon_key, "anon");
    assert!(cfg.service_role_key.is_none());
    assert!(cfg.app_url.is_none());
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    assert_eq!(cfg.strongest_role(), KeyRole::Anon);
}

#[test]
fn public_variable_names_are_fallbacks() {
    let cfg = BackendConfig::from_lookup(lookup(&[
        ("NEXT_PUBLIC_SUPABASE_URL", "https://public.example.co"),
        ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "public-anon"),
        ("NEXT_PUBLIC_APP_URL", "https://firm.example.com/"),
    ]))
    .unwrap();
    assert_eq!(cfg.url, "https://public.example.co");
    assert_eq!(cfg.anon_key, "public-anon");
    assert_eq!(cfg.app_url.as_deref(), Some("https://firm.example.com"));
}

#[test]
fn server_names_win_over_public_names() {
    let cfg = BackendConfig::from_lookup(lookup(&[
        ("SUPABASE_URL", "https://server.example.co"),
        ("NEXT_PUBLIC_SUPABASE_URL", "https://public.example.co"),
        ("SUPABASE_ANON_KEY", "anon"),
    ]))
    .unwrap();
    assert_eq!(cfg.url, "https://server.example.co");
}

#[test]
fn missing_url_names_the_variable() {
    let err = BackendConfig::from_lookup(lookup(&[("SUPABASE_ANON_KEY", "anon")])).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar { var: "SUPABASE_URL".into() });
}

#[test]
fn blank_anon_key_counts_as_missing() {
    let err = BackendConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.example.co"), ("SUPABASE_ANON_KEY", "  ")]))
        .unwrap_err();
    assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
}

#[test]
fn service_role_key_and_timeouts() {
    let cfg = BackendConfig::from_lookup(lookup(&[
        ("SUPABASE_URL", "https://x.example.co"),
        ("SUPABASE_ANON_KEY", "anon"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service"),
        ("BACKEND_REQUEST_TIMEOUT_SECS", "5"),
        ("BACKEND_CONNECT_TIMEOUT_SECS", "not-a-number"),
    ]))
    .unwrap();
    assert_eq!(cfg.key(KeyRole::ServiceRole).unwrap(), "service");
    assert_eq!(cfg.key(KeyRole::Anon).unwrap(), "anon");
    assert_eq!(cfg.strongest_role(), KeyRole::ServiceRole);
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn service_role_key_required_when_requested() {
    let cfg = BackendConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.example.co"), ("SUPABASE_ANON_KEY", "anon")]))
        .unwrap();
    assert_eq!(cfg.key(KeyRole::ServiceRole).unwrap_err(), ConfigError::MissingServiceRoleKey);
}
