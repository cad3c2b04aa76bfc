use super::*;
use std::collections::HashSet;

#[test]
fn default_roster_has_unique_ids_and_codes() {
    let roster = default_roster();
    assert_eq!(roster.len(), 9);

    let ids: HashSet<i64> = roster.iter().map(|l| l.id).collect();
    let codes: HashSet<&str> = roster.iter().map(|l| l.referral_code.as_str()).collect();
    assert_eq!(ids.len(), roster.len());
    assert_eq!(codes.len(), roster.len());
    assert!(roster.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn default_roster_emails_are_lowercase() {
    let roster = default_roster();
    assert_eq!(roster[0].email, "avery.holt@firm.example");
    assert!(roster.iter().all(|l| l.email == l.email.to_ascii_lowercase()));
}

#[test]
fn parse_roster_reads_json_array() {
    let json = r#"[{
        "id": 42,
        "name": "Test Lawyer",
        "email": "test@firm.example",
        "phone": "555",
        "title": "Partner",
        "bio": "Bio",
        "years_experience": 3,
        "status": "active",
        "referral_code": "TEST42"
    }]"#;
    let roster = parse_roster(json).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, 42);
    assert!(roster[0].practice_areas.is_empty());
    assert_eq!(roster[0].status, LawyerStatus::Active);
}

#[test]
fn parse_roster_rejects_bad_status() {
    let json = r#"[{"id":1,"name":"x","email":"x@y","phone":"","title":"","bio":"","years_experience":1,"status":"retired","referral_code":"X"}]"#;
    assert!(matches!(parse_roster(json), Err(CliError::InvalidJson(_))));
}

#[test]
fn load_roster_reports_missing_file() {
    let err = load_roster(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, CliError::ReadFile { .. }));
}
