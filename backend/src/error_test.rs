use super::*;

#[test]
fn unique_violation_from_sqlstate() {
    let body = r#"{"code":"23505","details":"Key (user_id)=(abc) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"admin_users_pkey\""}"#;
    let err = BackendError::from_response(409, body);
    assert_eq!(err.kind, ErrorKind::UniqueViolation);
    assert_eq!(err.code.as_deref(), Some("23505"));
    assert_eq!(err.details.as_deref(), Some("Key (user_id)=(abc) already exists."));
    assert!(err.hint.is_none());
    assert_eq!(err.status, Some(409));
}

#[test]
fn missing_relation_from_sqlstate_and_pgrst_code() {
    let legacy = r#"{"code":"42P01","message":"relation \"public.lawyers\" does not exist"}"#;
    assert_eq!(BackendError::from_response(404, legacy).kind, ErrorKind::MissingRelation);

    let modern = r#"{"code":"PGRST205","message":"Could not find the table 'public.lawyers' in the schema cache","hint":"Perhaps you meant the table 'public.lawyer'"}"#;
    let err = BackendError::from_response(404, modern);
    assert_eq!(err.kind, ErrorKind::MissingRelation);
    assert_eq!(err.hint.as_deref(), Some("Perhaps you meant the table 'public.lawyer'"));
}

#[test]
fn missing_column_codes() {
    let body = r#"{"code":"42703","message":"column appointments.lawyer_id does not exist"}"#;
    assert_eq!(BackendError::from_response(400, body).kind, ErrorKind::MissingColumn);
    let body = r#"{"code":"PGRST204","message":"Could not find the 'foo' column"}"#;
    assert_eq!(BackendError::from_response(400, body).kind, ErrorKind::MissingColumn);
}

#[test]
fn permission_denied_from_code_and_status() {
    let body = r#"{"code":"42501","message":"permission denied for table admin_users"}"#;
    assert_eq!(BackendError::from_response(403, body).kind, ErrorKind::PermissionDenied);
    assert_eq!(BackendError::from_response(401, r#"{"message":"Invalid API key"}"#).kind, ErrorKind::PermissionDenied);
}

#[test]
fn auth_email_exists_error_code() {
    let body = r#"{"code":422,"error_code":"email_exists","msg":"A user with this email address has already been registered"}"#;
    let err = BackendError::from_response(422, body);
    assert_eq!(err.kind, ErrorKind::AlreadyExists);
    assert_eq!(err.code.as_deref(), Some("email_exists"));
    assert_eq!(err.message, "A user with this email address has already been registered");
}

#[test]
fn legacy_auth_duplicate_without_error_code() {
    let body = r#"{"code":422,"msg":"A user with this email address has already been registered"}"#;
    assert_eq!(BackendError::from_response(422, body).kind, ErrorKind::AlreadyExists);
}

#[test]
fn unrelated_422_is_other() {
    let body = r#"{"code":422,"msg":"Password should be at least 6 characters"}"#;
    assert_eq!(BackendError::from_response(422, body).kind, ErrorKind::Other);
}

#[test]
fn non_json_body_keeps_text_in_message() {
    let err = BackendError::from_response(502, "Bad Gateway");
    assert_eq!(err.kind, ErrorKind::Other);
    assert_eq!(err.message, "HTTP 502: Bad Gateway");
}

#[test]
fn empty_body_reports_status() {
    let err = BackendError::from_response(500, "");
    assert_eq!(err.message, "backend returned HTTP 500");
}

#[test]
fn report_lines_include_details_and_hint() {
    let err = BackendError::new(ErrorKind::Other, "boom")
        .with_code("XX000")
        .with_details("disk full")
        .with_hint("free some space");
    assert_eq!(err.report_lines(), vec!["boom", "code: XX000", "details: disk full", "hint: free some space"]);
}

#[test]
fn display_is_message() {
    let err = BackendError::new(ErrorKind::NotFound, "no such user");
    assert_eq!(err.to_string(), "no such user");
    assert!(err.is(ErrorKind::NotFound));
    assert_eq!(err.kind.as_str(), "not_found");
}
