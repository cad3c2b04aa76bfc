use super::*;

#[test]
fn lists_returned_lawyers() {
    let body = r#"{"success":true,"lawyers":[{"id":1,"name":"Avery Holt","status":"active"},{"id":2,"name":"Morgan Reyes"}]}"#;
    let report = interpret(200, body).unwrap();
    let names: Vec<Option<&str>> = report.lawyers.iter().map(|l| l.name.as_deref()).collect();
    assert_eq!(names, vec![Some("Avery Holt"), Some("Morgan Reyes")]);
    assert_eq!(report.lawyers[0].id, Some(1));
    assert_eq!(report.render()[0], "2 lawyer(s) returned:");
}

#[test]
fn empty_list_is_a_warning_not_an_error() {
    let report = interpret(200, r#"{"success":true,"lawyers":[]}"#).unwrap();
    assert!(report.lawyers.is_empty());
    let lines = report.render();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("warning:"));
}

#[test]
fn error_status_uses_envelope_message() {
    let err = interpret(500, r#"{"success":false,"error":"internal server error"}"#).unwrap_err();
    assert_eq!(err.to_string(), "api check failed: status 500: internal server error");
}

#[test]
fn error_status_falls_back_to_raw_body() {
    let err = interpret(502, "Bad Gateway").unwrap_err();
    assert!(err.to_string().ends_with("status 502: Bad Gateway"));
}

#[test]
fn success_false_is_an_error() {
    let err = interpret(200, r#"{"success":false,"error":"nope"}"#).unwrap_err();
    assert!(matches!(err, CliError::ApiCheck(msg) if msg.contains("nope")));
}

#[test]
fn non_json_success_is_an_error() {
    assert!(matches!(interpret(200, "<html></html>"), Err(CliError::ApiCheck(_))));
}

#[test]
fn entries_of_any_shape_are_counted() {
    let body = r#"{"success":true,"lawyers":[{"id":"abc","full_name":"X"},{"name":"Only Name"},7]}"#;
    let report = interpret(200, body).unwrap();
    assert_eq!(report.lawyers.len(), 3);
    assert_eq!(report.lawyers[0], Summary { id: None, name: None });
    assert_eq!(report.lawyers[1].name.as_deref(), Some("Only Name"));

    let lines = report.render();
    assert_eq!(lines[0], "3 lawyer(s) returned:");
    assert!(lines[1].contains("(unnamed)"));
}
