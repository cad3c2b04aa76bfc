use super::*;
use serde_json::json;

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_owned(), v.to_owned())
}

#[test]
fn bare_select_is_star() {
    let q = Select::from("lawyers");
    assert_eq!(q.query_pairs(), vec![pair("select", "*")]);
    assert!(q.column_list().is_none());
}

#[test]
fn filters_order_and_limit_render_in_order() {
    let q = Select::from("lawyers")
        .eq("status", "active")
        .eq("id", 3)
        .order_by("id", true)
        .limit(10);
    assert_eq!(
        q.query_pairs(),
        vec![
            pair("select", "*"),
            pair("status", "eq.active"),
            pair("id", "eq.3"),
            pair("order", "id.asc"),
            pair("limit", "10"),
        ]
    );
}

#[test]
fn descending_order_and_bool_filter() {
    let q = Select::from("appointments").eq("confirmed", json!(true)).order_by("created_at", false);
    let pairs = q.query_pairs();
    assert!(pairs.contains(&pair("confirmed", "eq.true")));
    assert!(pairs.contains(&pair("order", "created_at.desc")));
}

#[test]
fn column_list_splits_and_trims() {
    let q = Select::from("appointments").columns("id, lawyer_id ,");
    assert_eq!(q.column_list(), Some(vec!["id", "lawyer_id"]));
    assert_eq!(q.query_pairs()[0], pair("select", "id, lawyer_id ,"));
}

#[test]
fn eq_ignore_case_renders_ilike_with_wildcards_escaped() {
    let q = Select::from("lawyers").eq_ignore_case("referral_code", "ab_1%*");
    assert_eq!(q.query_pairs()[1], pair("referral_code", r"ilike.ab\_1\%\*"));
}

#[test]
fn eq_ignore_case_matches_text_literally() {
    let q = Select::from("lawyers").eq_ignore_case("referral_code", "holt01");
    let filter = &q.filters[0];
    assert!(filter.matches(Some(&json!("HOLT01"))));
    assert!(filter.matches(Some(&json!("Holt01"))));
    assert!(!filter.matches(Some(&json!("holt0"))));
    assert!(!filter.matches(None));
}
