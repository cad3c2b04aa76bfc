use super::*;
use crate::state::test_helpers::{dummy_lawyer, seed_lawyers, test_app_state};
use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use backend::records::{LAWYERS_TABLE, LawyerStatus};

#[tokio::test]
async fn empty_directory_is_success_with_no_lawyers() {
    let (state, _memory) = test_app_state();
    let Json(body) = list_lawyers(State(state)).await.unwrap();
    assert!(body.success);
    assert!(body.lawyers.is_empty());

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true, "lawyers": [] }));
}

#[tokio::test]
async fn directory_lists_active_lawyers() {
    let (state, memory) = test_app_state();
    seed_lawyers(&memory, &[dummy_lawyer(2, LawyerStatus::Active), dummy_lawyer(1, LawyerStatus::Active)]).await;

    let Json(body) = list_lawyers(State(state)).await.unwrap();
    let ids: Vec<i64> = body.lawyers.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn missing_table_is_500_with_success_false() {
    let (state, memory) = test_app_state();
    memory.drop_table(LAWYERS_TABLE);

    let err = list_lawyers(State(state)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = err.into_response();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], serde_json::json!(false));
    assert_eq!(json["error"], serde_json::json!("internal server error"));
}

#[tokio::test]
async fn get_lawyer_not_found_is_404() {
    let (state, _memory) = test_app_state();
    let err = get_lawyer(State(state), Path(42)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "lawyer not found: 42");
}

#[tokio::test]
async fn get_lawyer_by_referral_returns_lawyer() {
    let (state, memory) = test_app_state();
    seed_lawyers(&memory, &[dummy_lawyer(9, LawyerStatus::Active)]).await;
    let Json(body) = get_lawyer_by_referral(State(state), Path("ref009".into())).await.unwrap();
    assert!(body.success);
    assert_eq!(body.lawyer.id, 9);
}
