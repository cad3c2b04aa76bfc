use super::*;
use crate::state::test_helpers::{dummy_lawyer, seed_lawyers, test_app_state};
use backend::ErrorKind;

#[tokio::test]
async fn list_returns_only_active_in_id_order() {
    let (state, memory) = test_app_state();
    seed_lawyers(
        &memory,
        &[
            dummy_lawyer(3, LawyerStatus::Active),
            dummy_lawyer(1, LawyerStatus::Active),
            dummy_lawyer(2, LawyerStatus::Inactive),
        ],
    )
    .await;

    let lawyers = list_active_lawyers(state.backend.as_ref()).await.unwrap();
    let ids: Vec<i64> = lawyers.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn list_on_empty_table_is_empty() {
    let (state, _memory) = test_app_state();
    assert!(list_active_lawyers(state.backend.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_propagates_missing_table() {
    let (state, memory) = test_app_state();
    memory.drop_table(LAWYERS_TABLE);
    let err = list_active_lawyers(state.backend.as_ref()).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Backend(e) if e.kind == ErrorKind::MissingRelation));
}

#[tokio::test]
async fn get_lawyer_hides_inactive() {
    let (state, memory) = test_app_state();
    seed_lawyers(&memory, &[dummy_lawyer(1, LawyerStatus::Active), dummy_lawyer(2, LawyerStatus::Inactive)]).await;

    assert_eq!(get_lawyer(state.backend.as_ref(), 1).await.unwrap().id, 1);
    assert!(matches!(get_lawyer(state.backend.as_ref(), 2).await, Err(DirectoryError::NotFound(_))));
    assert!(matches!(get_lawyer(state.backend.as_ref(), 99).await, Err(DirectoryError::NotFound(_))));
}

#[tokio::test]
async fn referral_lookup_is_case_insensitive() {
    let (state, memory) = test_app_state();
    seed_lawyers(&memory, &[dummy_lawyer(7, LawyerStatus::Active)]).await;

    let lawyer = get_lawyer_by_referral(state.backend.as_ref(), " ref007 ").await.unwrap();
    assert_eq!(lawyer.id, 7);
    assert!(matches!(
        get_lawyer_by_referral(state.backend.as_ref(), "").await,
        Err(DirectoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn referral_lookup_finds_codes_stored_in_any_case() {
    let (state, memory) = test_app_state();
    let lower = Lawyer { referral_code: "holt01".into(), ..dummy_lawyer(1, LawyerStatus::Active) };
    let mixed = Lawyer { referral_code: "Reyes02".into(), ..dummy_lawyer(2, LawyerStatus::Active) };
    seed_lawyers(&memory, &[lower, mixed]).await;

    let backend = state.backend.as_ref();
    assert_eq!(get_lawyer_by_referral(backend, "holt01").await.unwrap().id, 1);
    assert_eq!(get_lawyer_by_referral(backend, "HOLT01").await.unwrap().id, 1);
    assert_eq!(get_lawyer_by_referral(backend, "reyes02").await.unwrap().id, 2);
    assert!(matches!(
        get_lawyer_by_referral(backend, "holt0").await,
        Err(DirectoryError::NotFound(code)) if code == "holt0"
    ));
}
