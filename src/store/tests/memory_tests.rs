//! Tests for the in-memory group store.

use super::*;
use crate::domain::types::PromoterId;

fn sample_group() -> SupervisionGroup {
    let mut group = SupervisionGroup::new(SupervisionGroupId::new(), PropositionId::new());
    group.add_promoter(PromoterId::from("alice")).unwrap();
    group
}

#[tokio::test]
async fn save_then_load_round_trips_the_group() {
    let store = MemoryGroupStore::new();
    let group = sample_group();

    let version = store.save(&group, NEW_GROUP_VERSION).await.unwrap();
    assert_eq!(version, 1);
    let loaded = store.load(group.id()).await.unwrap();
    assert_eq!(loaded.group, group);
}

#[tokio::test]
async fn load_of_missing_group_reports_not_found() {
    let store = MemoryGroupStore::new();
    let err = store.load(SupervisionGroupId::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn stale_version_is_rejected_as_conflict() {
    let store = MemoryGroupStore::new();
    let group = sample_group();
    let v1 = store.save(&group, NEW_GROUP_VERSION).await.unwrap();
    store.save(&group, v1).await.unwrap();

    let err = store.save(&group, v1).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict {
            expected: 1,
            actual: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn load_by_proposition_finds_the_owning_group() {
    let store = MemoryGroupStore::new();
    let group = sample_group();
    store.save(&group, NEW_GROUP_VERSION).await.unwrap();

    let found = store
        .load_by_proposition(group.proposition_id())
        .await
        .unwrap();
    assert_eq!(found.group.id(), group.id());

    let err = store
        .load_by_proposition(PropositionId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFoundForProposition(_)));
}
