//! Tests for the file-backed group store.

use super::*;
use crate::domain::types::{CommitteeMemberId, PromoterId};
use tempfile::tempdir;

fn sample_group() -> SupervisionGroup {
    let mut group = SupervisionGroup::new(SupervisionGroupId::new(), PropositionId::new());
    group.add_promoter(PromoterId::from("alice")).unwrap();
    group
        .add_committee_member(CommitteeMemberId::from("carol"))
        .unwrap();
    group
}

#[tokio::test]
async fn save_then_load_round_trips_the_group() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().to_path_buf());
    let group = sample_group();

    let version = store.save(&group, NEW_GROUP_VERSION).await.unwrap();
    assert_eq!(version, 1);

    let loaded = store.load(group.id()).await.unwrap();
    assert_eq!(loaded.group, group);
    assert_eq!(loaded.version, 1);
}

#[tokio::test]
async fn load_of_missing_group_reports_not_found() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().to_path_buf());
    let group_id = SupervisionGroupId::new();

    let err = store.load(group_id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == group_id));
}

#[tokio::test]
async fn sequential_saves_bump_the_version() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().to_path_buf());
    let mut group = sample_group();

    let v1 = store.save(&group, NEW_GROUP_VERSION).await.unwrap();
    group.add_promoter(PromoterId::from("bob")).unwrap();
    let v2 = store.save(&group, v1).await.unwrap();
    assert_eq!((v1, v2), (1, 2));

    let loaded = store.load(group.id()).await.unwrap();
    assert_eq!(loaded.group.promoter_signatures().len(), 2);
}

#[tokio::test]
async fn stale_version_is_rejected_as_conflict() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().to_path_buf());
    let group = sample_group();

    store.save(&group, NEW_GROUP_VERSION).await.unwrap();
    // A second writer still holding version 0 loses.
    let err = store.save(&group, NEW_GROUP_VERSION).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict {
            expected: 0,
            actual: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn conflict_leaves_the_stored_document_untouched() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().to_path_buf());
    let group = sample_group();
    store.save(&group, NEW_GROUP_VERSION).await.unwrap();

    let mut stale = group.clone();
    stale.add_promoter(PromoterId::from("bob")).unwrap();
    assert!(store.save(&stale, NEW_GROUP_VERSION).await.is_err());

    let loaded = store.load(group.id()).await.unwrap();
    assert_eq!(loaded.group, group);
}

#[tokio::test]
async fn load_by_proposition_scans_the_store_root() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().to_path_buf());
    let first = sample_group();
    let second = sample_group();
    store.save(&first, NEW_GROUP_VERSION).await.unwrap();
    store.save(&second, NEW_GROUP_VERSION).await.unwrap();

    let found = store
        .load_by_proposition(second.proposition_id())
        .await
        .unwrap();
    assert_eq!(found.group.id(), second.id());

    let err = store
        .load_by_proposition(PropositionId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFoundForProposition(_)));
}

#[tokio::test]
async fn load_by_proposition_on_missing_root_reports_not_found() {
    let dir = tempdir().expect("temp dir");
    let store = FileGroupStore::new(dir.path().join("never-created"));
    let err = store
        .load_by_proposition(PropositionId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFoundForProposition(_)));
}

#[tokio::test]
async fn documents_survive_a_store_restart() {
    let dir = tempdir().expect("temp dir");
    let group = sample_group();
    {
        let store = FileGroupStore::new(dir.path().to_path_buf());
        store.save(&group, NEW_GROUP_VERSION).await.unwrap();
    }
    let reopened = FileGroupStore::new(dir.path().to_path_buf());
    let loaded = reopened.load(group.id()).await.unwrap();
    assert_eq!(loaded.group, group);
    assert_eq!(loaded.version, 1);
}
