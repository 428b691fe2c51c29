//! In-memory group store for tests and ephemeral deployments.

use crate::domain::group::SupervisionGroup;
use crate::domain::types::{PropositionId, SupervisionGroupId};
use crate::store::{GroupStore, StoreError, VersionedGroup, NEW_GROUP_VERSION};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Store keeping versioned groups in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryGroupStore {
    groups: Mutex<HashMap<SupervisionGroupId, VersionedGroup>>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for MemoryGroupStore {
    async fn load(&self, group_id: SupervisionGroupId) -> Result<VersionedGroup, StoreError> {
        let groups = self.groups.lock().await;
        groups
            .get(&group_id)
            .cloned()
            .ok_or(StoreError::NotFound(group_id))
    }

    async fn load_by_proposition(
        &self,
        proposition_id: PropositionId,
    ) -> Result<VersionedGroup, StoreError> {
        let groups = self.groups.lock().await;
        groups
            .values()
            .find(|stored| stored.group.proposition_id() == proposition_id)
            .cloned()
            .ok_or(StoreError::NotFoundForProposition(proposition_id))
    }

    async fn save(
        &self,
        group: &SupervisionGroup,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut groups = self.groups.lock().await;
        let group_id = group.id();
        let actual_version = groups
            .get(&group_id)
            .map(|stored| stored.version)
            .unwrap_or(NEW_GROUP_VERSION);
        if actual_version != expected_version {
            return Err(StoreError::Conflict {
                group_id,
                expected: expected_version,
                actual: actual_version,
            });
        }
        let new_version = expected_version + 1;
        groups.insert(
            group_id,
            VersionedGroup {
                group: group.clone(),
                version: new_version,
            },
        );
        Ok(new_version)
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
