//! File-based group store.
//!
//! Each group lives in its own JSON document under the store root, named by
//! group id. Writers take an exclusive lock on a sidecar lock file, re-read
//! the stored version for the optimistic concurrency check, then replace the
//! document atomically via temp file + rename.

use crate::domain::group::SupervisionGroup;
use crate::domain::types::{PropositionId, SupervisionGroupId, TimestampUtc};
use crate::store::{GroupStore, StoreError, VersionedGroup, NEW_GROUP_VERSION};
use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk document for one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredGroup {
    version: u64,
    saved_at: TimestampUtc,
    group: SupervisionGroup,
}

/// Store keeping one JSON document per group under a root directory.
#[derive(Debug, Clone)]
pub struct FileGroupStore {
    root: PathBuf,
}

impl FileGroupStore {
    /// Creates a store rooted at `root`. The directory is created on first
    /// write, not here.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn group_path(&self, group_id: SupervisionGroupId) -> PathBuf {
        self.root.join(format!("{}.json", group_id))
    }

    fn lock_path(&self, group_id: SupervisionGroupId) -> PathBuf {
        self.root.join(format!("{}.lock", group_id))
    }

    fn read_document(&self, group_id: SupervisionGroupId) -> Result<StoredGroup, StoreError> {
        read_document_at(&self.group_path(group_id))
            .and_then(|doc| doc.ok_or(StoreError::NotFound(group_id)))
    }
}

fn read_document_at(path: &Path) -> Result<Option<StoredGroup>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::Io(e)),
    };
    let stored: StoredGroup = serde_json::from_str(&content)?;
    Ok(Some(stored))
}

/// Write the document to a temp file, then rename for atomicity.
fn write_document_at(path: &Path, stored: &StoredGroup) -> Result<(), StoreError> {
    let content = serde_json::to_string(stored)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[async_trait]
impl GroupStore for FileGroupStore {
    async fn load(&self, group_id: SupervisionGroupId) -> Result<VersionedGroup, StoreError> {
        let stored = self.read_document(group_id)?;
        Ok(VersionedGroup {
            group: stored.group,
            version: stored.version,
        })
    }

    async fn load_by_proposition(
        &self,
        proposition_id: PropositionId,
    ) -> Result<VersionedGroup, StoreError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFoundForProposition(proposition_id))
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        for entry in entries {
            let path = entry.map_err(StoreError::Io)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stored) = read_document_at(&path)? {
                if stored.group.proposition_id() == proposition_id {
                    return Ok(VersionedGroup {
                        group: stored.group,
                        version: stored.version,
                    });
                }
            }
        }
        Err(StoreError::NotFoundForProposition(proposition_id))
    }

    async fn save(
        &self,
        group: &SupervisionGroup,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let group_id = group.id();

        // The lock file is a sidecar because rename would replace a locked
        // document out from under its lock.
        let lock_file: File = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(group_id))?;
        lock_file.lock_exclusive()?;

        // Re-read under the lock for the concurrency check.
        let actual_version = read_document_at(&self.group_path(group_id))?
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
        let stored = StoredGroup {
            version: new_version,
            saved_at: TimestampUtc::now(),
            group: group.clone(),
        };
        write_document_at(&self.group_path(group_id), &stored)?;

        Ok(new_version)
    }
}

#[cfg(test)]
#[path = "tests/file_store_tests.rs"]
mod tests;
