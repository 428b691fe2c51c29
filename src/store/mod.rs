//! Persistence boundary for supervision groups.
//!
//! The store holds whole aggregates as versioned documents. Every save states
//! the version it read; a mismatch means another writer got there first and
//! surfaces as [`StoreError::Conflict`]. Store failures are infrastructure
//! errors and never mix with the domain's `RuleViolation` taxonomy.

pub mod file_store;
pub mod memory;

pub use file_store::FileGroupStore;
pub use memory::MemoryGroupStore;

use crate::domain::group::SupervisionGroup;
use crate::domain::types::{PropositionId, SupervisionGroupId};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};

/// Version expected when inserting a group that does not exist yet.
pub const NEW_GROUP_VERSION: u64 = 0;

/// An aggregate together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedGroup {
    pub group: SupervisionGroup,
    pub version: u64,
}

/// Infrastructure errors raised at the persistence boundary.
#[derive(Debug)]
pub enum StoreError {
    /// No stored group with this id.
    NotFound(SupervisionGroupId),
    /// No stored group for this proposition.
    NotFoundForProposition(PropositionId),
    /// The stored version moved since the caller read it.
    Conflict {
        group_id: SupervisionGroupId,
        expected: u64,
        actual: u64,
    },
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(group_id) => {
                write!(f, "supervision group '{}' not found", group_id)
            }
            Self::NotFoundForProposition(proposition_id) => {
                write!(
                    f,
                    "no supervision group for proposition '{}'",
                    proposition_id
                )
            }
            Self::Conflict {
                group_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "concurrent write on group '{}': expected version {}, found {}",
                    group_id, expected, actual
                )
            }
            Self::Io(e) => write!(f, "store I/O error: {}", e),
            Self::Serde(e) => write!(f, "store serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}

/// Storage contract for supervision groups.
///
/// Implementations must make `save` atomic per group: either the new document
/// replaces the old one in full, or nothing changes.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Loads a group and the version it is stored at.
    async fn load(&self, group_id: SupervisionGroupId) -> Result<VersionedGroup, StoreError>;

    /// Loads the group owned by a proposition.
    async fn load_by_proposition(
        &self,
        proposition_id: PropositionId,
    ) -> Result<VersionedGroup, StoreError>;

    /// Saves a group, expecting it to still be at `expected_version`.
    /// Pass [`NEW_GROUP_VERSION`] to insert. Returns the new version.
    async fn save(
        &self,
        group: &SupervisionGroup,
        expected_version: u64,
    ) -> Result<u64, StoreError>;
}
