//! Strongly typed domain primitives for the supervision group aggregate.
//!
//! These newtypes identify the aggregate, the owning proposition and the
//! people signing it. Promoters and committee members share one person
//! reference space but are distinguishable by role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a supervision group aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupervisionGroupId(pub Uuid);

impl SupervisionGroupId {
    /// Creates a new random group ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SupervisionGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SupervisionGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the doctoral proposition owning a supervision group.
/// The proposition is an external aggregate, referenced by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropositionId(pub Uuid);

impl PropositionId {
    /// Creates a new random proposition ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PropositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PropositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a person in the member directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRef(pub String);

impl PersonRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PersonRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for PersonRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person acting as a thesis promoter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromoterId(pub PersonRef);

impl PromoterId {
    pub fn person(&self) -> &PersonRef {
        &self.0
    }
}

impl From<&str> for PromoterId {
    fn from(s: &str) -> Self {
        Self(PersonRef::from(s))
    }
}

impl std::fmt::Display for PromoterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person sitting on the accompanying committee ("CA").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitteeMemberId(pub PersonRef);

impl CommitteeMemberId {
    pub fn person(&self) -> &PersonRef {
        &self.0
    }
}

impl From<&str> for CommitteeMemberId {
    fn from(s: &str) -> Self {
        Self(PersonRef::from(s))
    }
}

impl std::fmt::Display for CommitteeMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signatory of the supervision group, tagged by role.
///
/// The same person reference must never appear under both roles within one
/// group; the aggregate enforces this when signatories are added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatoryId {
    Promoter(PromoterId),
    CommitteeMember(CommitteeMemberId),
}

impl SignatoryId {
    /// The underlying person reference, regardless of role.
    pub fn person(&self) -> &PersonRef {
        match self {
            SignatoryId::Promoter(id) => id.person(),
            SignatoryId::CommitteeMember(id) => id.person(),
        }
    }

    pub fn role(&self) -> SignatoryRole {
        match self {
            SignatoryId::Promoter(_) => SignatoryRole::Promoter,
            SignatoryId::CommitteeMember(_) => SignatoryRole::CommitteeMember,
        }
    }
}

impl From<PromoterId> for SignatoryId {
    fn from(id: PromoterId) -> Self {
        SignatoryId::Promoter(id)
    }
}

impl From<CommitteeMemberId> for SignatoryId {
    fn from(id: CommitteeMemberId) -> Self {
        SignatoryId::CommitteeMember(id)
    }
}

impl std::fmt::Display for SignatoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.person())
    }
}

/// Role of a signatory within the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatoryRole {
    Promoter,
    CommitteeMember,
}

/// Opaque token for an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef(pub String);

impl From<&str> for DocumentRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a thesis institute in the institute catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstituteId(pub Uuid);

/// State of one signatory's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignatureState {
    #[default]
    NotInvited,
    Invited,
    Approved,
    Declined,
}

impl SignatureState {
    /// True for states eligible for a (re-)invitation.
    pub fn is_pending(self) -> bool {
        matches!(self, SignatureState::NotInvited | SignatureState::Declined)
    }
}

/// Group-level signing status.
///
/// `SigningInProgress` is a pure state-field transition set when the
/// candidate requests signatures; it is not a concurrency primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupSignatureStatus {
    #[default]
    InProgress,
    SigningInProgress,
}

/// UTC timestamp for store metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampUtc(pub DateTime<Utc>);

impl TimestampUtc {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl Default for TimestampUtc {
    fn default() -> Self {
        Self::now()
    }
}
