//! Domain model for the doctoral supervision group.
//!
//! The supervision group is the aggregate coordinating thesis promoters and
//! accompanying-committee members through the signature workflow of a
//! doctoral admission proposition.
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): Role-tagged identities and state enums
//! - **Signature** (`signature.rs`): Per-signatory signature entries
//! - **Validation** (`validation.rs`): Fail-fast and accumulate-all rules
//! - **Group** (`group.rs`): The aggregate root and its operations
//! - **Commands** (`commands.rs`): Intent dispatched through the service
//! - **View** (`view.rs`): Read-only projection for UI and queries

pub mod commands;
pub mod cotutelle;
pub mod errors;
pub mod group;
pub mod signature;
pub mod types;
pub mod validation;
pub mod view;

// Re-export commonly used types for convenience
pub use commands::SupervisionCommand;
pub use cotutelle::Cotutelle;
pub use errors::{RuleViolation, ViolationList};
pub use group::SupervisionGroup;
pub use signature::{CommitteeSignature, PromoterSignature, Signature};
pub use types::{
    CommitteeMemberId, DocumentRef, GroupSignatureStatus, InstituteId, PersonRef, PromoterId,
    PropositionId, SignatoryId, SignatoryRole, SignatureState, SupervisionGroupId, TimestampUtc,
};
pub use view::{SignatoryView, SupervisionGroupView};
