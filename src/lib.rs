//! Supervision group backend for doctoral admission propositions.
//!
//! A supervision group gathers the thesis promoters and the accompanying
//! committee around one proposition and walks them through the signature
//! workflow: assemble the panel, request signatures, collect approvals and
//! refusals, and verify that everyone signed off.
//!
//! The crate exposes three layers:
//!
//! - [`domain`]: the aggregate, its validation rules and read-only view
//! - [`store`]: versioned persistence with optimistic concurrency
//! - [`service`]: the command/query entry point tying the two together

pub mod domain;
pub mod service;
pub mod store;

pub use domain::{
    CommitteeMemberId, Cotutelle, DocumentRef, GroupSignatureStatus, InstituteId, PersonRef,
    PromoterId, PropositionId, RuleViolation, SignatoryId, SignatoryRole, SignatureState,
    SupervisionCommand, SupervisionGroup, SupervisionGroupId, SupervisionGroupView, ViolationList,
};
pub use service::{ServiceError, SupervisionService};
pub use store::{FileGroupStore, GroupStore, MemoryGroupStore, StoreError, VersionedGroup};
