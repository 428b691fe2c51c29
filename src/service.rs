//! Application service tying commands to the store.
//!
//! Each command runs as one unit of work: load the aggregate, apply the
//! operation, save at the version that was read. A version conflict surfaces
//! as [`StoreError::Conflict`]; retrying is the caller's decision.

use crate::domain::commands::SupervisionCommand;
use crate::domain::errors::{RuleViolation, ViolationList};
use crate::domain::group::SupervisionGroup;
use crate::domain::types::{
    CommitteeMemberId, PromoterId, PropositionId, SupervisionGroupId,
};
use crate::domain::view::SupervisionGroupView;
use crate::store::{GroupStore, StoreError, VersionedGroup, NEW_GROUP_VERSION};
use std::fmt::{Display, Formatter};

/// Failure of a service call, business and infrastructure kept apart.
#[derive(Debug)]
pub enum ServiceError {
    /// One or more business rules rejected the operation.
    Business(ViolationList),
    /// The store failed or detected a concurrent write.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Business(violations) => write!(f, "{}", violations),
            Self::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Business(violations) => Some(violations),
            Self::Store(e) => Some(e),
        }
    }
}

impl From<RuleViolation> for ServiceError {
    fn from(violation: RuleViolation) -> Self {
        Self::Business(ViolationList::from(violation))
    }
}

impl From<ViolationList> for ServiceError {
    fn from(violations: ViolationList) -> Self {
        Self::Business(violations)
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Command and query entry point for supervision groups.
pub struct SupervisionService<S> {
    store: S,
}

impl<S: GroupStore> SupervisionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates the empty supervision group for a freshly initiated
    /// proposition and returns its id.
    pub async fn initiate_group(
        &self,
        proposition_id: PropositionId,
    ) -> Result<SupervisionGroupId, ServiceError> {
        let group = SupervisionGroup::new(SupervisionGroupId::new(), proposition_id);
        let group_id = group.id();
        self.store.save(&group, NEW_GROUP_VERSION).await?;
        tracing::info!(%group_id, %proposition_id, "supervision group initiated");
        Ok(group_id)
    }

    /// Executes one command as a load-apply-save unit of work.
    pub async fn execute(&self, command: SupervisionCommand) -> Result<(), ServiceError> {
        let group_id = command.group_id();
        tracing::info!(command = command.label(), %group_id, "executing command");

        let VersionedGroup { mut group, version } = self.store.load(group_id).await?;
        if let Err(e) = apply(&mut group, &command) {
            tracing::warn!(command = command.label(), %group_id, error = %e, "command rejected");
            return Err(e);
        }
        self.store.save(&group, version).await?;
        Ok(())
    }

    /// Verifies that every signatory approved, without mutating anything.
    pub async fn verify_everyone_approved(
        &self,
        group_id: SupervisionGroupId,
    ) -> Result<(), ServiceError> {
        let stored = self.store.load(group_id).await?;
        stored.group.verify_everyone_approved()?;
        Ok(())
    }

    /// Projects a group into its read-only view.
    pub async fn view(
        &self,
        group_id: SupervisionGroupId,
    ) -> Result<SupervisionGroupView, ServiceError> {
        let stored = self.store.load(group_id).await?;
        Ok(SupervisionGroupView::project(&stored.group))
    }

    /// Projects the group owned by a proposition.
    pub async fn view_by_proposition(
        &self,
        proposition_id: PropositionId,
    ) -> Result<SupervisionGroupView, ServiceError> {
        let stored = self.store.load_by_proposition(proposition_id).await?;
        Ok(SupervisionGroupView::project(&stored.group))
    }
}

fn apply(group: &mut SupervisionGroup, command: &SupervisionCommand) -> Result<(), ServiceError> {
    match command {
        SupervisionCommand::AddPromoter { person, .. } => {
            group.verify_signatures_not_sent()?;
            group.add_promoter(PromoterId(person.clone()))?;
        }

        SupervisionCommand::AddCommitteeMember { person, .. } => {
            group.verify_signatures_not_sent()?;
            group.add_committee_member(CommitteeMemberId(person.clone()))?;
        }

        SupervisionCommand::DesignateReferencePromoter { person, .. } => {
            group.verify_signatures_not_sent()?;
            let promoter = PromoterId(person.clone());
            group.designate_reference_promoter(&promoter)?;
        }

        // Removal deliberately skips lookup and validation: removing an
        // absent signatory is a no-op.
        SupervisionCommand::RemovePromoter { person, .. } => {
            group.remove_promoter(&PromoterId(person.clone()));
        }

        SupervisionCommand::RemoveCommitteeMember { person, .. } => {
            group.remove_committee_member(&CommitteeMemberId(person.clone()));
        }

        SupervisionCommand::DefineCotutelle { cotutelle, .. } => {
            group.define_cotutelle(cotutelle.clone());
        }

        SupervisionCommand::RequestSignatures { .. } => {
            // Accumulate panel and cotutelle violations into one answer
            // before any state change.
            let mut violations = Vec::new();
            if let Err(list) = group.verify_signatories_complete() {
                violations.extend(list.violations().iter().cloned());
            }
            if let Err(list) = group.verify_cotutelle() {
                violations.extend(list.violations().iter().cloned());
            }
            if let Some(list) = ViolationList::from_violations(violations) {
                return Err(ServiceError::Business(list));
            }
            group.lock_for_signature();
            group.invite_all_pending_to_sign()?;
        }

        SupervisionCommand::Approve {
            person,
            internal_comment,
            external_comment,
            thesis_institute,
            thesis_institute_comment,
            ..
        } => {
            let signatory = group.signatory(person)?;
            let reference = group.reference_promoter().cloned();
            group.verify_reference_promoter_documents_thesis_institute(
                &signatory,
                reference.as_ref(),
                *thesis_institute,
                thesis_institute_comment.as_deref(),
            )?;
            group.approve(&signatory, internal_comment, external_comment)?;
        }

        SupervisionCommand::ApproveByPdf {
            person,
            proof_documents,
            ..
        } => {
            let signatory = group.signatory(person)?;
            group.approve_by_pdf(&signatory, proof_documents.clone())?;
        }

        SupervisionCommand::Refuse {
            person,
            internal_comment,
            external_comment,
            refusal_reason,
            ..
        } => {
            let signatory = group.signatory(person)?;
            group.refuse(&signatory, internal_comment, external_comment, refusal_reason)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
