//! Read-only projection of a supervision group for UI and query purposes.
//!
//! The view flattens both signature lists into uniform rows so callers can
//! render one signatory table without caring about roles, while the signing
//! status and cotutelle summary answer the usual dashboard questions.

use crate::domain::group::SupervisionGroup;
use crate::domain::signature::Signature;
use crate::domain::types::{
    GroupSignatureStatus, PropositionId, SignatoryId, SignatoryRole, SignatureState,
    SupervisionGroupId,
};
use serde::{Deserialize, Serialize};

/// One row of the flattened signatory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatoryView {
    pub person: String,
    pub role: SignatoryRole,
    pub state: SignatureState,
    pub external_comment: String,
    pub refusal_reason: String,
    pub is_reference_promoter: bool,
}

/// Read-only view of one supervision group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisionGroupView {
    pub group_id: SupervisionGroupId,
    pub proposition_id: PropositionId,
    pub signature_status: GroupSignatureStatus,
    pub signatories: Vec<SignatoryView>,
    pub has_cotutelle: bool,
    pub cotutelle_complete: bool,
    pub all_approved: bool,
}

impl SupervisionGroupView {
    /// Projects the aggregate into the flat view, promoters first.
    pub fn project(group: &SupervisionGroup) -> Self {
        let reference = group.reference_promoter();
        let mut signatories: Vec<SignatoryView> = group
            .promoter_signatures()
            .iter()
            .map(|entry| {
                let mut row = row(entry, entry.signatory().clone().into());
                row.is_reference_promoter = reference == Some(entry.signatory());
                row
            })
            .collect();
        signatories.extend(
            group
                .committee_signatures()
                .iter()
                .map(|entry| row(entry, entry.signatory().clone().into())),
        );

        Self {
            group_id: group.id(),
            proposition_id: group.proposition_id(),
            signature_status: group.signature_status(),
            signatories,
            has_cotutelle: group.cotutelle().is_some_and(|c| c.is_defined()),
            cotutelle_complete: group.cotutelle().is_some_and(|c| c.is_complete()),
            all_approved: group.verify_everyone_approved().is_ok(),
        }
    }
}

fn row<Id>(entry: &Signature<Id>, signatory: SignatoryId) -> SignatoryView {
    SignatoryView {
        person: signatory.person().to_string(),
        role: signatory.role(),
        state: entry.state(),
        external_comment: entry.external_comment().to_string(),
        refusal_reason: entry.refusal_reason().to_string(),
        is_reference_promoter: false,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
