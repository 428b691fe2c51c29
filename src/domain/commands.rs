//! Commands expressing intent to change a supervision group.
//!
//! Commands carry the target group id plus the operation payload; the service
//! loads the aggregate, applies the matching operation and saves the result.

use crate::domain::cotutelle::Cotutelle;
use crate::domain::types::{DocumentRef, InstituteId, PersonRef, SupervisionGroupId};
use serde::{Deserialize, Serialize};

/// Intent to change one supervision group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command")]
pub enum SupervisionCommand {
    /// Add a promoter to the group.
    AddPromoter {
        group_id: SupervisionGroupId,
        person: PersonRef,
    },

    /// Add a committee member to the group.
    AddCommitteeMember {
        group_id: SupervisionGroupId,
        person: PersonRef,
    },

    /// Designate an existing promoter as the reference promoter.
    DesignateReferencePromoter {
        group_id: SupervisionGroupId,
        person: PersonRef,
    },

    /// Remove a promoter. No validation; clears the reference slot if needed.
    RemovePromoter {
        group_id: SupervisionGroupId,
        person: PersonRef,
    },

    /// Remove a committee member. No validation.
    RemoveCommitteeMember {
        group_id: SupervisionGroupId,
        person: PersonRef,
    },

    /// Replace the cotutelle declaration.
    DefineCotutelle {
        group_id: SupervisionGroupId,
        cotutelle: Cotutelle,
    },

    /// Verify the panel and cotutelle, lock the group and invite every
    /// pending signatory to sign.
    RequestSignatures { group_id: SupervisionGroupId },

    /// Record an interactive approval by a signatory.
    Approve {
        group_id: SupervisionGroupId,
        person: PersonRef,
        internal_comment: String,
        external_comment: String,
        /// Thesis institute data, checked when the approver is the
        /// reference promoter.
        thesis_institute: Option<InstituteId>,
        thesis_institute_comment: Option<String>,
    },

    /// Record an approval given on a signed PDF.
    ApproveByPdf {
        group_id: SupervisionGroupId,
        person: PersonRef,
        proof_documents: Vec<DocumentRef>,
    },

    /// Record a refusal by a signatory.
    Refuse {
        group_id: SupervisionGroupId,
        person: PersonRef,
        internal_comment: String,
        external_comment: String,
        refusal_reason: String,
    },
}

impl SupervisionCommand {
    /// Target group of the command.
    pub fn group_id(&self) -> SupervisionGroupId {
        match self {
            Self::AddPromoter { group_id, .. }
            | Self::AddCommitteeMember { group_id, .. }
            | Self::DesignateReferencePromoter { group_id, .. }
            | Self::RemovePromoter { group_id, .. }
            | Self::RemoveCommitteeMember { group_id, .. }
            | Self::DefineCotutelle { group_id, .. }
            | Self::RequestSignatures { group_id }
            | Self::Approve { group_id, .. }
            | Self::ApproveByPdf { group_id, .. }
            | Self::Refuse { group_id, .. } => *group_id,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddPromoter { .. } => "add_promoter",
            Self::AddCommitteeMember { .. } => "add_committee_member",
            Self::DesignateReferencePromoter { .. } => "designate_reference_promoter",
            Self::RemovePromoter { .. } => "remove_promoter",
            Self::RemoveCommitteeMember { .. } => "remove_committee_member",
            Self::DefineCotutelle { .. } => "define_cotutelle",
            Self::RequestSignatures { .. } => "request_signatures",
            Self::Approve { .. } => "approve",
            Self::ApproveByPdf { .. } => "approve_by_pdf",
            Self::Refuse { .. } => "refuse",
        }
    }
}
