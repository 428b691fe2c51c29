//! The supervision group aggregate root.
//!
//! One group exists per doctoral proposition. The candidate assembles the
//! signatory panel and requests signatures; promoters and committee members
//! then approve or refuse. Every mutation runs its validation rules before
//! touching state, so a violation leaves the aggregate unchanged.

use crate::domain::cotutelle::Cotutelle;
use crate::domain::errors::{RuleViolation, ViolationList};
use crate::domain::signature::{self, CommitteeSignature, PromoterSignature, Signature};
use crate::domain::types::{
    CommitteeMemberId, DocumentRef, GroupSignatureStatus, InstituteId, PersonRef, PromoterId,
    PropositionId, SignatoryId, SignatureState, SupervisionGroupId,
};
use crate::domain::validation;
use serde::{Deserialize, Serialize};

/// Aggregate coordinating all signatories for one doctoral proposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisionGroup {
    entity_id: SupervisionGroupId,
    proposition_id: PropositionId,
    promoter_signatures: Vec<PromoterSignature>,
    committee_signatures: Vec<CommitteeSignature>,
    cotutelle: Option<Cotutelle>,
    signature_status: GroupSignatureStatus,
    reference_promoter: Option<PromoterId>,
}

impl SupervisionGroup {
    /// Creates the empty group for a freshly initiated proposition.
    pub fn new(entity_id: SupervisionGroupId, proposition_id: PropositionId) -> Self {
        Self {
            entity_id,
            proposition_id,
            promoter_signatures: Vec::new(),
            committee_signatures: Vec::new(),
            cotutelle: None,
            signature_status: GroupSignatureStatus::InProgress,
            reference_promoter: None,
        }
    }

    // ========== Membership ==========

    /// Adds a promoter with a fresh `NotInvited` entry.
    ///
    /// The person must not already be part of the group under either role;
    /// caps on panel size, if any, are enforced upstream.
    pub fn add_promoter(&mut self, promoter: PromoterId) -> Result<(), RuleViolation> {
        validation::should_person_not_already_be_member(self, promoter.person())?;
        self.promoter_signatures.push(Signature::not_invited(promoter));
        Ok(())
    }

    /// Adds a committee member with a fresh `NotInvited` entry.
    pub fn add_committee_member(&mut self, member: CommitteeMemberId) -> Result<(), RuleViolation> {
        validation::should_person_not_already_be_member(self, member.person())?;
        self.committee_signatures.push(Signature::not_invited(member));
        Ok(())
    }

    /// Removes a promoter. Deliberately unvalidated: any signatory can be
    /// removed at any time. Removing the reference promoter clears the
    /// reference slot.
    pub fn remove_promoter(&mut self, promoter: &PromoterId) {
        signature::remove(&mut self.promoter_signatures, promoter);
        if self.reference_promoter.as_ref() == Some(promoter) {
            self.reference_promoter = None;
        }
    }

    /// Removes a committee member. Deliberately unvalidated.
    pub fn remove_committee_member(&mut self, member: &CommitteeMemberId) {
        signature::remove(&mut self.committee_signatures, member);
    }

    /// Designates `promoter` as the single reference promoter, silently
    /// replacing any previous designation.
    pub fn designate_reference_promoter(
        &mut self,
        promoter: &PromoterId,
    ) -> Result<(), RuleViolation> {
        validation::should_reference_promoter_be_in_group(self, promoter)?;
        self.reference_promoter = Some(promoter.clone());
        Ok(())
    }

    // ========== Lookups ==========

    /// Looks up a signatory by person reference, promoters first.
    pub fn signatory(&self, person: &PersonRef) -> Result<SignatoryId, RuleViolation> {
        if let Some(entry) = self
            .promoter_signatures
            .iter()
            .find(|entry| entry.signatory().person() == person)
        {
            return Ok(SignatoryId::Promoter(entry.signatory().clone()));
        }
        if let Some(entry) = self
            .committee_signatures
            .iter()
            .find(|entry| entry.signatory().person() == person)
        {
            return Ok(SignatoryId::CommitteeMember(entry.signatory().clone()));
        }
        Err(RuleViolation::SignatoryNotFound {
            person: person.clone(),
        })
    }

    /// Narrows [`Self::signatory`] to a promoter, with a precise error when
    /// the person is in the group under the other role.
    pub fn promoter(&self, person: &PersonRef) -> Result<PromoterId, RuleViolation> {
        match self.signatory(person)? {
            SignatoryId::Promoter(promoter) => Ok(promoter),
            SignatoryId::CommitteeMember(_) => Err(RuleViolation::PromoterNotFound {
                person: person.clone(),
            }),
        }
    }

    /// Narrows [`Self::signatory`] to a committee member.
    pub fn committee_member(&self, person: &PersonRef) -> Result<CommitteeMemberId, RuleViolation> {
        match self.signatory(person)? {
            SignatoryId::CommitteeMember(member) => Ok(member),
            SignatoryId::Promoter(_) => Err(RuleViolation::CommitteeMemberNotFound {
                person: person.clone(),
            }),
        }
    }

    // ========== Signing ==========

    /// Invites every `NotInvited` or `Declined` signatory to sign.
    ///
    /// All-or-nothing: every entry is validated before any entry is mutated,
    /// so a violation leaves no partial invitation state behind. Calling this
    /// twice without intervening changes is a no-op the second time.
    pub fn invite_all_pending_to_sign(&mut self) -> Result<(), RuleViolation> {
        let pending_promoters: Vec<PromoterId> = self
            .promoter_signatures
            .iter()
            .filter(|entry| entry.state().is_pending())
            .map(|entry| entry.signatory().clone())
            .collect();
        let pending_members: Vec<CommitteeMemberId> = self
            .committee_signatures
            .iter()
            .filter(|entry| entry.state().is_pending())
            .map(|entry| entry.signatory().clone())
            .collect();

        for promoter in &pending_promoters {
            validation::invitation_preconditions(
                self,
                &SignatoryId::Promoter(promoter.clone()),
            )?;
        }
        for member in &pending_members {
            validation::invitation_preconditions(
                self,
                &SignatoryId::CommitteeMember(member.clone()),
            )?;
        }

        for promoter in pending_promoters {
            signature::upsert(&mut self.promoter_signatures, Signature::invited(promoter));
        }
        for member in pending_members {
            signature::upsert(&mut self.committee_signatures, Signature::invited(member));
        }
        Ok(())
    }

    /// Records an interactive approval. The signatory must be part of the
    /// group and currently invited.
    pub fn approve(
        &mut self,
        signatory: &SignatoryId,
        internal_comment: &str,
        external_comment: &str,
    ) -> Result<(), RuleViolation> {
        validation::approval_preconditions(self, signatory)?;
        match signatory {
            SignatoryId::Promoter(promoter) => signature::upsert(
                &mut self.promoter_signatures,
                Signature::approved(promoter.clone(), internal_comment, external_comment),
            ),
            SignatoryId::CommitteeMember(member) => signature::upsert(
                &mut self.committee_signatures,
                Signature::approved(member.clone(), internal_comment, external_comment),
            ),
        }
        Ok(())
    }

    /// Records an approval given on a signed PDF, storing the proof documents
    /// instead of free-text comments.
    pub fn approve_by_pdf(
        &mut self,
        signatory: &SignatoryId,
        proof_documents: Vec<DocumentRef>,
    ) -> Result<(), RuleViolation> {
        validation::approval_preconditions(self, signatory)?;
        match signatory {
            SignatoryId::Promoter(promoter) => signature::upsert(
                &mut self.promoter_signatures,
                Signature::approved_by_pdf(promoter.clone(), proof_documents),
            ),
            SignatoryId::CommitteeMember(member) => signature::upsert(
                &mut self.committee_signatures,
                Signature::approved_by_pdf(member.clone(), proof_documents),
            ),
        }
        Ok(())
    }

    /// Records a refusal.
    ///
    /// A promoter's refusal marks that promoter `Declined` and resets every
    /// other promoter to `NotInvited`: the whole promoter panel must be
    /// re-invited once the proposal is revised. Committee entries are left
    /// untouched. A committee member's refusal is modeled as withdrawal: the
    /// entry is removed, promoters are left untouched.
    pub fn refuse(
        &mut self,
        signatory: &SignatoryId,
        internal_comment: &str,
        external_comment: &str,
        refusal_reason: &str,
    ) -> Result<(), RuleViolation> {
        validation::approval_preconditions(self, signatory)?;
        match signatory {
            SignatoryId::Promoter(refusing) => {
                self.promoter_signatures = self
                    .promoter_signatures
                    .iter()
                    .map(|entry| {
                        if entry.signatory() == refusing {
                            Signature::declined(
                                refusing.clone(),
                                internal_comment,
                                external_comment,
                                refusal_reason,
                            )
                        } else {
                            entry.reset()
                        }
                    })
                    .collect();
            }
            SignatoryId::CommitteeMember(member) => {
                signature::remove(&mut self.committee_signatures, member);
            }
        }
        Ok(())
    }

    /// Sets the group to `SigningInProgress`. Deliberately unvalidated;
    /// callers check invitation preconditions at the command level.
    pub fn lock_for_signature(&mut self) {
        self.signature_status = GroupSignatureStatus::SigningInProgress;
    }

    /// Unconditionally replaces the cotutelle declaration. Always allowed
    /// while the group is mutable.
    pub fn define_cotutelle(&mut self, cotutelle: Cotutelle) {
        self.cotutelle = Some(cotutelle);
    }

    // ========== Verifications ==========

    /// Every promoter and committee member must have approved, and the
    /// signing procedure must be under way. Violations accumulate.
    pub fn verify_everyone_approved(&self) -> Result<(), ViolationList> {
        validation::collect_all([
            validation::should_signing_be_under_way(self.signature_status),
            validation::should_promoters_have_approved(&self.promoter_signatures),
            validation::should_committee_have_approved(&self.committee_signatures),
        ])
    }

    /// A declared cotutelle must be complete; an undeclared one is accepted.
    pub fn verify_cotutelle(&self) -> Result<(), ViolationList> {
        validation::collect_all([validation::should_cotutelle_be_complete(
            self.cotutelle.as_ref(),
        )])
    }

    /// The panel needs at least one committee member. Promoter sufficiency
    /// is a submission-level concern, checked outside this aggregate.
    pub fn verify_signatories_complete(&self) -> Result<(), ViolationList> {
        validation::collect_all([validation::should_have_committee_member(
            &self.committee_signatures,
        )])
    }

    /// Membership mutations are refused once signature requests went out.
    pub fn verify_signatures_not_sent(&self) -> Result<(), RuleViolation> {
        validation::should_signatures_not_be_sent(self.signature_status)
    }

    /// When the reference promoter is the one approving, the thesis institute
    /// must be documented, as a catalog reference or as free text.
    pub fn verify_reference_promoter_documents_thesis_institute(
        &self,
        signatory: &SignatoryId,
        reference_promoter: Option<&PromoterId>,
        thesis_institute: Option<InstituteId>,
        thesis_institute_comment: Option<&str>,
    ) -> Result<(), RuleViolation> {
        validation::should_reference_promoter_document_institute(
            signatory,
            reference_promoter,
            thesis_institute,
            thesis_institute_comment,
        )
    }

    // ========== Getters ==========

    pub fn id(&self) -> SupervisionGroupId {
        self.entity_id
    }

    pub fn proposition_id(&self) -> PropositionId {
        self.proposition_id
    }

    pub fn promoter_signatures(&self) -> &[PromoterSignature] {
        &self.promoter_signatures
    }

    pub fn committee_signatures(&self) -> &[CommitteeSignature] {
        &self.committee_signatures
    }

    pub fn cotutelle(&self) -> Option<&Cotutelle> {
        self.cotutelle.as_ref()
    }

    pub fn signature_status(&self) -> GroupSignatureStatus {
        self.signature_status
    }

    pub fn reference_promoter(&self) -> Option<&PromoterId> {
        self.reference_promoter.as_ref()
    }

    // ========== Internal helpers for validation rules ==========

    /// State of the entry keyed by this role-tagged signatory, if present.
    pub(crate) fn signature_state_of(&self, signatory: &SignatoryId) -> Option<SignatureState> {
        match signatory {
            SignatoryId::Promoter(promoter) => {
                signature::find(&self.promoter_signatures, promoter).map(Signature::state)
            }
            SignatoryId::CommitteeMember(member) => {
                signature::find(&self.committee_signatures, member).map(Signature::state)
            }
        }
    }

    pub(crate) fn has_promoter(&self, promoter: &PromoterId) -> bool {
        signature::find(&self.promoter_signatures, promoter).is_some()
    }

    /// True if the person appears in either signature list.
    pub(crate) fn has_person(&self, person: &PersonRef) -> bool {
        self.promoter_signatures
            .iter()
            .any(|entry| entry.signatory().person() == person)
            || self
                .committee_signatures
                .iter()
                .any(|entry| entry.signatory().person() == person)
    }
}

#[cfg(test)]
#[path = "tests/group_tests.rs"]
mod tests;
