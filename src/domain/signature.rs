//! Signature entries: one record per signatory and its approval state.
//!
//! A signature list is conceptually a map keyed by signatory identity even
//! though order is preserved for display; replacement is an upsert, never a
//! filter-then-append pair.

use crate::domain::types::{CommitteeMemberId, DocumentRef, PromoterId, SignatureState};
use serde::{Deserialize, Serialize};

/// One signatory's signature record.
///
/// `Id` is the role-typed identity (`PromoterId` or `CommitteeMemberId`);
/// the two concrete shapes never mix within one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature<Id> {
    signatory: Id,
    state: SignatureState,
    internal_comment: String,
    external_comment: String,
    refusal_reason: String,
    proof_documents: Vec<DocumentRef>,
}

/// Signature entry of a promoter.
pub type PromoterSignature = Signature<PromoterId>;

/// Signature entry of a committee member.
pub type CommitteeSignature = Signature<CommitteeMemberId>;

impl<Id> Signature<Id> {
    /// Entry for a freshly added signatory.
    pub fn not_invited(signatory: Id) -> Self {
        Self::with_state(signatory, SignatureState::NotInvited)
    }

    /// Entry for an invited signatory, previous comments discarded.
    pub fn invited(signatory: Id) -> Self {
        Self::with_state(signatory, SignatureState::Invited)
    }

    /// Entry recording an interactive approval.
    pub fn approved(signatory: Id, internal_comment: &str, external_comment: &str) -> Self {
        Self {
            internal_comment: internal_comment.to_string(),
            external_comment: external_comment.to_string(),
            ..Self::with_state(signatory, SignatureState::Approved)
        }
    }

    /// Entry recording an approval given on a signed PDF document.
    pub fn approved_by_pdf(signatory: Id, proof_documents: Vec<DocumentRef>) -> Self {
        Self {
            proof_documents,
            ..Self::with_state(signatory, SignatureState::Approved)
        }
    }

    /// Entry recording a refusal.
    pub fn declined(
        signatory: Id,
        internal_comment: &str,
        external_comment: &str,
        refusal_reason: &str,
    ) -> Self {
        Self {
            internal_comment: internal_comment.to_string(),
            external_comment: external_comment.to_string(),
            refusal_reason: refusal_reason.to_string(),
            ..Self::with_state(signatory, SignatureState::Declined)
        }
    }

    fn with_state(signatory: Id, state: SignatureState) -> Self {
        Self {
            signatory,
            state,
            internal_comment: String::new(),
            external_comment: String::new(),
            refusal_reason: String::new(),
            proof_documents: Vec::new(),
        }
    }

    pub fn signatory(&self) -> &Id {
        &self.signatory
    }

    pub fn state(&self) -> SignatureState {
        self.state
    }

    /// Manager-facing comment.
    pub fn internal_comment(&self) -> &str {
        &self.internal_comment
    }

    /// Signatory-facing comment.
    pub fn external_comment(&self) -> &str {
        &self.external_comment
    }

    /// Only meaningful when the state is `Declined`.
    pub fn refusal_reason(&self) -> &str {
        &self.refusal_reason
    }

    /// Documents proving an approval recorded by PDF.
    pub fn proof_documents(&self) -> &[DocumentRef] {
        &self.proof_documents
    }
}

impl<Id: Clone> Signature<Id> {
    /// A copy of this entry moved back to `NotInvited`. Only the state
    /// changes; comments and proof documents stay visible until the next
    /// invitation replaces the entry. Used by the promoter-refusal cascade.
    pub fn reset(&self) -> Self {
        Self {
            state: SignatureState::NotInvited,
            ..self.clone()
        }
    }
}

/// Finds the entry keyed by `id`, if any.
pub(crate) fn find<'a, Id: PartialEq>(
    entries: &'a [Signature<Id>],
    id: &Id,
) -> Option<&'a Signature<Id>> {
    entries.iter().find(|entry| entry.signatory() == id)
}

/// Inserts `entry`, replacing any existing entry with the same identity in
/// place. Keeps display order stable and prevents duplicate identities.
pub(crate) fn upsert<Id: PartialEq>(entries: &mut Vec<Signature<Id>>, entry: Signature<Id>) {
    match entries
        .iter()
        .position(|existing| existing.signatory() == entry.signatory())
    {
        Some(index) => entries[index] = entry,
        None => entries.push(entry),
    }
}

/// Removes the entry keyed by `id`. Returns whether an entry was removed.
pub(crate) fn remove<Id: PartialEq>(entries: &mut Vec<Signature<Id>>, id: &Id) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.signatory() != id);
    entries.len() != before
}
