//! Single-purpose validation rules and their composition modes.
//!
//! Each rule is a pure function returning at most one violation. Mutation
//! preconditions run through [`fail_fast`]: the first violation aborts the
//! operation. Completeness verifications run through [`collect_all`]: every
//! failing rule is reported at once so the caller can present a full
//! checklist instead of one-at-a-time trial and error.

use crate::domain::cotutelle::Cotutelle;
use crate::domain::errors::{RuleViolation, ViolationList};
use crate::domain::group::SupervisionGroup;
use crate::domain::signature::{CommitteeSignature, PromoterSignature};
use crate::domain::types::{
    GroupSignatureStatus, InstituteId, PersonRef, PromoterId, SignatoryId, SignatureState,
};

/// Outcome of one rule.
pub type RuleResult = Result<(), RuleViolation>;

/// Evaluates rules in order; the first violation wins.
pub fn fail_fast(checks: impl IntoIterator<Item = RuleResult>) -> RuleResult {
    for check in checks {
        check?;
    }
    Ok(())
}

/// Evaluates every rule and accumulates all violations, in order.
pub fn collect_all(checks: impl IntoIterator<Item = RuleResult>) -> Result<(), ViolationList> {
    let violations: Vec<RuleViolation> = checks.into_iter().filter_map(Result::err).collect();
    match ViolationList::from_violations(violations) {
        Some(list) => Err(list),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// The signatory must have a signature entry under its role.
pub(crate) fn should_signatory_be_in_group(
    group: &SupervisionGroup,
    signatory: &SignatoryId,
) -> RuleResult {
    if group.signature_state_of(signatory).is_some() {
        Ok(())
    } else {
        Err(RuleViolation::SignatoryNotFound {
            person: signatory.person().clone(),
        })
    }
}

/// Approving or refusing requires a live invitation.
pub(crate) fn should_signatory_be_invited(
    group: &SupervisionGroup,
    signatory: &SignatoryId,
) -> RuleResult {
    match group.signature_state_of(signatory) {
        Some(SignatureState::Invited) => Ok(()),
        _ => Err(RuleViolation::SignatoryNotInvited {
            signatory: signatory.clone(),
        }),
    }
}

/// Inviting requires that no invitation is already outstanding or answered.
pub(crate) fn should_signatory_not_be_invited(
    group: &SupervisionGroup,
    signatory: &SignatoryId,
) -> RuleResult {
    match group.signature_state_of(signatory) {
        Some(SignatureState::Invited) | Some(SignatureState::Approved) => {
            Err(RuleViolation::SignatoryAlreadyInvited {
                signatory: signatory.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// Dedicated rule for designating the reference promoter.
pub(crate) fn should_reference_promoter_be_in_group(
    group: &SupervisionGroup,
    promoter: &PromoterId,
) -> RuleResult {
    if group.has_promoter(promoter) {
        Ok(())
    } else {
        Err(RuleViolation::ReferencePromoterNotInGroup {
            person: promoter.person().clone(),
        })
    }
}

/// A person joins the group at most once, under at most one role.
pub(crate) fn should_person_not_already_be_member(
    group: &SupervisionGroup,
    person: &PersonRef,
) -> RuleResult {
    if group.has_person(person) {
        Err(RuleViolation::AlreadyMember {
            person: person.clone(),
        })
    } else {
        Ok(())
    }
}

/// The group needs at least one committee member before signatures are
/// requested. Promoter sufficiency is checked by the submission service.
pub(crate) fn should_have_committee_member(committee: &[CommitteeSignature]) -> RuleResult {
    if committee.is_empty() {
        Err(RuleViolation::MissingCommitteeMember)
    } else {
        Ok(())
    }
}

pub(crate) fn should_promoters_have_approved(promoters: &[PromoterSignature]) -> RuleResult {
    if promoters
        .iter()
        .all(|entry| entry.state() == SignatureState::Approved)
    {
        Ok(())
    } else {
        Err(RuleViolation::PromotersHaveNotApproved)
    }
}

pub(crate) fn should_committee_have_approved(committee: &[CommitteeSignature]) -> RuleResult {
    if committee
        .iter()
        .all(|entry| entry.state() == SignatureState::Approved)
    {
        Ok(())
    } else {
        Err(RuleViolation::CommitteeMembersHaveNotApproved)
    }
}

/// Final approval can only be verified once the candidate requested
/// signatures.
pub(crate) fn should_signing_be_under_way(status: GroupSignatureStatus) -> RuleResult {
    if status == GroupSignatureStatus::SigningInProgress {
        Ok(())
    } else {
        Err(RuleViolation::SigningNotUnderWay)
    }
}

/// Membership changes are frozen once signature requests went out.
pub(crate) fn should_signatures_not_be_sent(status: GroupSignatureStatus) -> RuleResult {
    if status == GroupSignatureStatus::InProgress {
        Ok(())
    } else {
        Err(RuleViolation::SignaturesAlreadySent)
    }
}

/// An undeclared cotutelle is accepted; a declared one must be complete.
pub(crate) fn should_cotutelle_be_complete(cotutelle: Option<&Cotutelle>) -> RuleResult {
    match cotutelle {
        Some(declaration) if !declaration.is_complete() => Err(RuleViolation::CotutelleIncomplete),
        _ => Ok(()),
    }
}

/// Approval by the reference promoter is blocked until the thesis institute
/// is documented, either as a catalog reference or as free text.
/// Other signatories are not subject to this rule.
pub(crate) fn should_reference_promoter_document_institute(
    signatory: &SignatoryId,
    reference_promoter: Option<&PromoterId>,
    thesis_institute: Option<InstituteId>,
    thesis_institute_comment: Option<&str>,
) -> RuleResult {
    let is_reference = match signatory {
        SignatoryId::Promoter(promoter) => reference_promoter == Some(promoter),
        SignatoryId::CommitteeMember(_) => false,
    };
    let documented =
        thesis_institute.is_some() || thesis_institute_comment.is_some_and(|text| !text.is_empty());
    if is_reference && !documented {
        Err(RuleViolation::ThesisInstituteNotSet)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Per-operation rule lists
// ---------------------------------------------------------------------------

/// Preconditions for `approve`, `approve_by_pdf` and `refuse`.
pub(crate) fn approval_preconditions(
    group: &SupervisionGroup,
    signatory: &SignatoryId,
) -> RuleResult {
    fail_fast([
        should_signatory_be_in_group(group, signatory),
        should_signatory_be_invited(group, signatory),
    ])
}

/// Preconditions for inviting one signatory to sign.
pub(crate) fn invitation_preconditions(
    group: &SupervisionGroup,
    signatory: &SignatoryId,
) -> RuleResult {
    fail_fast([
        should_signatory_be_in_group(group, signatory),
        should_signatory_not_be_invited(group, signatory),
    ])
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
