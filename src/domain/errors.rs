//! Business-rule violations for the supervision group domain.
//!
//! Every violation is an expected, user-recoverable condition. Infrastructure
//! failures (store unavailable, write conflicts) live in `store::StoreError`
//! and are never mixed into this taxonomy.

use crate::domain::types::{PersonRef, SignatoryId};
use std::fmt::{Display, Formatter};

/// A single business-rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// No signature entry for this person in either list.
    SignatoryNotFound { person: PersonRef },
    /// The person is in the group but is not a promoter.
    PromoterNotFound { person: PersonRef },
    /// The person is in the group but is not a committee member.
    CommitteeMemberNotFound { person: PersonRef },
    /// The designated reference promoter has no promoter signature entry.
    ReferencePromoterNotInGroup { person: PersonRef },
    /// The person already has a signature entry, under either role.
    AlreadyMember { person: PersonRef },
    /// Invitation requested for a signatory that is already invited or has
    /// already signed.
    SignatoryAlreadyInvited { signatory: SignatoryId },
    /// Approval or refusal recorded for a signatory that was never invited.
    SignatoryNotInvited { signatory: SignatoryId },
    /// The cotutelle declaration is missing required fields or documents.
    CotutelleIncomplete,
    /// The group has no committee member signature entry.
    MissingCommitteeMember,
    /// At least one promoter has not approved.
    PromotersHaveNotApproved,
    /// At least one committee member has not approved.
    CommitteeMembersHaveNotApproved,
    /// The signing procedure has not been started for this group.
    SigningNotUnderWay,
    /// The signing procedure has already been started; membership is frozen.
    SignaturesAlreadySent,
    /// The reference promoter approved without documenting a thesis institute.
    ThesisInstituteNotSet,
}

impl Display for RuleViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignatoryNotFound { person } => {
                write!(f, "signatory '{}' is not part of the supervision group", person)
            }
            Self::PromoterNotFound { person } => {
                write!(f, "'{}' is not a promoter of the supervision group", person)
            }
            Self::CommitteeMemberNotFound { person } => {
                write!(f, "'{}' is not a committee member of the supervision group", person)
            }
            Self::ReferencePromoterNotInGroup { person } => {
                write!(f, "reference promoter '{}' is not part of the supervision group", person)
            }
            Self::AlreadyMember { person } => {
                write!(f, "'{}' is already a member of the supervision group", person)
            }
            Self::SignatoryAlreadyInvited { signatory } => {
                write!(f, "signatory '{}' has already been invited to sign", signatory)
            }
            Self::SignatoryNotInvited { signatory } => {
                write!(f, "signatory '{}' has not been invited to sign", signatory)
            }
            Self::CotutelleIncomplete => write!(f, "the cotutelle declaration is incomplete"),
            Self::MissingCommitteeMember => {
                write!(f, "the supervision group has no committee member")
            }
            Self::PromotersHaveNotApproved => {
                write!(f, "not every promoter has approved the proposition")
            }
            Self::CommitteeMembersHaveNotApproved => {
                write!(f, "not every committee member has approved the proposition")
            }
            Self::SigningNotUnderWay => {
                write!(f, "the signing procedure has not been started")
            }
            Self::SignaturesAlreadySent => {
                write!(f, "signature requests have already been sent")
            }
            Self::ThesisInstituteNotSet => {
                write!(f, "the reference promoter must document the thesis institute")
            }
        }
    }
}

impl std::error::Error for RuleViolation {}

/// A non-empty, ordered list of simultaneously failing rules.
///
/// Completeness verifications accumulate every violation so a caller can show
/// the full checklist of what is missing in one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationList {
    violations: Vec<RuleViolation>,
}

impl ViolationList {
    /// Wraps accumulated violations. Returns `None` when the list is empty,
    /// which callers treat as success.
    pub fn from_violations(violations: Vec<RuleViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    /// True if the given violation is among the accumulated ones.
    pub fn contains(&self, violation: &RuleViolation) -> bool {
        self.violations.contains(violation)
    }
}

impl From<RuleViolation> for ViolationList {
    fn from(violation: RuleViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl Display for ViolationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ViolationList {}
