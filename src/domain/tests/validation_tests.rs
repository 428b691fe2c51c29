//! Tests for rule composition and individual rules.

use super::*;
use crate::domain::group::SupervisionGroup;
use crate::domain::types::{
    CommitteeMemberId, PromoterId, PropositionId, SupervisionGroupId,
};

fn violation_a() -> RuleViolation {
    RuleViolation::MissingCommitteeMember
}

fn violation_b() -> RuleViolation {
    RuleViolation::CotutelleIncomplete
}

fn panel() -> SupervisionGroup {
    let mut group = SupervisionGroup::new(SupervisionGroupId::new(), PropositionId::new());
    group.add_promoter(PromoterId::from("alice")).unwrap();
    group
        .add_committee_member(CommitteeMemberId::from("carol"))
        .unwrap();
    group
}

// ========== Composition ==========

#[test]
fn fail_fast_returns_the_first_violation() {
    let result = fail_fast([Ok(()), Err(violation_a()), Err(violation_b())]);
    assert_eq!(result.unwrap_err(), violation_a());
}

#[test]
fn fail_fast_passes_when_every_rule_passes() {
    assert!(fail_fast([Ok(()), Ok(()), Ok(())]).is_ok());
    assert!(fail_fast([]).is_ok());
}

#[test]
fn collect_all_accumulates_violations_in_rule_order() {
    let list = collect_all([Err(violation_a()), Ok(()), Err(violation_b())]).unwrap_err();
    assert_eq!(list.violations(), [violation_a(), violation_b()]);
}

#[test]
fn collect_all_passes_when_every_rule_passes() {
    assert!(collect_all([Ok(()), Ok(())]).is_ok());
    assert!(collect_all([]).is_ok());
}

// ========== Individual rules ==========

#[test]
fn declined_signatories_are_eligible_for_reinvitation() {
    let mut group = panel();
    group.lock_for_signature();
    group.invite_all_pending_to_sign().unwrap();
    let alice = SignatoryId::Promoter(PromoterId::from("alice"));
    group.refuse(&alice, "", "", "reason").unwrap();

    assert!(should_signatory_not_be_invited(&group, &alice).is_ok());
}

#[test]
fn invited_and_approved_signatories_cannot_be_reinvited() {
    let mut group = panel();
    group.lock_for_signature();
    group.invite_all_pending_to_sign().unwrap();
    let alice = SignatoryId::Promoter(PromoterId::from("alice"));
    let carol = SignatoryId::CommitteeMember(CommitteeMemberId::from("carol"));

    assert!(should_signatory_not_be_invited(&group, &alice).is_err());
    group.approve(&carol, "", "").unwrap();
    assert!(should_signatory_not_be_invited(&group, &carol).is_err());
}

#[test]
fn approval_preconditions_report_missing_membership_first() {
    let group = panel();
    let mallory = SignatoryId::Promoter(PromoterId::from("mallory"));
    let err = approval_preconditions(&group, &mallory).unwrap_err();
    assert_eq!(
        err,
        RuleViolation::SignatoryNotFound {
            person: "mallory".into()
        }
    );
}

#[test]
fn empty_promoter_panel_counts_as_approved() {
    // Vacuous truth; panel completeness is a separate rule.
    assert!(should_promoters_have_approved(&[]).is_ok());
    assert!(should_committee_have_approved(&[]).is_ok());
}

#[test]
fn undeclared_cotutelle_passes_the_completeness_rule() {
    assert!(should_cotutelle_be_complete(None).is_ok());
}

#[test]
fn declared_but_empty_cotutelle_fails_the_completeness_rule() {
    let declaration = Cotutelle::default();
    assert_eq!(
        should_cotutelle_be_complete(Some(&declaration)).unwrap_err(),
        RuleViolation::CotutelleIncomplete
    );
}
