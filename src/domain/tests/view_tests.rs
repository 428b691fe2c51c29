//! Tests for the supervision group view projection.

use super::*;
use crate::domain::cotutelle::Cotutelle;
use crate::domain::types::{CommitteeMemberId, DocumentRef, PromoterId, SignatoryId};

fn panel() -> SupervisionGroup {
    let mut group = SupervisionGroup::new(SupervisionGroupId::new(), PropositionId::new());
    group.add_promoter(PromoterId::from("alice")).unwrap();
    group.add_promoter(PromoterId::from("bob")).unwrap();
    group
        .add_committee_member(CommitteeMemberId::from("carol"))
        .unwrap();
    group
        .designate_reference_promoter(&PromoterId::from("alice"))
        .unwrap();
    group
}

#[test]
fn projection_lists_promoters_before_committee_members() {
    let view = SupervisionGroupView::project(&panel());
    let people: Vec<&str> = view.signatories.iter().map(|row| row.person.as_str()).collect();
    assert_eq!(people, ["alice", "bob", "carol"]);
    assert_eq!(view.signatories[0].role, SignatoryRole::Promoter);
    assert_eq!(view.signatories[2].role, SignatoryRole::CommitteeMember);
}

#[test]
fn projection_marks_the_reference_promoter() {
    let view = SupervisionGroupView::project(&panel());
    let flags: Vec<bool> = view
        .signatories
        .iter()
        .map(|row| row.is_reference_promoter)
        .collect();
    assert_eq!(flags, [true, false, false]);
}

#[test]
fn projection_reports_signing_progress() {
    let mut group = panel();
    let before = SupervisionGroupView::project(&group);
    assert_eq!(before.signature_status, GroupSignatureStatus::InProgress);
    assert!(!before.all_approved);

    group.lock_for_signature();
    group.invite_all_pending_to_sign().unwrap();
    for person in ["alice", "bob"] {
        group
            .approve(&SignatoryId::Promoter(PromoterId::from(person)), "", "")
            .unwrap();
    }
    group
        .approve(
            &SignatoryId::CommitteeMember(CommitteeMemberId::from("carol")),
            "",
            "",
        )
        .unwrap();

    let after = SupervisionGroupView::project(&group);
    assert_eq!(after.signature_status, GroupSignatureStatus::SigningInProgress);
    assert!(after.all_approved);
    assert!(after
        .signatories
        .iter()
        .all(|row| row.state == SignatureState::Approved));
}

#[test]
fn projection_summarizes_the_cotutelle() {
    let mut group = panel();
    let none = SupervisionGroupView::project(&group);
    assert!(!none.has_cotutelle);
    assert!(!none.cotutelle_complete);

    group.define_cotutelle(Cotutelle {
        motivation: "joint degree".to_string(),
        ..Cotutelle::default()
    });
    let declared = SupervisionGroupView::project(&group);
    assert!(declared.has_cotutelle);
    assert!(!declared.cotutelle_complete);

    group.define_cotutelle(Cotutelle {
        motivation: "joint degree".to_string(),
        institution: "Partner University".to_string(),
        opening_request: vec![DocumentRef::from("opening-request.pdf")],
        ..Cotutelle::default()
    });
    let complete = SupervisionGroupView::project(&group);
    assert!(complete.cotutelle_complete);
}

#[test]
fn projection_carries_refusal_details() {
    let mut group = panel();
    group.lock_for_signature();
    group.invite_all_pending_to_sign().unwrap();
    group
        .refuse(
            &SignatoryId::Promoter(PromoterId::from("alice")),
            "internal",
            "please revise",
            "scope too broad",
        )
        .unwrap();

    let view = SupervisionGroupView::project(&group);
    let alice = &view.signatories[0];
    assert_eq!(alice.state, SignatureState::Declined);
    assert_eq!(alice.external_comment, "please revise");
    assert_eq!(alice.refusal_reason, "scope too broad");
}
