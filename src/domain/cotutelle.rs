//! Cotutelle: a joint-supervision arrangement between two institutions.

use crate::domain::types::DocumentRef;
use serde::{Deserialize, Serialize};

/// Value object describing a joint-supervision arrangement.
///
/// The partner institution is either picked from the consortium catalog
/// (`institution`) or entered free-form (`other_institution_*`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cotutelle {
    pub motivation: String,
    /// Whether the partner institution belongs to the consortium.
    /// `None` when the candidate has not answered yet.
    pub consortium_institution: Option<bool>,
    pub institution: String,
    pub other_institution_name: String,
    pub other_institution_address: String,
    pub opening_request: Vec<DocumentRef>,
    pub convention: Vec<DocumentRef>,
    pub other_documents: Vec<DocumentRef>,
}

impl Cotutelle {
    /// A partner institution is designated either by catalog name or by a
    /// free-form name and address.
    pub fn has_institution(&self) -> bool {
        !self.institution.is_empty()
            || (!self.other_institution_name.is_empty()
                && !self.other_institution_address.is_empty())
    }

    /// Loosest notion of "the candidate declared a cotutelle".
    pub fn is_defined(&self) -> bool {
        !self.motivation.is_empty() || self.has_institution()
    }

    /// Strict completeness rule: motivation, a designated institution and at
    /// minimum the opening-request document.
    pub fn is_complete(&self) -> bool {
        !self.motivation.is_empty() && self.has_institution() && !self.opening_request.is_empty()
    }
}
