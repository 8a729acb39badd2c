use chrono::NaiveDate;
use shared::{
    domain::{CandidateProfile, DocumentEntry},
    protocol::CandidatePayload,
};

use crate::{errors::ErrorMap, validation::validate_form};

/// Everything the candidate form owns while it is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub profile: CandidateProfile,
    pub documents: Vec<DocumentEntry>,
    pub errors: ErrorMap,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            profile: CandidateProfile::default(),
            documents: vec![DocumentEntry::empty()],
            errors: ErrorMap::new(),
        }
    }
}

impl FormState {
    pub fn new(profile: CandidateProfile, documents: Vec<DocumentEntry>) -> Self {
        Self {
            profile,
            documents,
            errors: ErrorMap::new(),
        }
    }

    /// Replaces the error map with a fresh validation pass and reports whether it is empty.
    pub fn validate(mut self, today: NaiveDate) -> (Self, bool) {
        self.errors = validate_form(&self.profile, &self.documents, today);
        let valid = self.errors.is_empty();
        (self, valid)
    }

    pub fn payload(&self) -> CandidatePayload {
        CandidatePayload::from_profile(&self.profile, &self.documents)
    }

    /// Validate, then snapshot the payload only if validation passed.
    pub fn prepare_submission(self, today: NaiveDate) -> (Self, Option<CandidatePayload>) {
        let (state, valid) = self.validate(today);
        let payload = valid.then(|| state.payload());
        (state, payload)
    }

    pub fn can_remove_rows(&self) -> bool {
        self.documents.len() > 1
    }
}
