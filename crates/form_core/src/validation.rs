//! Whole-form validation.
//!
//! Every rule runs independently and all failures are collected, so one pass reports
//! every offending field at once.

use chrono::{Datelike, NaiveDate};
use shared::domain::{CandidateProfile, DocumentEntry, ProfileField};

use crate::errors::{ErrorMap, DOCUMENTS_KEY};

pub const MIN_AGE_YEARS: i32 = 18;
pub const MIN_DOCUMENT_ROWS: usize = 2;

pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email.";
pub const DOB_REQUIRED: &str = "Date of Birth is required.";
pub const DOB_UNPARSEABLE: &str = "Enter a valid date of birth.";
pub const DOB_UNDERAGE: &str = "You must be at least 18 years old.";
pub const STREET1_REQUIRED: &str = "Street 1 is required.";
pub const STREET2_REQUIRED: &str = "Street 2 is required.";
pub const DOCUMENTS_TOO_FEW: &str = "At least two documents must be uploaded.";

pub const DOB_FORMAT: &str = "%Y-%m-%d";

pub fn validate_form(
    profile: &CandidateProfile,
    documents: &[DocumentEntry],
    today: NaiveDate,
) -> ErrorMap {
    let mut errors = ErrorMap::new();

    require(&mut errors, profile, ProfileField::FirstName, FIRST_NAME_REQUIRED);
    require(&mut errors, profile, ProfileField::LastName, LAST_NAME_REQUIRED);

    if !is_valid_email(&profile.email) {
        errors.insert(ProfileField::Email.key(), EMAIL_INVALID);
    }

    if let Some(message) = dob_error(&profile.dob, today) {
        errors.insert(ProfileField::Dob.key(), message);
    }

    require(&mut errors, profile, ProfileField::ResidentialStreet1, STREET1_REQUIRED);
    require(&mut errors, profile, ProfileField::ResidentialStreet2, STREET2_REQUIRED);

    if !profile.same_as_residential {
        require(&mut errors, profile, ProfileField::PermanentStreet1, STREET1_REQUIRED);
        require(&mut errors, profile, ProfileField::PermanentStreet2, STREET2_REQUIRED);
    }

    // Counts rows only; a row without an attached file still counts.
    if documents.len() < MIN_DOCUMENT_ROWS {
        errors.insert(DOCUMENTS_KEY, DOCUMENTS_TOO_FEW);
    }

    errors
}

fn require(
    errors: &mut ErrorMap,
    profile: &CandidateProfile,
    field: ProfileField,
    message: &'static str,
) {
    let blank = profile
        .text(field)
        .map_or(true, |value| value.trim().is_empty());
    if blank {
        errors.insert(field.key(), message);
    }
}

fn dob_error(dob: &str, today: NaiveDate) -> Option<&'static str> {
    let dob = dob.trim();
    if dob.is_empty() {
        return Some(DOB_REQUIRED);
    }
    match NaiveDate::parse_from_str(dob, DOB_FORMAT) {
        Ok(birth) if age_in_years(birth, today) < MIN_AGE_YEARS => Some(DOB_UNDERAGE),
        Ok(_) => None,
        Err(_) => Some(DOB_UNPARSEABLE),
    }
}

/// Calendar-year difference between `today` and `birth`.
///
/// Whether the birthday has already passed this year is not considered, so someone
/// turning 18 later this year already counts as 18.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}

/// Coarse `local@domain.tld` shape check: no whitespace anywhere, a non-empty local part,
/// and a `.` with at least one character on each side somewhere after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let chars: Vec<char> = email.chars().collect();
    let Some(at) = chars
        .iter()
        .skip(1)
        .position(|c| *c == '@')
        .map(|offset| offset + 1)
    else {
        return false;
    };
    (at + 2..chars.len().saturating_sub(1)).any(|index| chars[index] == '.')
}
