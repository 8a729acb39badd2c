//! Pure state transitions for the candidate form.
//!
//! Every edit goes through [`reduce`], which consumes the current [`FormState`] and returns
//! the next one. Edits only ever clear errors eagerly; new field errors appear on the next
//! [`FormAction::Validate`].

use chrono::NaiveDate;
use shared::domain::{Attachment, DocumentEntry, FileType, ProfileField};

use crate::{
    errors::{document_row_key, DOCUMENTS_KEY},
    state::FormState,
    validation::{validate_form, MIN_DOCUMENT_ROWS},
};

pub const DOCUMENTS_BELOW_MINIMUM: &str = "At least 2 documents must be uploaded.";
pub const INCORRECT_FILE_TYPE: &str = "Incorrect file type selected. Please upload a valid file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    fn clears_error(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Flag(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentChange {
    FileName(String),
    FileType(FileType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetField {
        field: ProfileField,
        value: FieldValue,
    },
    /// `None` is an empty picker selection.
    SetProfilePhoto(Option<Attachment>),
    AddRow,
    RemoveRow(usize),
    UpdateRow {
        index: usize,
        change: DocumentChange,
    },
    SetRowFile {
        index: usize,
        file: Option<Attachment>,
    },
    Validate {
        today: NaiveDate,
    },
}

pub fn reduce(state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetField { field, value } => set_field(state, field, value),
        FormAction::SetProfilePhoto(photo) => set_profile_photo(state, photo),
        FormAction::AddRow => add_row(state),
        FormAction::RemoveRow(index) => remove_row(state, index),
        FormAction::UpdateRow { index, change } => update_row(state, index, change),
        FormAction::SetRowFile { index, file } => set_row_file(state, index, file),
        FormAction::Validate { today } => {
            let mut state = state;
            state.errors = validate_form(&state.profile, &state.documents, today);
            state
        }
    }
}

fn set_field(mut state: FormState, field: ProfileField, value: FieldValue) -> FormState {
    let clears_error = value.clears_error();
    match (field.is_flag(), value) {
        (true, FieldValue::Flag(flag)) => state.profile.same_as_residential = flag,
        (false, FieldValue::Text(text)) => {
            if let Some(slot) = state.profile.text_mut(field) {
                *slot = text;
            }
        }
        (_, value) => {
            tracing::warn!(field = field.key(), ?value, "ignoring value of the wrong kind");
            return state;
        }
    }

    if clears_error {
        state.errors.remove(field.key());
    }
    state
}

fn set_profile_photo(mut state: FormState, photo: Option<Attachment>) -> FormState {
    if let Some(photo) = photo {
        tracing::debug!(file_name = %photo.file_name, "profile photo selected");
        state.profile.profile_photo = Some(photo);
    }
    state
}

fn refresh_document_count_error(state: &mut FormState) {
    if state.documents.len() < MIN_DOCUMENT_ROWS {
        state.errors.insert(DOCUMENTS_KEY, DOCUMENTS_BELOW_MINIMUM);
    } else {
        state.errors.remove(DOCUMENTS_KEY);
    }
}

fn add_row(mut state: FormState) -> FormState {
    state.documents.push(DocumentEntry::empty());
    refresh_document_count_error(&mut state);
    state
}

fn remove_row(mut state: FormState, index: usize) -> FormState {
    if state.documents.len() <= 1 {
        tracing::warn!("At least one document row must remain.");
        return state;
    }
    if index >= state.documents.len() {
        tracing::warn!(index, rows = state.documents.len(), "remove for unknown document row");
        return state;
    }

    state.documents.remove(index);
    state.errors.shift_rows_after_removal(index);
    refresh_document_count_error(&mut state);
    state
}

fn update_row(mut state: FormState, index: usize, change: DocumentChange) -> FormState {
    let rows = state.documents.len();
    let Some(entry) = state.documents.get_mut(index) else {
        tracing::warn!(index, rows, "update for unknown document row");
        return state;
    };

    match change {
        DocumentChange::FileName(name) => entry.file_name = name,
        DocumentChange::FileType(file_type) => entry.file_type = file_type,
    }

    if rows >= MIN_DOCUMENT_ROWS {
        state.errors.remove(DOCUMENTS_KEY);
    }
    state
}

fn set_row_file(mut state: FormState, index: usize, file: Option<Attachment>) -> FormState {
    let Some(file) = file else {
        return state;
    };
    let rows = state.documents.len();
    let Some(entry) = state.documents.get_mut(index) else {
        tracing::warn!(index, rows, "file for unknown document row");
        return state;
    };

    let key = document_row_key(index);
    if entry.file_type.accepts(&file.file_name) {
        tracing::debug!(index, file_name = %file.file_name, "document file accepted");
        entry.file = Some(file);
        state.errors.remove(&key);
    } else {
        // The previously accepted file, if any, stays attached.
        tracing::debug!(
            index,
            file_name = %file.file_name,
            file_type = ?entry.file_type,
            "document file rejected"
        );
        state.errors.insert(key, INCORRECT_FILE_TYPE);
    }
    state
}
