use serde::{Deserialize, Serialize};

use crate::domain::{Attachment, CandidateProfile, DocumentEntry, ProfileField};

/// Path of the candidates collection resource, relative to the API root.
pub const CANDIDATE_ENDPOINT_PATH: &str = "/api/candidates";

pub const PROFILE_PHOTO_PART: &str = "profilePhoto";
pub const DOCUMENTS_PART: &str = "documents";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Text,
    Flag,
    /// At most one file part.
    Binary,
    /// Zero or more file parts sharing the same name.
    RepeatedBinary,
}

/// Where a part's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSource {
    Field(ProfileField),
    ProfilePhoto,
    Documents,
}

impl PartSource {
    pub fn name(self) -> &'static str {
        match self {
            PartSource::Field(field) => field.key(),
            PartSource::ProfilePhoto => PROFILE_PHOTO_PART,
            PartSource::Documents => DOCUMENTS_PART,
        }
    }

    pub fn kind(self) -> PartKind {
        match self {
            PartSource::Field(field) if field.is_flag() => PartKind::Flag,
            PartSource::Field(_) => PartKind::Text,
            PartSource::ProfilePhoto => PartKind::Binary,
            PartSource::Documents => PartKind::RepeatedBinary,
        }
    }
}

/// Every part a candidate submission may carry, in wire order.
pub const CANDIDATE_SCHEMA: [PartSource; 11] = [
    PartSource::Field(ProfileField::FirstName),
    PartSource::Field(ProfileField::LastName),
    PartSource::Field(ProfileField::Email),
    PartSource::Field(ProfileField::Dob),
    PartSource::Field(ProfileField::ResidentialStreet1),
    PartSource::Field(ProfileField::ResidentialStreet2),
    PartSource::Field(ProfileField::SameAsResidential),
    PartSource::Field(ProfileField::PermanentStreet1),
    PartSource::Field(ProfileField::PermanentStreet2),
    PartSource::ProfilePhoto,
    PartSource::Documents,
];

pub fn part_kind(name: &str) -> Option<PartKind> {
    CANDIDATE_SCHEMA
        .iter()
        .find(|source| source.name() == name)
        .map(|source| source.kind())
}

impl PartKind {
    pub fn is_binary(self) -> bool {
        matches!(self, PartKind::Binary | PartKind::RepeatedBinary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PartValue {
    Text(String),
    File(Attachment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadPart {
    pub name: String,
    pub value: PartValue,
}

/// Multipart body of one candidate submission, already in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidatePayload {
    parts: Vec<PayloadPart>,
}

impl CandidatePayload {
    /// Snapshot the profile and document rows, walking [`CANDIDATE_SCHEMA`] in order.
    ///
    /// Scalar fields are sent raw, so permanent address lines go out even when
    /// `sameAsResidential` is set. Rows without a stored file contribute no part.
    pub fn from_profile(profile: &CandidateProfile, documents: &[DocumentEntry]) -> Self {
        let mut payload = Self::default();

        for source in CANDIDATE_SCHEMA {
            match source {
                PartSource::Field(field) => {
                    payload.push(source.name(), PartValue::Text(profile.wire_value(field)));
                }
                PartSource::ProfilePhoto => {
                    if let Some(photo) = &profile.profile_photo {
                        payload.push(source.name(), PartValue::File(photo.clone()));
                    }
                }
                PartSource::Documents => {
                    for file in documents.iter().filter_map(|doc| doc.file.as_ref()) {
                        payload.push(source.name(), PartValue::File(file.clone()));
                    }
                }
            }
        }

        payload
    }

    /// Append a part as-is. Whether it fits the schema is checked when the body is encoded.
    pub fn push(&mut self, name: impl Into<String>, value: PartValue) {
        self.parts.push(PayloadPart {
            name: name.into(),
            value,
        });
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(text) if part.name == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn files_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attachment> + 'a {
        self.parts.iter().filter_map(move |part| match &part.value {
            PartValue::File(file) if part.name == name => Some(file),
            _ => None,
        })
    }
}
