use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Render key for a document row. Never used for business logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    #[default]
    Unset,
    Image,
    Pdf,
}

impl FileType {
    pub fn label(self) -> &'static str {
        match self {
            FileType::Unset => "Select type",
            FileType::Image => "Image",
            FileType::Pdf => "PDF",
        }
    }

    /// Whether a file with this name may be attached to a row of this type.
    ///
    /// The extension is the text after the last `.`, lowercased; a name without a dot is
    /// treated as all extension. `Unset` accepts nothing.
    pub fn accepts(self, file_name: &str) -> bool {
        let extension = file_name
            .rsplit_once('.')
            .map_or(file_name, |(_, ext)| ext)
            .to_ascii_lowercase();
        match self {
            FileType::Unset => false,
            FileType::Image => matches!(extension.as_str(), "jpg" | "jpeg" | "png"),
            FileType::Pdf => extension == "pdf",
        }
    }
}

/// A picked file: its name as shown by the picker plus its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Scalar fields of [`CandidateProfile`], keyed the way the wire and the error map name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Dob,
    ResidentialStreet1,
    ResidentialStreet2,
    SameAsResidential,
    PermanentStreet1,
    PermanentStreet2,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Email,
        ProfileField::Dob,
        ProfileField::ResidentialStreet1,
        ProfileField::ResidentialStreet2,
        ProfileField::SameAsResidential,
        ProfileField::PermanentStreet1,
        ProfileField::PermanentStreet2,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Email => "email",
            ProfileField::Dob => "dob",
            ProfileField::ResidentialStreet1 => "residentialStreet1",
            ProfileField::ResidentialStreet2 => "residentialStreet2",
            ProfileField::SameAsResidential => "sameAsResidential",
            ProfileField::PermanentStreet1 => "permanentStreet1",
            ProfileField::PermanentStreet2 => "permanentStreet2",
        }
    }

    pub fn is_flag(self) -> bool {
        self == ProfileField::SameAsResidential
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub dob: String,
    pub residential_street1: String,
    pub residential_street2: String,
    pub same_as_residential: bool,
    pub permanent_street1: String,
    pub permanent_street2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<Attachment>,
}

impl CandidateProfile {
    /// Text value of a scalar field; `None` for the flag.
    pub fn text(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Email => &self.email,
            ProfileField::Dob => &self.dob,
            ProfileField::ResidentialStreet1 => &self.residential_street1,
            ProfileField::ResidentialStreet2 => &self.residential_street2,
            ProfileField::PermanentStreet1 => &self.permanent_street1,
            ProfileField::PermanentStreet2 => &self.permanent_street2,
            ProfileField::SameAsResidential => return None,
        };
        Some(value.as_str())
    }

    pub fn text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        let value = match field {
            ProfileField::FirstName => &mut self.first_name,
            ProfileField::LastName => &mut self.last_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Dob => &mut self.dob,
            ProfileField::ResidentialStreet1 => &mut self.residential_street1,
            ProfileField::ResidentialStreet2 => &mut self.residential_street2,
            ProfileField::PermanentStreet1 => &mut self.permanent_street1,
            ProfileField::PermanentStreet2 => &mut self.permanent_street2,
            ProfileField::SameAsResidential => return None,
        };
        Some(value)
    }

    /// Wire representation of a scalar field.
    pub fn wire_value(&self, field: ProfileField) -> String {
        match self.text(field) {
            Some(text) => text.to_string(),
            None => self.same_as_residential.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: DocumentId,
    /// Free-text label; not checked against the attached file's name.
    pub file_name: String,
    pub file_type: FileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Attachment>,
}

impl DocumentEntry {
    pub fn empty() -> Self {
        Self {
            id: DocumentId::fresh(),
            file_name: String::new(),
            file_type: FileType::Unset,
            file: None,
        }
    }
}
