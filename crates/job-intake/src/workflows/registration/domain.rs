use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical names of the registration form inputs, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Phone,
    Dob,
    Gender,
    Address,
    City,
    Pincode,
    Position,
    Experience,
    Qualification,
    ExpectedSalary,
    Resume,
    PanCard,
    AadharCard,
    Photo,
    Certificates,
    Terms,
}

impl FieldId {
    pub const ALL: [FieldId; 19] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Dob,
        FieldId::Gender,
        FieldId::Address,
        FieldId::City,
        FieldId::Pincode,
        FieldId::Position,
        FieldId::Experience,
        FieldId::Qualification,
        FieldId::ExpectedSalary,
        FieldId::Resume,
        FieldId::PanCard,
        FieldId::AadharCard,
        FieldId::Photo,
        FieldId::Certificates,
        FieldId::Terms,
    ];

    /// Form-level identifier, as used by the markup and in JSON.
    pub const fn name(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Dob => "dob",
            FieldId::Gender => "gender",
            FieldId::Address => "address",
            FieldId::City => "city",
            FieldId::Pincode => "pincode",
            FieldId::Position => "position",
            FieldId::Experience => "experience",
            FieldId::Qualification => "qualification",
            FieldId::ExpectedSalary => "expectedSalary",
            FieldId::Resume => "resume",
            FieldId::PanCard => "panCard",
            FieldId::AadharCard => "aadharCard",
            FieldId::Photo => "photo",
            FieldId::Certificates => "certificates",
            FieldId::Terms => "terms",
        }
    }

    /// Position in [`FieldId::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        FieldId::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownField(raw.to_string()))
    }
}

/// Input control backing a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Select,
    File,
    Checkbox,
}

/// A file chosen in an upload input. Only the metadata the rules inspect is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Current value of one input.
///
/// Accessors never fail: asking a value for a shape it does not have yields the empty
/// form of that shape, so a mismatched value validates as "missing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Checked(bool),
    Text(String),
    Files(Vec<UploadedFile>),
}

static EMPTY_VALUE: FieldValue = FieldValue::Text(String::new());

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn file(name: impl Into<String>, size: u64) -> Self {
        FieldValue::Files(vec![UploadedFile::new(name, size)])
    }

    pub fn empty() -> &'static FieldValue {
        &EMPTY_VALUE
    }

    /// Trimmed text, or `""` for non-text values.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(value) => value.trim(),
            _ => "",
        }
    }

    pub fn files(&self) -> &[UploadedFile] {
        match self {
            FieldValue::Files(files) => files,
            _ => &[],
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }
}

/// Presentation class toggled on the input element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    #[default]
    Neutral,
    Success,
    Error,
}

impl Presentation {
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Presentation::Neutral => None,
            Presentation::Success => Some("success"),
            Presentation::Error => Some("error"),
        }
    }
}

/// What the page shows for one field: its class and the adjacent message slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAnnotation {
    pub presentation: Presentation,
    pub message: String,
}

static NEUTRAL_ANNOTATION: FieldAnnotation = FieldAnnotation {
    presentation: Presentation::Neutral,
    message: String::new(),
};

/// Verdict for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Field values plus the annotations derived from the last validation of each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    values: BTreeMap<FieldId, FieldValue>,
    annotations: BTreeMap<FieldId, FieldAnnotation>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FieldId, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldId, value: FieldValue) {
        self.values.insert(field, value);
    }

    pub fn clear_value(&mut self, field: FieldId) {
        self.values.remove(&field);
    }

    /// Current value; unset fields read as empty.
    pub fn value(&self, field: FieldId) -> &FieldValue {
        self.values.get(&field).unwrap_or(FieldValue::empty())
    }

    pub fn annotation(&self, field: FieldId) -> &FieldAnnotation {
        self.annotations
            .get(&field)
            .unwrap_or(&NEUTRAL_ANNOTATION)
    }

    pub fn annotate(&mut self, field: FieldId, annotation: FieldAnnotation) {
        if annotation == NEUTRAL_ANNOTATION {
            self.annotations.remove(&field);
        } else {
            self.annotations.insert(field, annotation);
        }
    }

    /// First field, in document order, carrying the given presentation.
    pub fn first_with(&self, presentation: Presentation) -> Option<FieldId> {
        FieldId::ALL
            .into_iter()
            .find(|field| self.annotation(*field).presentation == presentation)
    }

    /// Drop every value and annotation, as a form reset does.
    pub fn reset(&mut self) {
        self.values.clear();
        self.annotations.clear();
    }

    pub fn is_pristine(&self) -> bool {
        self.values.is_empty() && self.annotations.is_empty()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
        }
    }
}

/// Field values handed to a submission gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub values: BTreeMap<FieldId, FieldValue>,
}

impl FormSnapshot {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
