//! Declarative rule catalog: one [`FieldSpec`] per form input.

mod files;
mod patterns;

pub use files::{FileRule, MIB};
pub use patterns::TextPattern;

use chrono::{Datelike, NaiveDate};

use super::domain::{FieldId, FieldKind, FieldValue, ValidationResult};

pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid date of birth";

const NAME_MESSAGE: &str = "Name should contain only letters and spaces (2-30 characters)";
const DOCUMENT_FORMAT_MESSAGE: &str = "File must be in PDF, JPG, or PNG format";
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Check applied to a field once it is known to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-empty is enough.
    Presence,
    Pattern {
        pattern: TextPattern,
        message: &'static str,
    },
    MinLength {
        min: usize,
        message: &'static str,
    },
    /// Calendar-year difference against today; not birthday-aware.
    AgeRange {
        min: i32,
        max: i32,
        message: &'static str,
    },
    /// Pattern match plus a strictly positive numeric value.
    PositiveAmount {
        pattern: TextPattern,
        message: &'static str,
    },
    Upload(FileRule),
    /// Checkbox that must be ticked. Carries no success/error class.
    Consent,
}

/// Static description of one form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown when a required value is missing (or the checkbox is unticked).
    pub required_message: &'static str,
    pub rule: FieldRule,
}

impl FieldSpec {
    /// Whether the page toggles the `error`/`success` classes for this field.
    pub fn toggles_presentation(&self) -> bool {
        !matches!(self.rule, FieldRule::Consent)
    }

    pub fn file_rule(&self) -> Option<&FileRule> {
        match &self.rule {
            FieldRule::Upload(rule) => Some(rule),
            _ => None,
        }
    }

    /// Evaluate `value` for this field. `today` anchors the age rule.
    pub fn evaluate(&self, value: &FieldValue, today: NaiveDate) -> ValidationResult {
        match &self.rule {
            FieldRule::Upload(rule) => {
                files::check_uploads(rule, value.files(), self.required, self.required_message)
            }
            FieldRule::Consent => {
                if value.is_checked() {
                    ValidationResult::valid()
                } else {
                    ValidationResult::invalid(self.required_message)
                }
            }
            rule => {
                let text = value.as_text();
                if text.is_empty() {
                    return if self.required {
                        ValidationResult::invalid(self.required_message)
                    } else {
                        ValidationResult::valid()
                    };
                }
                evaluate_text(rule, text, today)
            }
        }
    }
}

fn evaluate_text(rule: &FieldRule, text: &str, today: NaiveDate) -> ValidationResult {
    match *rule {
        FieldRule::Pattern { pattern, message } => {
            if pattern.is_match(text) {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid(message)
            }
        }
        FieldRule::MinLength { min, message } => {
            // Browser input length: UTF-16 code units.
            if text.encode_utf16().count() < min {
                ValidationResult::invalid(message)
            } else {
                ValidationResult::valid()
            }
        }
        FieldRule::AgeRange { min, max, message } => {
            let Ok(birth) = NaiveDate::parse_from_str(text, "%Y-%m-%d") else {
                return ValidationResult::invalid(INVALID_DATE_MESSAGE);
            };
            let age = today.year() - birth.year();
            if age < min || age > max {
                ValidationResult::invalid(message)
            } else {
                ValidationResult::valid()
            }
        }
        FieldRule::PositiveAmount { pattern, message } => {
            let positive = text
                .parse::<f64>()
                .map(|amount| amount > 0.0)
                .unwrap_or(false);
            if pattern.is_match(text) && positive {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid(message)
            }
        }
        FieldRule::Presence | FieldRule::Upload(_) | FieldRule::Consent => {
            ValidationResult::valid()
        }
    }
}

static CATALOG: [FieldSpec; 19] = [
    FieldSpec {
        id: FieldId::FirstName,
        kind: FieldKind::Text,
        required: true,
        required_message: "First name is required",
        rule: FieldRule::Pattern {
            pattern: TextPattern::PersonName,
            message: NAME_MESSAGE,
        },
    },
    FieldSpec {
        id: FieldId::LastName,
        kind: FieldKind::Text,
        required: true,
        required_message: "Last name is required",
        rule: FieldRule::Pattern {
            pattern: TextPattern::PersonName,
            message: NAME_MESSAGE,
        },
    },
    FieldSpec {
        id: FieldId::Email,
        kind: FieldKind::Text,
        required: true,
        required_message: "Email is required",
        rule: FieldRule::Pattern {
            pattern: TextPattern::Email,
            message: "Please enter a valid email address",
        },
    },
    FieldSpec {
        id: FieldId::Phone,
        kind: FieldKind::Text,
        required: true,
        required_message: "Phone number is required",
        rule: FieldRule::Pattern {
            pattern: TextPattern::IndianMobile,
            message: "Please enter a valid 10-digit Indian phone number",
        },
    },
    FieldSpec {
        id: FieldId::Dob,
        kind: FieldKind::Date,
        required: true,
        required_message: "Date of birth is required",
        rule: FieldRule::AgeRange {
            min: 18,
            max: 65,
            message: "Age must be between 18 and 65 years",
        },
    },
    FieldSpec {
        id: FieldId::Gender,
        kind: FieldKind::Select,
        required: true,
        required_message: "Gender is required",
        rule: FieldRule::Presence,
    },
    FieldSpec {
        id: FieldId::Address,
        kind: FieldKind::Text,
        required: true,
        required_message: "Address is required",
        rule: FieldRule::MinLength {
            min: 10,
            message: "Please enter a complete address (minimum 10 characters)",
        },
    },
    FieldSpec {
        id: FieldId::City,
        kind: FieldKind::Text,
        required: true,
        required_message: "City is required",
        rule: FieldRule::Pattern {
            pattern: TextPattern::PersonName,
            message: "Please enter a valid city name",
        },
    },
    FieldSpec {
        id: FieldId::Pincode,
        kind: FieldKind::Text,
        required: true,
        required_message: "Pincode is required",
        rule: FieldRule::Pattern {
            pattern: TextPattern::Pincode,
            message: "Please enter a valid 6-digit pincode",
        },
    },
    FieldSpec {
        id: FieldId::Position,
        kind: FieldKind::Text,
        required: true,
        required_message: "Position is required",
        rule: FieldRule::MinLength {
            min: 2,
            message: "Position must be at least 2 characters long",
        },
    },
    FieldSpec {
        id: FieldId::Experience,
        kind: FieldKind::Select,
        required: true,
        required_message: "Experience is required",
        rule: FieldRule::Presence,
    },
    FieldSpec {
        id: FieldId::Qualification,
        kind: FieldKind::Select,
        required: true,
        required_message: "Qualification is required",
        rule: FieldRule::Presence,
    },
    FieldSpec {
        id: FieldId::ExpectedSalary,
        kind: FieldKind::Text,
        required: true,
        required_message: "Expected salary is required",
        rule: FieldRule::PositiveAmount {
            pattern: TextPattern::Amount,
            message: "Please enter a valid salary amount",
        },
    },
    FieldSpec {
        id: FieldId::Resume,
        kind: FieldKind::File,
        required: true,
        required_message: "Resume is required",
        rule: FieldRule::Upload(FileRule {
            max_bytes: 5 * MIB,
            extensions: &["pdf", "doc", "docx"],
            format_message: "Resume must be in PDF, DOC, or DOCX format",
            inspect_each: false,
        }),
    },
    FieldSpec {
        id: FieldId::PanCard,
        kind: FieldKind::File,
        required: true,
        required_message: "PanCard is required",
        rule: FieldRule::Upload(FileRule {
            max_bytes: 2 * MIB,
            extensions: DOCUMENT_EXTENSIONS,
            format_message: DOCUMENT_FORMAT_MESSAGE,
            inspect_each: false,
        }),
    },
    FieldSpec {
        id: FieldId::AadharCard,
        kind: FieldKind::File,
        required: true,
        required_message: "AadharCard is required",
        rule: FieldRule::Upload(FileRule {
            max_bytes: 2 * MIB,
            extensions: DOCUMENT_EXTENSIONS,
            format_message: DOCUMENT_FORMAT_MESSAGE,
            inspect_each: false,
        }),
    },
    FieldSpec {
        id: FieldId::Photo,
        kind: FieldKind::File,
        required: true,
        required_message: "Photo is required",
        rule: FieldRule::Upload(FileRule {
            max_bytes: MIB,
            extensions: &["jpg", "jpeg", "png"],
            format_message: "Photo must be in JPG or PNG format",
            inspect_each: false,
        }),
    },
    FieldSpec {
        id: FieldId::Certificates,
        kind: FieldKind::File,
        required: false,
        required_message: "Certificates is required",
        rule: FieldRule::Upload(FileRule {
            max_bytes: 5 * MIB,
            extensions: DOCUMENT_EXTENSIONS,
            format_message: DOCUMENT_FORMAT_MESSAGE,
            inspect_each: true,
        }),
    },
    FieldSpec {
        id: FieldId::Terms,
        kind: FieldKind::Checkbox,
        required: true,
        required_message: "You must agree to the terms and conditions",
        rule: FieldRule::Consent,
    },
];

/// Every field spec, in document order.
pub fn catalog() -> &'static [FieldSpec] {
    &CATALOG
}

pub fn spec_for(field: FieldId) -> &'static FieldSpec {
    &CATALOG[field.index()]
}
