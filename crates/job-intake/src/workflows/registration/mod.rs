//! Job registration form: field rules, validation, and the submission/reset flow.
//!
//! Field values live in an explicit [`FormState`]; the [`FieldValidator`] reads them and
//! writes per-field annotations back, and the [`SubmissionController`] drives the
//! Idle → Validating → Submitting → Success cycle on top of an injectable
//! [`SubmissionGateway`].

pub mod domain;
pub mod rules;
pub mod session;
pub mod submission;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{
    FieldAnnotation, FieldId, FieldKind, FieldValue, FormSnapshot, FormState, Presentation,
    UnknownField, UploadedFile, ValidationResult,
};
pub use rules::{
    catalog, spec_for, FieldRule, FieldSpec, FileRule, TextPattern, INVALID_DATE_MESSAGE, MIB,
};
pub use session::{load_script, parse_script, EventEffect, FormEvent, FormSession, SessionError};
pub use submission::{
    ApplicationReference, DismissTrigger, PendingSubmission, ScrollRequest, SimulatedGateway,
    SubmissionController, SubmissionError, SubmissionGateway, SubmissionPhase, SubmissionReceipt,
    SubmitControl, SubmitOutcome, SuccessOverlay, BUSY_SUBMIT_LABEL, DEFAULT_RESET_DELAY,
    DEFAULT_SUBMIT_LABEL, INVALID_FORM_ALERT,
};
pub use validator::{Clock, FieldValidator, FormReport, SystemClock};
