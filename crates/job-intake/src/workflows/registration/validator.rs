use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use super::domain::{FieldAnnotation, FieldId, FieldValue, FormState, Presentation, ValidationResult};
use super::rules::spec_for;

/// Source of "today" for the age rule and of timestamps for references.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> i64;
}

/// Wall clock; the date follows the local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Applies the rule catalog to values and annotates the form with the verdicts.
#[derive(Clone)]
pub struct FieldValidator {
    clock: Arc<dyn Clock>,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl FieldValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Pure verdict for one value.
    pub fn validate(&self, field: FieldId, value: &FieldValue) -> ValidationResult {
        spec_for(field).evaluate(value, self.clock.today())
    }

    /// Validate the field's current value and write the outcome onto the form.
    ///
    /// Fields other than the terms checkbox get `success` or `error`; the checkbox is
    /// left without a class and only its message slot changes.
    pub fn annotate(&self, form: &mut FormState, field: FieldId) -> ValidationResult {
        let result = self.validate(field, form.value(field));
        let presentation = if !spec_for(field).toggles_presentation() {
            Presentation::Neutral
        } else if result.valid {
            Presentation::Success
        } else {
            Presentation::Error
        };

        debug!(field = %field, valid = result.valid, "field validated");
        form.annotate(
            field,
            FieldAnnotation {
                presentation,
                message: result.message.clone(),
            },
        );
        result
    }

    /// Annotate every field in document order.
    pub fn validate_form(&self, form: &mut FormState) -> FormReport {
        let verdicts = FieldId::ALL
            .into_iter()
            .map(|field| (field, self.annotate(form, field)))
            .collect();
        FormReport { verdicts }
    }
}

/// Outcome of a full-form pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub verdicts: Vec<(FieldId, ValidationResult)>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.verdicts.iter().all(|(_, result)| result.valid)
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        self.verdicts
            .iter()
            .filter(|(_, result)| !result.valid)
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn verdict(&self, field: FieldId) -> Option<&ValidationResult> {
        self.verdicts
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, result)| result)
    }
}
