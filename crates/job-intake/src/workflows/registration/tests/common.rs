use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::registration::domain::{FieldId, FieldValue, FormSnapshot, FormState};
use crate::workflows::registration::rules::MIB;
use crate::workflows::registration::submission::{
    ApplicationReference, SubmissionController, SubmissionError, SubmissionGateway,
    SubmissionReceipt,
};
use crate::workflows::registration::validator::{Clock, FieldValidator};

pub(super) const NOW_MILLIS: i64 = 1_772_323_200_654;

pub(super) struct FixedClock {
    pub(super) today: NaiveDate,
    pub(super) millis: i64,
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}

pub(super) fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock {
        today: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
        millis: NOW_MILLIS,
    })
}

pub(super) fn validator() -> FieldValidator {
    FieldValidator::new(clock())
}

pub(super) fn valid_values() -> Vec<(FieldId, FieldValue)> {
    vec![
        (FieldId::FirstName, FieldValue::text("Asha")),
        (FieldId::LastName, FieldValue::text("Rao")),
        (FieldId::Email, FieldValue::text("asha.rao@example.in")),
        (FieldId::Phone, FieldValue::text("9123456789")),
        (FieldId::Dob, FieldValue::text("1994-07-21")),
        (FieldId::Gender, FieldValue::text("female")),
        (
            FieldId::Address,
            FieldValue::text("14 MG Road, Indiranagar"),
        ),
        (FieldId::City, FieldValue::text("Bengaluru")),
        (FieldId::Pincode, FieldValue::text("560038")),
        (FieldId::Position, FieldValue::text("Backend Engineer")),
        (FieldId::Experience, FieldValue::text("3-5")),
        (FieldId::Qualification, FieldValue::text("btech")),
        (FieldId::ExpectedSalary, FieldValue::text("1200000.00")),
        (FieldId::Resume, FieldValue::file("asha-rao.pdf", 420 * 1024)),
        (FieldId::PanCard, FieldValue::file("pan.jpg", MIB)),
        (FieldId::AadharCard, FieldValue::file("aadhar.png", 900 * 1024)),
        (FieldId::Photo, FieldValue::file("photo.jpeg", 300 * 1024)),
        (FieldId::Terms, FieldValue::Checked(true)),
    ]
}

pub(super) fn valid_form() -> FormState {
    valid_values()
        .into_iter()
        .fold(FormState::new(), |form, (field, value)| form.with(field, value))
}

/// Gateway that answers immediately and records what it was sent.
#[derive(Default)]
pub(super) struct RecordingGateway {
    received: Mutex<Vec<FormSnapshot>>,
}

impl RecordingGateway {
    pub(super) fn received(&self) -> Vec<FormSnapshot> {
        self.received.lock().expect("gateway mutex poisoned").clone()
    }
}

impl SubmissionGateway for RecordingGateway {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<SubmissionReceipt, SubmissionError> {
        self.received
            .lock()
            .expect("gateway mutex poisoned")
            .push(snapshot);
        Ok(SubmissionReceipt {
            reference: ApplicationReference::from_timestamp_millis(NOW_MILLIS),
            submitted_at_millis: NOW_MILLIS,
        })
    }
}

pub(super) struct UnavailableGateway;

impl SubmissionGateway for UnavailableGateway {
    async fn submit(&self, _snapshot: FormSnapshot) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Unavailable("gateway offline".to_string()))
    }
}

pub(super) fn controller_with<G>(gateway: Arc<G>) -> SubmissionController<G>
where
    G: SubmissionGateway + 'static,
{
    let mut controller = SubmissionController::new(validator(), gateway);
    for (field, value) in valid_values() {
        controller.change(field, value);
    }
    controller
}

pub(super) fn is_reference(value: &str) -> bool {
    regex::Regex::new(r"^JOB\d{6}$")
        .expect("reference pattern compiles")
        .is_match(value)
}
