//! End-to-end scenarios for the registration form driven through the public session API.

mod common {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use job_intake::workflows::registration::{
        Clock, FieldId, FieldValidator, FieldValue, FormSession, SimulatedGateway,
        SubmissionController, MIB,
    };

    pub(super) struct FixedClock;

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
        }

        fn now_millis(&self) -> i64 {
            1_792_300_000_987
        }
    }

    pub(super) fn session() -> FormSession<SimulatedGateway> {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock);
        let gateway = Arc::new(SimulatedGateway::new(
            SimulatedGateway::DEFAULT_LATENCY,
            clock.clone(),
        ));
        FormSession::new(SubmissionController::new(FieldValidator::new(clock), gateway))
    }

    pub(super) fn applicant() -> Vec<(FieldId, FieldValue)> {
        vec![
            (FieldId::FirstName, FieldValue::text("Ravi")),
            (FieldId::LastName, FieldValue::text("Kumar")),
            (FieldId::Email, FieldValue::text("ravi.kumar@example.com")),
            (FieldId::Phone, FieldValue::text("8123456789")),
            (FieldId::Dob, FieldValue::text("1990-02-14")),
            (FieldId::Gender, FieldValue::text("male")),
            (FieldId::Address, FieldValue::text("22 Park Street, Kolkata")),
            (FieldId::City, FieldValue::text("Kolkata")),
            (FieldId::Pincode, FieldValue::text("700016")),
            (FieldId::Position, FieldValue::text("Data Analyst")),
            (FieldId::Experience, FieldValue::text("1-3")),
            (FieldId::Qualification, FieldValue::text("mba")),
            (FieldId::ExpectedSalary, FieldValue::text("850000")),
            (FieldId::Resume, FieldValue::file("ravi_kumar.docx", 2 * MIB)),
            (FieldId::PanCard, FieldValue::file("PAN.PDF", 512 * 1024)),
            (FieldId::AadharCard, FieldValue::file("aadhar.jpeg", MIB)),
            (FieldId::Photo, FieldValue::file("ravi.png", 200 * 1024)),
            (FieldId::Terms, FieldValue::Checked(true)),
        ]
    }
}

use std::time::Duration;

use common::*;
use job_intake::workflows::registration::{
    parse_script, DismissTrigger, EventEffect, FieldId, FieldValue, FormEvent, Presentation,
    SubmissionPhase, SubmitOutcome, UploadedFile, INVALID_FORM_ALERT,
};

#[tokio::test(start_paused = true)]
async fn corrected_application_is_accepted_after_simulated_latency() {
    let mut session = session();
    for (field, value) in applicant() {
        session.dispatch(FormEvent::Change { field, value }).await;
    }
    session
        .dispatch(FormEvent::Change {
            field: FieldId::Phone,
            value: FieldValue::text("5123456789"),
        })
        .await;

    let rejected = session.dispatch(FormEvent::Submit).await;
    assert_eq!(
        rejected,
        EventEffect::Submitted {
            outcome: SubmitOutcome::Invalid {
                invalid_fields: vec![FieldId::Phone],
                scroll_target: Some(FieldId::Phone),
            }
        }
    );
    assert_eq!(
        session.controller_mut().take_alert().as_deref(),
        Some(INVALID_FORM_ALERT)
    );

    session
        .dispatch(FormEvent::Change {
            field: FieldId::Phone,
            value: FieldValue::text("9123456789"),
        })
        .await;

    let started = tokio::time::Instant::now();
    let accepted = session.dispatch(FormEvent::Submit).await;
    assert!(started.elapsed() >= Duration::from_millis(1500));

    match accepted {
        EventEffect::Submitted {
            outcome: SubmitOutcome::Accepted { reference },
        } => assert_eq!(reference.as_str(), "JOB000987"),
        other => panic!("expected acceptance, got {other:?}"),
    }
    assert!(session.controller().overlay().visible);
    assert!(session.controller().overlay().scroll_locked);
}

#[tokio::test(start_paused = true)]
async fn dismissing_success_overlay_resets_the_form() {
    let mut session = session();
    for (field, value) in applicant() {
        session.dispatch(FormEvent::Change { field, value }).await;
    }
    session.dispatch(FormEvent::Submit).await;
    assert!(matches!(
        session.controller().phase(),
        SubmissionPhase::Success { .. }
    ));

    let effect = session
        .dispatch(FormEvent::Dismiss {
            trigger: DismissTrigger::BackdropClick,
        })
        .await;

    assert_eq!(effect, EventEffect::Dismissed { reset: true });
    let form = session.controller().form();
    assert!(form.is_pristine());
    assert_eq!(form.first_with(Presentation::Success), None);
    assert_eq!(form.first_with(Presentation::Error), None);
    assert_eq!(session.controller().phase(), &SubmissionPhase::Idle);
}

#[tokio::test]
async fn certificate_batch_with_one_bad_file_is_rejected() {
    let mut session = session();

    let effect = session
        .dispatch(FormEvent::Change {
            field: FieldId::Certificates,
            value: FieldValue::Files(vec![
                UploadedFile::new("btech.pdf", 1024),
                UploadedFile::new("award.gif", 1024),
            ]),
        })
        .await;

    match effect {
        EventEffect::Validated { result, .. } => {
            assert!(!result.valid);
            assert_eq!(result.message, "File must be in PDF, JPG, or PNG format");
        }
        other => panic!("expected validation, got {other:?}"),
    }
}

#[tokio::test]
async fn scripted_session_replays_events_in_order() {
    let script = parse_script(
        r#"[
            {"event": "change", "field": "pincode", "value": "012345"},
            {"event": "change", "field": "pincode", "value": "123456"},
            {"event": "change", "field": "expectedSalary", "value": "1000.555"}
        ]"#,
    )
    .expect("script parses");

    let effects = session().replay(script).await;

    let verdicts: Vec<bool> = effects
        .iter()
        .map(|effect| match effect {
            EventEffect::Validated { result, .. } => result.valid,
            other => panic!("unexpected effect {other:?}"),
        })
        .collect();
    assert_eq!(verdicts, vec![false, true, false]);
}
