use std::sync::Arc;

use super::common::*;
use crate::workflows::registration::domain::{FieldId, FieldValue, Presentation};
use crate::workflows::registration::session::{
    parse_script, EventEffect, FormEvent, FormSession, SessionError,
};
use crate::workflows::registration::submission::{
    DismissTrigger, SubmissionController, SubmissionPhase, SubmitOutcome, INVALID_FORM_ALERT,
};

fn session() -> FormSession<RecordingGateway> {
    FormSession::new(SubmissionController::new(
        validator(),
        Arc::new(RecordingGateway::default()),
    ))
}

#[test]
fn scripts_parse_from_json() {
    let events = parse_script(
        r#"[
            {"event": "change", "field": "firstName", "value": "Asha"},
            {"event": "change", "field": "resume", "value": [{"name": "cv.pdf", "size": 2048}]},
            {"event": "change", "field": "terms", "value": true},
            {"event": "blur", "field": "email"},
            {"event": "submit"},
            {"event": "dismiss", "trigger": "escape_key"},
            {"event": "submit_another"}
        ]"#,
    )
    .expect("script parses");

    assert_eq!(events.len(), 7);
    assert_eq!(
        events[1],
        FormEvent::Change {
            field: FieldId::Resume,
            value: FieldValue::file("cv.pdf", 2048),
        }
    );
    assert_eq!(
        events[5],
        FormEvent::Dismiss {
            trigger: DismissTrigger::EscapeKey
        }
    );
}

#[test]
fn unknown_fields_fail_to_parse() {
    let err = parse_script(r#"[{"event": "blur", "field": "salary"}]"#)
        .expect_err("unknown field rejected");
    assert!(matches!(err, SessionError::Parse(_)));
}

#[tokio::test]
async fn blur_on_untouched_field_reports_required() {
    let mut session = session();

    let effect = session
        .dispatch(FormEvent::Blur {
            field: FieldId::Email,
        })
        .await;

    match effect {
        EventEffect::Validated { field, result } => {
            assert_eq!(field, FieldId::Email);
            assert_eq!(result.message, "Email is required");
        }
        other => panic!("expected validation effect, got {other:?}"),
    }
    assert_eq!(
        session.controller().form().annotation(FieldId::Email).presentation,
        Presentation::Error
    );
}

#[tokio::test(start_paused = true)]
async fn replay_runs_a_full_application_cycle() {
    let mut session = session();
    let mut events: Vec<FormEvent> = vec![FormEvent::Submit];
    events.extend(
        valid_values()
            .into_iter()
            .map(|(field, value)| FormEvent::Change { field, value }),
    );
    events.push(FormEvent::Submit);
    events.push(FormEvent::Dismiss {
        trigger: DismissTrigger::CloseButton,
    });

    let effects = session.replay(events).await;

    assert!(matches!(
        effects.first(),
        Some(EventEffect::Submitted {
            outcome: SubmitOutcome::Invalid { .. }
        })
    ));
    let accepted = effects.iter().any(|effect| {
        matches!(
            effect,
            EventEffect::Submitted {
                outcome: SubmitOutcome::Accepted { reference }
            } if is_reference(reference.as_str())
        )
    });
    assert!(accepted, "valid submission accepted: {effects:?}");
    assert_eq!(
        effects.last(),
        Some(&EventEffect::Dismissed { reset: true })
    );

    let controller = session.into_controller();
    assert_eq!(controller.phase(), &SubmissionPhase::Idle);
    assert!(controller.form().is_pristine());
}

#[tokio::test]
async fn submit_another_without_overlay_does_nothing() {
    let mut session = session();
    session
        .dispatch(FormEvent::Change {
            field: FieldId::City,
            value: FieldValue::text("Pune"),
        })
        .await;

    let effect = session.dispatch(FormEvent::SubmitAnother).await;

    assert_eq!(effect, EventEffect::Dismissed { reset: false });
    assert_eq!(
        session.controller().form().value(FieldId::City),
        &FieldValue::text("Pune")
    );
}

#[tokio::test]
async fn repeated_invalid_submits_leave_one_pending_alert() {
    let mut session = session();

    let effects = session.replay(vec![FormEvent::Submit; 1000]).await;

    assert!(effects.iter().all(|effect| matches!(
        effect,
        EventEffect::Submitted {
            outcome: SubmitOutcome::Invalid { .. }
        }
    )));
    assert_eq!(session.controller().alert(), Some(INVALID_FORM_ALERT));
}
