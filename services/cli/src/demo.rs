use crate::infra::{build_session, clock_for, parse_date, parse_upload, render_effect, render_form};
use chrono::NaiveDate;
use clap::Args;
use job_intake::config::AppConfig;
use job_intake::error::AppError;
use job_intake::workflows::registration::{
    load_script, spec_for, DismissTrigger, EventEffect, FieldId, FieldKind, FieldValidator,
    FieldValue, FormEvent, FormSession, SimulatedGateway, UploadedFile, ValidationResult, MIB,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the simulated submission latency in milliseconds.
    #[arg(long)]
    pub(crate) latency_ms: Option<u64>,
    /// Pin the date used for the age rule (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print each step's effect as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// JSON file containing an array of form events
    #[arg(long)]
    pub(crate) script: PathBuf,
    /// Override the simulated submission latency in milliseconds.
    #[arg(long)]
    pub(crate) latency_ms: Option<u64>,
    /// Pin the date used for the age rule (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print effects as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Field identifier, e.g. `phone` or `expectedSalary`
    #[arg(long)]
    pub(crate) field: FieldId,
    /// Text value for text, date, and select fields
    #[arg(long)]
    pub(crate) value: Option<String>,
    /// Uploaded file as NAME:BYTES; repeat for multiple files
    #[arg(long = "file", value_parser = parse_upload)]
    pub(crate) files: Vec<UploadedFile>,
    /// Mark the checkbox as ticked
    #[arg(long)]
    pub(crate) checked: bool,
    /// Pin the date used for the age rule (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        latency_ms,
        today,
        json,
    } = args;

    let mut session = build_session(&config.submission, latency_ms, today);
    println!("Job registration demo");

    println!("\n1. Submitting an untouched form");
    step(&mut session, FormEvent::Submit, json).await?;
    drain_alerts(&mut session);

    println!("\n2. Filling in the application with a landline number");
    for (field, value) in sample_applicant() {
        step(&mut session, FormEvent::Change { field, value }, json).await?;
    }
    step(
        &mut session,
        FormEvent::Change {
            field: FieldId::Phone,
            value: FieldValue::text("4023456789"),
        },
        json,
    )
    .await?;

    println!("\n3. Submitting with one invalid field");
    step(&mut session, FormEvent::Submit, json).await?;
    drain_alerts(&mut session);
    render_form(session.controller().form());

    println!("\n4. Correcting the phone number and resubmitting");
    step(
        &mut session,
        FormEvent::Change {
            field: FieldId::Phone,
            value: FieldValue::text("9876543210"),
        },
        json,
    )
    .await?;
    step(&mut session, FormEvent::Submit, json).await?;
    let overlay = session.controller().overlay();
    println!(
        "  success card visible: {} | form dimmed: {} | page scroll locked: {}",
        overlay.visible, overlay.form_dimmed, overlay.scroll_locked
    );

    println!("\n5. Closing the success card with Escape");
    step(
        &mut session,
        FormEvent::Dismiss {
            trigger: DismissTrigger::EscapeKey,
        },
        json,
    )
    .await?;
    println!(
        "  phase: {} | form empty: {}",
        session.controller().phase().label(),
        session.controller().form().is_pristine()
    );

    Ok(())
}

pub(crate) async fn run_replay(args: ReplayArgs, config: &AppConfig) -> Result<(), AppError> {
    let ReplayArgs {
        script,
        latency_ms,
        today,
        json,
    } = args;

    let events = load_script(&script)?;
    let mut session = build_session(&config.submission, latency_ms, today);
    println!("Replaying {} event(s) from {}", events.len(), script.display());

    for event in events {
        step(&mut session, event, json).await?;
        drain_alerts(&mut session);
    }

    println!("\nFinal state: {}", session.controller().phase().label());
    render_form(session.controller().form());
    Ok(())
}

/// Print the verdict; an invalid value exits non-zero.
pub(crate) fn run_validate(args: ValidateArgs) -> ExitCode {
    let field = args.field;
    let result = check_field(args);
    if result.valid {
        println!("{field}: valid");
        ExitCode::SUCCESS
    } else {
        println!("{field}: invalid - {}", result.message);
        ExitCode::FAILURE
    }
}

fn check_field(args: ValidateArgs) -> ValidationResult {
    let ValidateArgs {
        field,
        value,
        files,
        checked,
        today,
    } = args;

    let value = match spec_for(field).kind {
        FieldKind::File => FieldValue::Files(files),
        FieldKind::Checkbox => FieldValue::Checked(checked),
        FieldKind::Text | FieldKind::Date | FieldKind::Select => {
            FieldValue::Text(value.unwrap_or_default())
        }
    };

    FieldValidator::new(clock_for(today)).validate(field, &value)
}

async fn step(
    session: &mut FormSession<SimulatedGateway>,
    event: FormEvent,
    json: bool,
) -> Result<(), AppError> {
    let effect = session.dispatch(event).await;
    if json {
        let line = serde_json::to_string(&effect)
            .map_err(|err| AppError::Usage(format!("failed to encode effect: {err}")))?;
        println!("{line}");
    } else if !matches!(effect, EventEffect::Validated { ref result, .. } if result.valid) {
        render_effect(&effect);
    }
    Ok(())
}

fn drain_alerts(session: &mut FormSession<SimulatedGateway>) {
    if let Some(alert) = session.controller_mut().take_alert() {
        println!("  alert: {alert}");
    }
}

fn sample_applicant() -> Vec<(FieldId, FieldValue)> {
    vec![
        (FieldId::FirstName, FieldValue::text("Meera")),
        (FieldId::LastName, FieldValue::text("Iyer")),
        (FieldId::Email, FieldValue::text("meera.iyer@example.in")),
        (FieldId::Dob, FieldValue::text("1996-04-09")),
        (FieldId::Gender, FieldValue::text("female")),
        (
            FieldId::Address,
            FieldValue::text("7 Besant Nagar 2nd Avenue"),
        ),
        (FieldId::City, FieldValue::text("Chennai")),
        (FieldId::Pincode, FieldValue::text("600090")),
        (FieldId::Position, FieldValue::text("Product Designer")),
        (FieldId::Experience, FieldValue::text("3-5")),
        (FieldId::Qualification, FieldValue::text("bdes")),
        (FieldId::ExpectedSalary, FieldValue::text("1450000")),
        (FieldId::Resume, FieldValue::file("meera-iyer-cv.pdf", 780 * 1024)),
        (FieldId::PanCard, FieldValue::file("pan-card.png", 640 * 1024)),
        (FieldId::AadharCard, FieldValue::file("aadhar.pdf", MIB)),
        (FieldId::Photo, FieldValue::file("portrait.jpg", 350 * 1024)),
        (
            FieldId::Certificates,
            FieldValue::Files(vec![
                UploadedFile::new("bdes-degree.pdf", 2 * MIB),
                UploadedFile::new("ux-course.png", 900 * 1024),
            ]),
        ),
        (FieldId::Terms, FieldValue::Checked(true)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(field: FieldId) -> ValidateArgs {
        ValidateArgs {
            field,
            value: None,
            files: Vec::new(),
            checked: false,
            today: NaiveDate::from_ymd_opt(2026, 10, 18),
        }
    }

    #[test]
    fn invalid_text_value_is_a_verdict_not_an_error() {
        let result = check_field(ValidateArgs {
            value: Some("5123456789".to_string()),
            ..args(FieldId::Phone)
        });
        assert!(!result.valid);
        assert_eq!(
            result.message,
            "Please enter a valid 10-digit Indian phone number"
        );
    }

    #[test]
    fn value_shape_follows_the_field_kind() {
        let upload = check_field(ValidateArgs {
            files: vec![UploadedFile::new("cv.docx", MIB)],
            ..args(FieldId::Resume)
        });
        assert!(upload.valid);

        let consent = check_field(ValidateArgs {
            checked: true,
            ..args(FieldId::Terms)
        });
        assert!(consent.valid);

        let dob = check_field(ValidateArgs {
            value: Some("2009-01-01".to_string()),
            ..args(FieldId::Dob)
        });
        assert_eq!(dob.message, "Age must be between 18 and 65 years");
    }
}
