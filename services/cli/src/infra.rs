use chrono::{NaiveDate, Utc};
use job_intake::config::SubmissionConfig;
use job_intake::workflows::registration::{
    Clock, EventEffect, FieldId, FieldValidator, FormSession, FormState, Presentation,
    SimulatedGateway, SubmissionController, SubmitOutcome, SystemClock, UploadedFile,
};
use std::sync::Arc;
use std::time::Duration;

/// Wall clock with the calendar date pinned, for reproducible age checks.
pub(crate) struct PinnedClock {
    pub(crate) today: NaiveDate,
}

impl Clock for PinnedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

pub(crate) fn clock_for(today: Option<NaiveDate>) -> Arc<dyn Clock> {
    match today {
        Some(today) => Arc::new(PinnedClock { today }),
        None => Arc::new(SystemClock),
    }
}

pub(crate) fn build_session(
    config: &SubmissionConfig,
    latency_ms: Option<u64>,
    today: Option<NaiveDate>,
) -> FormSession<SimulatedGateway> {
    let clock = clock_for(today);
    let latency = latency_ms
        .map(Duration::from_millis)
        .unwrap_or(config.latency);
    let gateway = Arc::new(SimulatedGateway::new(latency, clock.clone()));
    let controller = SubmissionController::new(FieldValidator::new(clock), gateway)
        .with_reset_delay(config.reset_delay);
    FormSession::new(controller)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// `name:size` where size is in bytes, e.g. `resume.pdf:204800`.
pub(crate) fn parse_upload(raw: &str) -> Result<UploadedFile, String> {
    let (name, size) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:BYTES, got '{raw}'"))?;
    let size = size
        .trim()
        .parse::<u64>()
        .map_err(|err| format!("invalid byte size in '{raw}' ({err})"))?;
    Ok(UploadedFile::new(name.trim(), size))
}

pub(crate) fn render_effect(effect: &EventEffect) {
    match effect {
        EventEffect::Validated { field, result } => {
            if result.valid {
                println!("  - {field}: ok");
            } else {
                println!("  - {field}: {}", result.message);
            }
        }
        EventEffect::Submitted { outcome } => match outcome {
            SubmitOutcome::Accepted { reference } => {
                println!("  submitted; application reference {reference}");
            }
            SubmitOutcome::Invalid {
                invalid_fields,
                scroll_target,
            } => {
                let names: Vec<&str> = invalid_fields.iter().map(|field| field.name()).collect();
                println!(
                    "  blocked: {} invalid field(s) [{}]",
                    invalid_fields.len(),
                    names.join(", ")
                );
                if let Some(field) = scroll_target {
                    println!("  scrolling to {field}");
                }
            }
            SubmitOutcome::Failed { reason } => println!("  submission failed: {reason}"),
            SubmitOutcome::Ignored => println!("  submit ignored"),
        },
        EventEffect::Dismissed { reset } => {
            if *reset {
                println!("  success card closed; form reset");
            } else {
                println!("  nothing to dismiss");
            }
        }
    }
}

pub(crate) fn render_form(form: &FormState) {
    for field in FieldId::ALL {
        let annotation = form.annotation(field);
        let class = annotation.presentation.class_name().unwrap_or("-");
        if annotation.presentation == Presentation::Neutral && annotation.message.is_empty() {
            continue;
        }
        if annotation.message.is_empty() {
            println!("  {field:<15} [{class}]");
        } else {
            println!("  {field:<15} [{class}] {}", annotation.message);
        }
    }
}
