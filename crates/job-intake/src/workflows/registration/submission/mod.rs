mod gateway;

pub use gateway::{
    ApplicationReference, SimulatedGateway, SubmissionError, SubmissionGateway, SubmissionReceipt,
};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{FieldId, FieldValue, FormSnapshot, FormState, Presentation, ValidationResult};
use super::validator::{FieldValidator, FormReport};

pub const DEFAULT_SUBMIT_LABEL: &str = "Submit Application";
pub const BUSY_SUBMIT_LABEL: &str = "Submitting...";
pub const INVALID_FORM_ALERT: &str = "Please correct the errors in the form before submitting.";
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(300);

/// Where the controller sits in the submit/reset cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Success { reference: ApplicationReference },
}

impl SubmissionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Success { .. } => "success",
        }
    }
}

/// The submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    pub label: String,
    pub enabled: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: DEFAULT_SUBMIT_LABEL.to_string(),
            enabled: true,
        }
    }
}

/// Success modal plus the page effects it brings along.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuccessOverlay {
    pub visible: bool,
    pub reference: Option<ApplicationReference>,
    pub form_dimmed: bool,
    pub scroll_locked: bool,
}

/// Request to bring a field into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    pub field: FieldId,
    pub centered: bool,
    pub smooth: bool,
}

/// Ways the success overlay can be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissTrigger {
    CloseButton,
    BackdropClick,
    EscapeKey,
    SubmitAnother,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SubmitOutcome {
    Accepted {
        reference: ApplicationReference,
    },
    Invalid {
        invalid_fields: Vec<FieldId>,
        scroll_target: Option<FieldId>,
    },
    Failed {
        reason: String,
    },
    /// A submission is in flight or the success overlay is still up.
    Ignored,
}

/// A validated form waiting on the gateway. Hand it back to
/// [`SubmissionController::complete_submit`].
#[derive(Debug)]
#[must_use = "a pending submission leaves the submit control disabled until completed"]
pub struct PendingSubmission {
    snapshot: FormSnapshot,
    original_label: String,
}

impl PendingSubmission {
    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }
}

/// Owns the form and drives validation, submission, and reset.
///
/// All transitions take `&mut self`, so handlers never overlap.
pub struct SubmissionController<G> {
    validator: FieldValidator,
    gateway: Arc<G>,
    form: FormState,
    phase: SubmissionPhase,
    submit_control: SubmitControl,
    overlay: SuccessOverlay,
    scroll_request: Option<ScrollRequest>,
    alert: Option<String>,
    reset_delay: Duration,
    reset_pending: bool,
}

impl<G> SubmissionController<G>
where
    G: SubmissionGateway + 'static,
{
    pub fn new(validator: FieldValidator, gateway: Arc<G>) -> Self {
        Self {
            validator,
            gateway,
            form: FormState::new(),
            phase: SubmissionPhase::Idle,
            submit_control: SubmitControl::default(),
            overlay: SuccessOverlay::default(),
            scroll_request: None,
            alert: None,
            reset_delay: DEFAULT_RESET_DELAY,
            reset_pending: false,
        }
    }

    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit_control
    }

    pub fn overlay(&self) -> &SuccessOverlay {
        &self.overlay
    }

    pub fn scroll_request(&self) -> Option<&ScrollRequest> {
        self.scroll_request.as_ref()
    }

    /// Blocking alert raised by the last submit attempt, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Acknowledge the pending alert.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Store a new value and validate it, as a `change` event does.
    pub fn change(&mut self, field: FieldId, value: FieldValue) -> ValidationResult {
        self.form.set(field, value);
        self.validator.annotate(&mut self.form, field)
    }

    /// Re-validate the current value, as a `blur` event does.
    pub fn blur(&mut self, field: FieldId) -> ValidationResult {
        self.validator.annotate(&mut self.form, field)
    }

    /// Validate everything and, when clean, lock the submit control.
    ///
    /// `Err` carries an outcome that needs no gateway call. An `Ok` leaves the controller
    /// in `Submitting` with the control disabled until the pending submission is handed to
    /// [`complete_submit`](Self::complete_submit) or [`cancel_submit`](Self::cancel_submit).
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitOutcome> {
        if !matches!(self.phase, SubmissionPhase::Idle) {
            return Err(SubmitOutcome::Ignored);
        }

        self.phase = SubmissionPhase::Validating;
        self.scroll_request = None;
        self.alert = None;
        let report: FormReport = self.validator.validate_form(&mut self.form);

        if !report.is_valid() {
            let invalid_fields = report.invalid_fields();
            let scroll_target = self.form.first_with(Presentation::Error);
            self.scroll_request = scroll_target.map(|field| ScrollRequest {
                field,
                centered: true,
                smooth: true,
            });
            self.alert = Some(INVALID_FORM_ALERT.to_string());
            self.phase = SubmissionPhase::Idle;

            warn!(
                invalid = invalid_fields.len(),
                scroll_target = ?scroll_target,
                "submission blocked by validation"
            );
            return Err(SubmitOutcome::Invalid {
                invalid_fields,
                scroll_target,
            });
        }

        let original_label = std::mem::replace(
            &mut self.submit_control.label,
            BUSY_SUBMIT_LABEL.to_string(),
        );
        self.submit_control.enabled = false;
        self.phase = SubmissionPhase::Submitting;

        Ok(PendingSubmission {
            snapshot: self.form.snapshot(),
            original_label,
        })
    }

    /// Apply the gateway's answer and restore the submit control.
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<SubmissionReceipt, SubmissionError>,
    ) -> SubmitOutcome {
        self.submit_control = SubmitControl {
            label: pending.original_label,
            enabled: true,
        };

        match result {
            Ok(receipt) => {
                info!(reference = %receipt.reference, "application submitted");
                self.overlay = SuccessOverlay {
                    visible: true,
                    reference: Some(receipt.reference.clone()),
                    form_dimmed: true,
                    scroll_locked: true,
                };
                self.phase = SubmissionPhase::Success {
                    reference: receipt.reference.clone(),
                };
                SubmitOutcome::Accepted {
                    reference: receipt.reference,
                }
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                self.alert = Some(err.to_string());
                self.phase = SubmissionPhase::Idle;
                SubmitOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Abandon a pending submission without a gateway answer. The form keeps its values.
    pub fn cancel_submit(&mut self, pending: PendingSubmission) {
        self.submit_control = SubmitControl {
            label: pending.original_label,
            enabled: true,
        };
        self.phase = SubmissionPhase::Idle;
        info!("pending submission cancelled");
    }

    /// Full submit: validate, wait on the gateway, show the overlay.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };

        let result = self.gateway.submit(pending.snapshot.clone()).await;
        self.complete_submit(pending, result)
    }

    /// Close the overlay and restore the page. Returns `false` when the overlay was not
    /// showing, in which case nothing changes.
    pub fn begin_dismiss(&mut self, trigger: DismissTrigger) -> bool {
        if !self.overlay.visible {
            return false;
        }

        self.overlay.visible = false;
        self.overlay.form_dimmed = false;
        self.overlay.scroll_locked = false;
        self.reset_pending = true;
        info!(?trigger, "success overlay dismissed");
        true
    }

    /// Clear every value and annotation and return to idle.
    pub fn finish_reset(&mut self) {
        if !self.reset_pending {
            return;
        }

        self.form.reset();
        self.overlay = SuccessOverlay::default();
        self.scroll_request = None;
        self.reset_pending = false;
        self.phase = SubmissionPhase::Idle;
        info!("form reset");
    }

    /// Dismiss the overlay and, after the reset delay, clear the form.
    pub async fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        if !self.begin_dismiss(trigger) {
            return false;
        }

        tokio::time::sleep(self.reset_delay).await;
        self.finish_reset();
        true
    }

    /// "Submit another application": dismiss, then wait for fresh input.
    pub async fn submit_another(&mut self) -> bool {
        self.dismiss(DismissTrigger::SubmitAnother).await
    }
}
