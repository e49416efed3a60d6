use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{FieldId, FieldValue, ValidationResult};
use super::submission::{DismissTrigger, SubmissionController, SubmissionGateway, SubmitOutcome};

/// A user interaction with the form, as dispatched by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    Change { field: FieldId, value: FieldValue },
    Blur { field: FieldId },
    Submit,
    Dismiss { trigger: DismissTrigger },
    SubmitAnother,
}

/// What handling an event produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EventEffect {
    Validated {
        field: FieldId,
        result: ValidationResult,
    },
    Submitted {
        outcome: SubmitOutcome,
    },
    Dismissed {
        reset: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read event script {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed event script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serial event loop over a [`SubmissionController`].
pub struct FormSession<G> {
    controller: SubmissionController<G>,
}

impl<G> FormSession<G>
where
    G: SubmissionGateway + 'static,
{
    pub fn new(controller: SubmissionController<G>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &SubmissionController<G> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SubmissionController<G> {
        &mut self.controller
    }

    pub fn into_controller(self) -> SubmissionController<G> {
        self.controller
    }

    /// Handle one event to completion before returning.
    pub async fn dispatch(&mut self, event: FormEvent) -> EventEffect {
        debug!(?event, "dispatching form event");
        match event {
            FormEvent::Change { field, value } => EventEffect::Validated {
                field,
                result: self.controller.change(field, value),
            },
            FormEvent::Blur { field } => EventEffect::Validated {
                field,
                result: self.controller.blur(field),
            },
            FormEvent::Submit => EventEffect::Submitted {
                outcome: self.controller.submit().await,
            },
            FormEvent::Dismiss { trigger } => EventEffect::Dismissed {
                reset: self.controller.dismiss(trigger).await,
            },
            FormEvent::SubmitAnother => EventEffect::Dismissed {
                reset: self.controller.submit_another().await,
            },
        }
    }

    pub async fn replay<I>(&mut self, events: I) -> Vec<EventEffect>
    where
        I: IntoIterator<Item = FormEvent>,
    {
        let mut effects = Vec::new();
        for event in events {
            effects.push(self.dispatch(event).await);
        }
        effects
    }
}

/// Parse a JSON array of events.
pub fn parse_script(json: &str) -> Result<Vec<FormEvent>, SessionError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_script(path: &Path) -> Result<Vec<FormEvent>, SessionError> {
    let raw = fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&raw)
}
