use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::FormSnapshot;
use super::super::validator::Clock;

/// Display identifier shown on the success overlay: `JOB` plus six digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationReference(pub String);

impl ApplicationReference {
    pub const PREFIX: &'static str = "JOB";

    /// Uses the last six decimal digits of the timestamp, zero padded.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("{}{:06}", Self::PREFIX, millis.rem_euclid(1_000_000)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acknowledgement returned by a gateway for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub reference: ApplicationReference,
    pub submitted_at_millis: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission service unavailable: {0}")]
    Unavailable(String),
}

/// Destination for a validated form.
pub trait SubmissionGateway: Send + Sync {
    fn submit(
        &self,
        snapshot: FormSnapshot,
    ) -> impl Future<Output = Result<SubmissionReceipt, SubmissionError>> + Send;
}

/// Stand-in for the server round trip: waits a fixed latency, then always accepts.
#[derive(Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    clock: Arc<dyn Clock>,
}

impl SimulatedGateway {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    pub fn new(latency: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { latency, clock }
    }
}

impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, snapshot: FormSnapshot) -> Result<SubmissionReceipt, SubmissionError> {
        debug!(
            fields = snapshot.len(),
            latency_ms = self.latency.as_millis() as u64,
            "simulating submission round trip"
        );
        tokio::time::sleep(self.latency).await;

        let submitted_at_millis = self.clock.now_millis();
        Ok(SubmissionReceipt {
            reference: ApplicationReference::from_timestamp_millis(submitted_at_millis),
            submitted_at_millis,
        })
    }
}
