use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use futures::future::{AbortHandle, Abortable, Aborted};
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tokio::{task::JoinHandle, time::sleep};
use uuid::Uuid;

use crate::config::SubmissionClientConfig;
use crate::modules::{
    error::WorkflowError,
    record::WizardRecord,
    submission_log::SubmissionLog,
    validator::check_consent,
};

pub mod result;

use result::{SubmissionResult, SubmissionStatus};

pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

/// Where a finished record is sent.
///
/// This is the seam a real `POST /projects` backend would sit behind; the
/// wizard only ever talks to this trait.
#[async_trait]
pub trait SubmissionApi<R: WizardRecord>: Send + Sync {
    async fn submit(&self, record: R) -> Result<SubmissionResult, WorkflowError>;
}

// Mock submission backend
// - Rejects records without full consent before doing anything else
// - Waits a fixed latency to stand in for the network round trip
// - Fails a configurable share of valid submissions with a transient error
// - Stores every accepted submission in the local submission log
#[derive(Clone)]
pub struct SubmissionClient {

    // Latency, failure rate and seed
    config: SubmissionClientConfig,

    // Log accepted submissions are appended to
    log: Arc<SubmissionLog>,

    // Source of the simulated failures, shared between clones
    rng: Arc<Mutex<StdRng>>,
}

impl SubmissionClient {
    pub fn new(log: Arc<SubmissionLog>, config: SubmissionClientConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            log,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub async fn submit<R: WizardRecord>(&self, record: R) -> Result<SubmissionResult, WorkflowError> {
        // Consent is checked up front, an invalid record never waits
        if let Err(e) = check_consent(record.consent()) {
            warn!("Submission rejected: {}", e);
            return Err(e);
        }

        let data = serde_json::to_value(&record)
            .map_err(|e| WorkflowError::JsonSerializationError(e.to_string()))?;

        debug!("Submitting record, simulated latency {:?}", self.config.latency());
        sleep(self.config.latency()).await;

        if self.roll_failure()? {
            warn!("Simulated network failure");
            return Err(WorkflowError::TransientError(NETWORK_ERROR.to_string()));
        }

        let result = SubmissionResult::new(
            Uuid::new_v4().to_string(),
            SubmissionStatus::Submitted,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            R::SUBMITTED_MESSAGE.to_string(),
        );

        self.log.append(&result, data).await?;
        info!("Submission {} accepted at {}", result.id(), result.submitted_at());

        Ok(result)
    }

    // Run the submission as its own task that can be aborted, e.g. when the
    // user leaves the page. Must be called from within a tokio runtime.
    pub fn submit_cancellable<R: WizardRecord>(&self, record: R) -> PendingSubmission {
        let (abort_handle, registration) = AbortHandle::new_pair();
        let client = self.clone();

        let task = tokio::spawn(Abortable::new(
            async move { client.submit(record).await },
            registration,
        ));

        PendingSubmission { abort_handle, task }
    }

    // True when this attempt should fail
    fn roll_failure(&self) -> Result<bool, WorkflowError> {
        let mut rng = self.rng
            .lock()
            .map_err(|_| WorkflowError::TaskError("failure generator lock poisoned".to_string()))?;
        Ok(rng.gen::<f64>() < self.config.failure_rate)
    }
}

#[async_trait]
impl<R: WizardRecord> SubmissionApi<R> for SubmissionClient {
    async fn submit(&self, record: R) -> Result<SubmissionResult, WorkflowError> {
        SubmissionClient::submit(self, record).await
    }
}

// Handle to an in-flight submission started with `submit_cancellable`
pub struct PendingSubmission {
    abort_handle: AbortHandle,
    task: JoinHandle<Result<Result<SubmissionResult, WorkflowError>, Aborted>>,
}

impl PendingSubmission {
    // Abort the submission. Nothing is stored if it is still waiting on the
    // simulated latency.
    pub fn cancel(&self) {
        info!("Cancelling in-flight submission");
        self.abort_handle.abort();
    }

    // Extra handle for whoever tracks navigation
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort_handle.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn outcome(self) -> Result<SubmissionResult, WorkflowError> {
        match self.task.await {
            Ok(Ok(result)) => result,
            Ok(Err(Aborted)) => Err(WorkflowError::Cancelled),
            Err(e) => Err(WorkflowError::TaskError(e.to_string())),
        }
    }
}
