use log::{debug, info, warn};
use tokio::time::{sleep, Duration};
use crate::modules::{
    error::WorkflowError,
    record::WizardRecord,
    submission_client::{result::SubmissionResult, SubmissionApi},
    validator::missing_fields,
};

// What a call to `advance` did
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    // Moved on to `step`
    Moved { step: usize },
    // Required fields of the current step are empty, nothing changed
    Blocked { missing: Vec<&'static str> },
    // Final step accepted and submitted
    Submitted(SubmissionResult),
}

/// Multi-step form state: the active step, the record being filled in, and
/// the backend the finished record is handed to.
pub struct Wizard<R: WizardRecord, S: SubmissionApi<R>> {
    step: usize,
    record: R,
    submitter: S,
    // Set once the final step was submitted successfully
    submitted: Option<SubmissionResult>,
}

impl<R: WizardRecord, S: SubmissionApi<R>> Wizard<R, S> {
    pub fn new(submitter: S) -> Self {
        Self::with_record(submitter, R::default())
    }

    // Resume from a saved draft, starting again at the first step
    pub fn with_record(submitter: S, record: R) -> Self {
        Self {
            step: 0,
            record,
            submitter,
            submitted: None,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_name(&self) -> &'static str {
        R::step_name(self.step).unwrap_or("")
    }

    pub fn is_final_step(&self) -> bool {
        self.step + 1 >= R::step_count()
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn submission(&self) -> Option<&SubmissionResult> {
        self.submitted.as_ref()
    }

    // Missing fields of the current step, for showing field errors
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(&self.record, self.step)
    }

    pub fn update_field(&mut self, update: R::Update) {
        if self.submitted.is_some() {
            debug!("Ignoring field update on a submitted wizard");
            return;
        }
        self.record.apply(update);
    }

    pub fn retreat(&mut self) {
        if self.submitted.is_some() || self.step == 0 {
            return;
        }
        self.step -= 1;
    }

    // Gate on the current step; on the final step submit instead of moving.
    // A failed submission keeps step and record so the caller can retry.
    pub async fn advance(&mut self) -> Result<Advance, WorkflowError> {
        if let Some(result) = &self.submitted {
            return Ok(Advance::Submitted(result.clone()));
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            debug!("Step '{}' blocked on {:?}", self.step_name(), missing);
            return Ok(Advance::Blocked { missing });
        }

        if !self.is_final_step() {
            self.step += 1;
            debug!("Advanced to step '{}'", self.step_name());
            return Ok(Advance::Moved { step: self.step });
        }

        info!("Submitting from final step '{}'", self.step_name());
        let result = self.submitter.submit(self.record.clone()).await?;
        self.submitted = Some(result.clone());
        Ok(Advance::Submitted(result))
    }

    // Advance until the record is submitted. An incomplete step ends the
    // run with a ValidationError naming the missing fields. Transient
    // failures are retried, `max_attempts` submissions in total, with
    // `retry_interval` between them; any other error is returned as is.
    pub async fn run_to_submission(
        &mut self,
        max_attempts: u32,
        retry_interval: Duration,
    ) -> Result<SubmissionResult, WorkflowError> {
        let mut failures = 0;
        loop {
            match self.advance().await {
                Ok(Advance::Moved { step }) => {
                    info!("Step {}/{}: {}", step + 1, R::step_count(), self.step_name());
                }
                Ok(Advance::Blocked { missing }) => {
                    return Err(WorkflowError::ValidationError(format!(
                        "step '{}' is missing {}",
                        self.step_name(),
                        missing.join(", ")
                    )));
                }
                Ok(Advance::Submitted(result)) => return Ok(result),
                Err(e) if e.is_retryable() && failures + 1 < max_attempts => {
                    failures += 1;
                    warn!("Attempt {} failed: {}, retrying in {:?}", failures, e, retry_interval);
                    sleep(retry_interval).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
