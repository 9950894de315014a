//! Batch workflow: three uploads in, metrics and predictions out.

use std::time::{Duration, Instant};

use crate::{
    backend::{Backend, ProcessOutcome},
    error::{ClientError, ValidationError},
    metrics::MetricsResult,
    prediction::PredictionsArtifact,
    uploads::{CompleteUploads, CsvFile, UploadSet, UploadSlot},
};

use super::TrainingState;

/// Results that exist only while the model is trained.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainedModel {
    pub metrics: MetricsResult,
    pub predictions: PredictionsArtifact,
}

impl From<ProcessOutcome> for TrainedModel {
    fn from(outcome: ProcessOutcome) -> Self {
        Self {
            metrics: outcome.metrics,
            predictions: outcome.predictions,
        }
    }
}

/// Batch state with its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchState {
    Idle,
    Submitting { attempt: u64, started: Instant },
    Trained(TrainedModel),
    Failed,
}

/// A submission snapshot that can be sent from any thread.
#[derive(Clone, Debug)]
pub struct BatchJob {
    attempt: u64,
    uploads: CompleteUploads,
}

/// Result of running a [`BatchJob`], to be fed back into the controller.
#[derive(Debug)]
pub struct BatchOutcome {
    attempt: u64,
    result: Result<ProcessOutcome, ClientError>,
}

impl BatchJob {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Perform the network call. Blocks until the backend answers.
    pub fn run(self, backend: &dyn Backend) -> BatchOutcome {
        let result = backend.process_data(&self.uploads);
        BatchOutcome {
            attempt: self.attempt,
            result,
        }
    }

    /// Settle the job without contacting a backend.
    pub fn fail(self, error: ClientError) -> BatchOutcome {
        BatchOutcome {
            attempt: self.attempt,
            result: Err(error),
        }
    }
}

impl BatchOutcome {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

/// Owns the upload set and the training state machine.
#[derive(Debug)]
pub struct BatchController {
    uploads: UploadSet,
    state: BatchState,
    last_error: Option<ClientError>,
    next_attempt: u64,
}

impl Default for BatchController {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchController {
    pub fn new() -> Self {
        Self {
            uploads: UploadSet::default(),
            state: BatchState::Idle,
            last_error: None,
            next_attempt: 1,
        }
    }

    pub fn uploads(&self) -> &UploadSet {
        &self.uploads
    }

    pub fn select(&mut self, slot: UploadSlot, file: CsvFile) {
        tracing::info!(
            slot = slot.field_name(),
            file = file.file_name(),
            bytes = file.len(),
            "Upload selected"
        );
        self.uploads.set(slot, file);
    }

    pub fn clear(&mut self, slot: UploadSlot) {
        self.uploads.clear(slot);
    }

    pub fn state(&self) -> &BatchState {
        &self.state
    }

    pub fn training_state(&self) -> TrainingState {
        match self.state {
            BatchState::Idle => TrainingState::Idle,
            BatchState::Submitting { .. } => TrainingState::Submitting,
            BatchState::Trained(_) => TrainingState::Trained,
            BatchState::Failed => TrainingState::Failed,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, BatchState::Submitting { .. })
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.uploads.is_complete()
    }

    pub fn trained(&self) -> Option<&TrainedModel> {
        match &self.state {
            BatchState::Trained(model) => Some(model),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<&MetricsResult> {
        self.trained().map(|model| &model.metrics)
    }

    pub fn predictions(&self) -> Option<&PredictionsArtifact> {
        self.trained().map(|model| &model.predictions)
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Time since the in-flight request was sent.
    pub fn elapsed(&self) -> Option<Duration> {
        match self.state {
            BatchState::Submitting { started, .. } => Some(started.elapsed()),
            _ => None,
        }
    }

    /// Message for the error banner, if any.
    pub fn user_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|err| match err {
            ClientError::Validation(err) => err.to_string(),
            other => format!(
                "An error occurred during processing: {other}. Please ensure the backend is running and accessible."
            ),
        })
    }

    /// Validate the inputs and enter `Submitting`.
    ///
    /// Validation failures only replace the error message; state and any
    /// trained results are left untouched.
    pub fn begin_submit(&mut self) -> Result<BatchJob, ClientError> {
        if self.is_submitting() {
            return Err(ValidationError::RequestInFlight.into());
        }
        let Some(uploads) = self.uploads.complete() else {
            let err = ClientError::from(ValidationError::MissingUploads {
                missing: self.uploads.missing(),
            });
            tracing::warn!("Batch submission rejected: {err}");
            self.last_error = Some(err.clone());
            return Err(err);
        };
        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.last_error = None;
        self.state = BatchState::Submitting {
            attempt,
            started: Instant::now(),
        };
        tracing::info!(attempt, "Submitting datasets for training");
        Ok(BatchJob { attempt, uploads })
    }

    /// Apply a finished request. Outcomes of superseded attempts are ignored.
    ///
    /// Returns `true` when the outcome was applied.
    pub fn complete(&mut self, outcome: BatchOutcome) -> bool {
        let in_flight = match self.state {
            BatchState::Submitting { attempt, .. } => attempt,
            _ => {
                tracing::debug!(
                    attempt = outcome.attempt,
                    "Ignoring batch outcome with nothing in flight"
                );
                return false;
            }
        };
        if in_flight != outcome.attempt {
            tracing::debug!(attempt = outcome.attempt, in_flight, "Ignoring stale batch outcome");
            return false;
        }
        match outcome.result {
            Ok(result) => {
                tracing::info!(
                    accuracy = result.metrics.accuracy,
                    rows = result.predictions.row_count(),
                    "Training finished"
                );
                self.state = BatchState::Trained(result.into());
                self.last_error = None;
            }
            Err(err) => {
                tracing::error!("Error during processing: {err}");
                self.state = BatchState::Failed;
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Submit and wait for the result on the current thread.
    pub fn submit(&mut self, backend: &dyn Backend) -> Result<&TrainedModel, ClientError> {
        let job = self.begin_submit()?;
        self.complete(job.run(backend));
        match (&self.state, &self.last_error) {
            (BatchState::Trained(model), _) => Ok(model),
            (_, Some(err)) => Err(err.clone()),
            _ => Err(ValidationError::RequestInFlight.into()),
        }
    }
}
