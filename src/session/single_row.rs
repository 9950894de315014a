//! Single-row workflow: one unlabeled row in, one predicted label out.

use crate::{
    backend::Backend,
    error::{ClientError, ValidationError},
    prediction::PredictedLabel,
    uploads::CsvFile,
};

use super::TrainingState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SingleRowState {
    Idle,
    Predicting { attempt: u64 },
    Done(PredictedLabel),
    Failed,
}

/// A prediction request snapshot that can be sent from any thread.
#[derive(Clone, Debug)]
pub struct SingleRowJob {
    attempt: u64,
    file: CsvFile,
}

#[derive(Debug)]
pub struct SingleRowOutcome {
    attempt: u64,
    result: Result<PredictedLabel, ClientError>,
}

impl SingleRowJob {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn run(self, backend: &dyn Backend) -> SingleRowOutcome {
        let result = backend.predict_single(&self.file);
        SingleRowOutcome {
            attempt: self.attempt,
            result,
        }
    }

    pub fn fail(self, error: ClientError) -> SingleRowOutcome {
        SingleRowOutcome {
            attempt: self.attempt,
            result: Err(error),
        }
    }
}

impl SingleRowOutcome {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

#[derive(Debug)]
pub struct SingleRowController {
    file: Option<CsvFile>,
    state: SingleRowState,
    last_error: Option<ClientError>,
    next_attempt: u64,
}

impl Default for SingleRowController {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleRowController {
    pub fn new() -> Self {
        Self {
            file: None,
            state: SingleRowState::Idle,
            last_error: None,
            next_attempt: 1,
        }
    }

    pub fn file(&self) -> Option<&CsvFile> {
        self.file.as_ref()
    }

    pub fn select(&mut self, file: CsvFile) {
        tracing::info!(file = file.file_name(), bytes = file.len(), "Single-row file selected");
        self.file = Some(file);
    }

    pub fn clear(&mut self) {
        self.file = None;
    }

    pub fn state(&self) -> &SingleRowState {
        &self.state
    }

    pub fn is_predicting(&self) -> bool {
        matches!(self.state, SingleRowState::Predicting { .. })
    }

    /// Whether the predict control should be enabled.
    pub fn can_predict(&self, training: TrainingState) -> bool {
        !self.is_predicting() && self.file.is_some() && training == TrainingState::Trained
    }

    pub fn prediction(&self) -> Option<&PredictedLabel> {
        match &self.state {
            SingleRowState::Done(label) => Some(label),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn user_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|err| match err {
            ClientError::Validation(err) => err.to_string(),
            other => format!("Prediction error: {other}"),
        })
    }

    /// Validate and enter `Predicting`.
    ///
    /// A missing file is reported before an untrained model; neither touches
    /// the state or a previously shown label.
    pub fn begin_predict(&mut self, training: TrainingState) -> Result<SingleRowJob, ClientError> {
        if self.is_predicting() {
            return Err(ValidationError::RequestInFlight.into());
        }
        let rejection = match (&self.file, training) {
            (None, _) => Some(ValidationError::MissingSingleRowFile),
            (Some(_), state) if state != TrainingState::Trained => {
                Some(ValidationError::ModelNotTrained)
            }
            _ => None,
        };
        if let Some(reason) = rejection {
            let err = ClientError::from(reason);
            tracing::warn!("Single-row prediction rejected: {err}");
            self.last_error = Some(err.clone());
            return Err(err);
        }
        let Some(file) = self.file.clone() else {
            return Err(ValidationError::MissingSingleRowFile.into());
        };
        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.last_error = None;
        self.state = SingleRowState::Predicting { attempt };
        tracing::info!(attempt, file = file.file_name(), "Requesting single-row prediction");
        Ok(SingleRowJob { attempt, file })
    }

    /// Apply a finished request. Outcomes of superseded attempts are ignored.
    pub fn complete(&mut self, outcome: SingleRowOutcome) -> bool {
        match self.state {
            SingleRowState::Predicting { attempt } if attempt == outcome.attempt => {}
            _ => {
                tracing::debug!(attempt = outcome.attempt, "Ignoring stale prediction outcome");
                return false;
            }
        }
        match outcome.result {
            Ok(label) => {
                tracing::info!(%label, "Single-row prediction received");
                self.state = SingleRowState::Done(label);
                self.last_error = None;
            }
            Err(err) => {
                tracing::error!("Error predicting single row: {err}");
                self.state = SingleRowState::Failed;
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Predict and wait for the result on the current thread.
    pub fn predict(
        &mut self,
        training: TrainingState,
        backend: &dyn Backend,
    ) -> Result<&PredictedLabel, ClientError> {
        let job = self.begin_predict(training)?;
        self.complete(job.run(backend));
        match (&self.state, &self.last_error) {
            (SingleRowState::Done(label), _) => Ok(label),
            (_, Some(err)) => Err(err.clone()),
            _ => Err(ValidationError::RequestInFlight.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::session::test_support::FakeBackend;

    fn row() -> CsvFile {
        CsvFile::from_bytes("row.csv", "Protocol,Flow Duration\n6,120\n")
    }

    #[test]
    fn missing_file_is_reported_before_untrained_model() {
        let backend = FakeBackend::default();
        let mut controller = SingleRowController::new();
        let err = controller.predict(TrainingState::Idle, &backend).unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::MissingSingleRowFile));
        assert_eq!(
            controller.user_message().as_deref(),
            Some("Please upload a single row CSV file.")
        );
        assert_eq!(backend.predict_calls(), 0);
    }

    #[test]
    fn untrained_model_blocks_prediction_without_network_call() {
        let backend = FakeBackend::default();
        let mut controller = SingleRowController::new();
        controller.select(row());
        for state in [TrainingState::Idle, TrainingState::Submitting, TrainingState::Failed] {
            assert!(!controller.can_predict(state));
            let err = controller.predict(state, &backend).unwrap_err();
            assert_eq!(err, ClientError::Validation(ValidationError::ModelNotTrained));
            assert_eq!(controller.state(), &SingleRowState::Idle);
        }
        assert_eq!(backend.predict_calls(), 0);
        assert_eq!(
            controller.user_message().as_deref(),
            Some("Model has not been trained yet. Please process the main data first.")
        );
    }

    #[test]
    fn success_then_failure_then_success() {
        let backend = FakeBackend::default();
        backend.push_predict(Ok(PredictedLabel::Number(serde_json::Number::from(3u64))));
        backend.push_predict(Err(TransportError::Network("connection refused".into()).into()));
        backend.push_predict(Ok(PredictedLabel::Text("benign".into())));
        let mut controller = SingleRowController::new();
        controller.select(row());

        let label = controller.predict(TrainingState::Trained, &backend).unwrap();
        assert_eq!(label.to_string(), "3");

        controller.predict(TrainingState::Trained, &backend).unwrap_err();
        assert_eq!(controller.state(), &SingleRowState::Failed);
        assert!(controller.prediction().is_none());
        assert_eq!(
            controller.user_message().as_deref(),
            Some("Prediction error: Network error: connection refused")
        );

        controller.predict(TrainingState::Trained, &backend).unwrap();
        assert!(controller.last_error().is_none());
        assert_eq!(controller.prediction().map(ToString::to_string).as_deref(), Some("benign"));
        assert_eq!(backend.predict_calls(), 3);
    }

    #[test]
    fn begin_predict_clears_previous_label_and_rejects_duplicates() {
        let backend = FakeBackend::default();
        backend.push_predict(Ok(PredictedLabel::Number(serde_json::Number::from(1u64))));
        let mut controller = SingleRowController::new();
        controller.select(row());
        controller.predict(TrainingState::Trained, &backend).unwrap();

        let job = controller.begin_predict(TrainingState::Trained).unwrap();
        assert!(controller.prediction().is_none());
        assert!(controller.is_predicting());
        assert_eq!(
            controller.begin_predict(TrainingState::Trained).unwrap_err(),
            ClientError::Validation(ValidationError::RequestInFlight)
        );
        assert_eq!(job.attempt(), 2);
    }
}
