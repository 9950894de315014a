//! Owns the session, settings, and background jobs behind the desktop UI.

mod files;
mod jobs;
mod settings;

use std::{sync::Arc, time::Duration};

use crate::{
    backend::{Backend, HttpBackend},
    config::AppSettings,
    egui_app::{state::UiState, ui::style::StatusTone},
    error::{ClientError, TransportError},
    session::{BatchOutcome, Session, SingleRowOutcome, TrainingState},
};

use jobs::{ControllerJobs, JobMessage};

/// Maintains app state and bridges the workflows to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    session: Session,
    settings: AppSettings,
    backend: Result<Arc<dyn Backend>, TransportError>,
    jobs: ControllerJobs,
    persist_settings: bool,
}

impl EguiController {
    /// Controller talking to the configured HTTP backend.
    pub fn new(settings: AppSettings) -> Self {
        let backend = build_http_backend(&settings);
        let mut controller = Self::from_parts(settings, backend, true);
        if let Err(err) = &controller.backend {
            let message = err.to_string();
            controller.set_status(message.clone(), StatusTone::Error);
            controller.open_settings();
            controller.ui.settings.last_error = Some(message);
        }
        controller
    }

    pub(crate) fn from_parts(
        settings: AppSettings,
        backend: Result<Arc<dyn Backend>, TransportError>,
        persist_settings: bool,
    ) -> Self {
        Self {
            ui: UiState::default(),
            session: Session::new(),
            settings,
            backend,
            jobs: ControllerJobs::new(),
            persist_settings,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn training_state(&self) -> TrainingState {
        self.session.training_state()
    }

    /// Time since the batch request was sent, while one is in flight.
    pub fn processing_elapsed(&self) -> Option<Duration> {
        self.session.batch.elapsed()
    }

    /// True while any request is outstanding; the UI keeps repainting meanwhile.
    pub fn is_busy(&self) -> bool {
        self.jobs.any_in_progress()
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }

    /// Validate the uploads and send them to the backend on a worker thread.
    pub fn submit_batch(&mut self) {
        let job = match self.session.batch.begin_submit() {
            Ok(job) => job,
            Err(err) => {
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        match &self.backend {
            Ok(backend) => {
                self.jobs.begin_batch(job, Arc::clone(backend));
                self.set_status("Processing your data...", StatusTone::Busy);
            }
            Err(err) => {
                let outcome = job.fail(ClientError::from(err.clone()));
                self.apply_batch_outcome(outcome);
            }
        }
    }

    /// Validate the single-row input and request a prediction on a worker thread.
    pub fn predict_single_row(&mut self) {
        let job = match self.session.begin_predict() {
            Ok(job) => job,
            Err(err) => {
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        match &self.backend {
            Ok(backend) => {
                self.jobs.begin_prediction(job, Arc::clone(backend));
                self.set_status("Predicting label...", StatusTone::Busy);
            }
            Err(err) => {
                let outcome = job.fail(ClientError::from(err.clone()));
                self.apply_prediction_outcome(outcome);
            }
        }
    }

    /// Drain finished jobs. Call once per frame.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::BatchFinished(outcome) => {
                    self.jobs.clear_batch();
                    self.apply_batch_outcome(outcome);
                }
                JobMessage::PredictionFinished(outcome) => {
                    self.jobs.clear_prediction();
                    self.apply_prediction_outcome(outcome);
                }
            }
        }
    }

    fn apply_batch_outcome(&mut self, outcome: BatchOutcome) {
        if !self.session.batch.complete(outcome) {
            return;
        }
        if let Some(model) = self.session.batch.trained() {
            let text = format!(
                "Model trained: {} prediction rows ready to download",
                model.predictions.row_count()
            );
            self.set_status(text, StatusTone::Info);
        } else if let Some(message) = self.session.batch.user_message() {
            self.set_status(message, StatusTone::Error);
        }
    }

    fn apply_prediction_outcome(&mut self, outcome: SingleRowOutcome) {
        if !self.session.single_row.complete(outcome) {
            return;
        }
        if let Some(label) = self.session.single_row.prediction() {
            let text = format!("Predicted label: {label}");
            self.set_status(text, StatusTone::Info);
        } else if let Some(message) = self.session.single_row.user_message() {
            self.set_status(message, StatusTone::Error);
        }
    }
}

fn build_http_backend(settings: &AppSettings) -> Result<Arc<dyn Backend>, TransportError> {
    let backend = HttpBackend::new(&settings.backend)?;
    tracing::info!(url = %backend.base_url(), "Backend configured");
    Ok(Arc::new(backend))
}
