//! Workflow state machines.
//!
//! Each workflow owns its state record; the only coupling is that single-row
//! prediction reads the batch [`TrainingState`] when it starts.

mod batch;
mod single_row;

pub use batch::{BatchController, BatchJob, BatchOutcome, BatchState, TrainedModel};
pub use single_row::{SingleRowController, SingleRowJob, SingleRowOutcome, SingleRowState};

use crate::{backend::Backend, error::ClientError, prediction::PredictedLabel, uploads::CsvFile};

/// Payload-free view of the batch state, used for gating and display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrainingState {
    #[default]
    Idle,
    Submitting,
    Trained,
    Failed,
}

impl TrainingState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Submitting => "Processing",
            Self::Trained => "Trained",
            Self::Failed => "Failed",
        }
    }
}

/// Both workflows of one client window.
#[derive(Debug, Default)]
pub struct Session {
    pub batch: BatchController,
    pub single_row: SingleRowController,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn training_state(&self) -> TrainingState {
        self.batch.training_state()
    }

    pub fn can_predict(&self) -> bool {
        self.single_row.can_predict(self.training_state())
    }

    /// Start a single-row prediction gated on the current batch state.
    pub fn begin_predict(&mut self) -> Result<SingleRowJob, ClientError> {
        let training = self.training_state();
        self.single_row.begin_predict(training)
    }

    pub fn select_single_row(&mut self, file: CsvFile) {
        self.single_row.select(file);
    }

    /// Blocking single-row prediction.
    pub fn predict(&mut self, backend: &dyn Backend) -> Result<&PredictedLabel, ClientError> {
        let training = self.training_state();
        self.single_row.predict(training, backend)
    }
}
