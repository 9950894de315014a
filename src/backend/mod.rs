//! The backend seam: what the workflows need from the ML service.
//!
//! [`HttpBackend`] talks to the real service; tests substitute in-memory
//! implementations of [`Backend`].

pub mod api;
pub(crate) mod multipart;

pub use api::{HttpBackend, PREDICT_SINGLE_PATH, PROCESS_DATA_PATH, SINGLE_FILE_FIELD};

use crate::{
    error::ClientError,
    metrics::MetricsResult,
    prediction::{PredictedLabel, PredictionsArtifact},
    uploads::{CompleteUploads, CsvFile},
};

/// Validated body of a successful `/process-data` call.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessOutcome {
    pub metrics: MetricsResult,
    pub predictions: PredictionsArtifact,
}

/// Operations exposed by the domain-adaptation service.
///
/// Implementations block until the request completes; callers decide which
/// thread that happens on.
pub trait Backend: Send + Sync {
    /// Train on the uploaded datasets and evaluate on the target domain.
    fn process_data(&self, uploads: &CompleteUploads) -> Result<ProcessOutcome, ClientError>;

    /// Predict the label of a single unlabeled row with the trained model.
    fn predict_single(&self, file: &CsvFile) -> Result<PredictedLabel, ClientError>;
}
