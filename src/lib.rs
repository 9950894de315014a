//! Client for an unsupervised domain adaptation service.
//!
//! The library holds the workflow state machines, the HTTP backend adapter,
//! results rendering, and the desktop UI; the `uda-client` and `uda-cli`
//! binaries are thin shells over it.

/// Application directory helpers.
pub mod app_dirs;
/// Backend contract and its HTTP implementation.
pub mod backend;
/// Persisted settings.
pub mod config;
/// Predictions CSV download.
pub mod download;
/// Shared egui UI modules.
pub mod egui_app;
/// Error taxonomy shared by both workflows.
pub mod error;
pub(crate) mod http_client;
/// Logging setup.
pub mod logging;
/// Metrics payload returned after training.
pub mod metrics;
/// Prediction payloads.
pub mod prediction;
/// Display formatting for metrics.
pub mod report;
/// Batch and single-row workflow controllers.
pub mod session;
/// Selected CSV inputs.
pub mod uploads;
