//! Error kinds surfaced by the batch and single-row workflows.
//!
//! Every failure is recovered at the controller boundary and turned into a
//! single user-visible message; none of these are fatal to the process.

use crate::uploads::UploadSlot;

/// Failure of a submission attempt, grouped by where it was detected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Missing or unusable input, detected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend answered with a non-success HTTP status.
    #[error("{message}")]
    Backend {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Server-supplied `detail`, or a generic status message.
        message: String,
    },
    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// True when the error was raised locally without contacting the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Build a backend error from a status code and an optional `detail` string.
    pub fn backend(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|detail| !detail.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        Self::Backend { status, message }
    }
}

/// Input problems caught before a request is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more of the three batch uploads has not been selected.
    #[error("Please upload all three required CSV files.")]
    MissingUploads {
        /// Slots that are still empty, in display order.
        missing: Vec<UploadSlot>,
    },
    /// No single-row file has been selected.
    #[error("Please upload a single row CSV file.")]
    MissingSingleRowFile,
    /// Single-row prediction requested before the batch workflow succeeded.
    #[error("Model has not been trained yet. Please process the main data first.")]
    ModelNotTrained,
    /// The workflow already has a request in flight.
    #[error("A request is already in progress.")]
    RequestInFlight,
}

/// Network failures and response bodies that do not match the documented shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS, TLS or I/O failure while talking to the backend.
    #[error("Network error: {0}")]
    Network(String),
    /// The response body could not be parsed or failed shape validation.
    #[error("Malformed response: {0}")]
    MalformedBody(String),
    /// The response body exceeded the configured size cap.
    #[error("Response too large: {0}")]
    BodyTooLarge(String),
    /// The configured backend URL cannot address the endpoint.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}
