//! HTTP client for the `/process-data` and `/predict-single` endpoints.

use serde::Deserialize;
use url::Url;

use super::{Backend, ProcessOutcome, multipart::MultipartForm};
use crate::{
    config::BackendSettings,
    error::{ClientError, TransportError},
    http_client,
    metrics::MetricsResult,
    prediction::{PredictedLabel, PredictionsArtifact},
    uploads::{CompleteUploads, CsvFile},
};

pub const PROCESS_DATA_PATH: &str = "process-data";
pub const PREDICT_SINGLE_PATH: &str = "predict-single";
/// Multipart field carrying the single-row CSV.
pub const SINGLE_FILE_FIELD: &str = "single_file";

const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;
const MAX_PREDICTION_BODY_BYTES: usize = 64 * 1024;

/// [`Backend`] backed by a blocking ureq agent.
#[derive(Debug)]
pub struct HttpBackend {
    base_url: Url,
    agent: ureq::Agent,
    max_response_bytes: usize,
}

impl HttpBackend {
    /// Build a client for the configured service address.
    pub fn new(settings: &BackendSettings) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: parse_base_url(&settings.base_url)?,
            agent: http_client::agent(settings),
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| TransportError::InvalidUrl(format!("{path}: {err}")).into())
    }

    fn post_form(
        &self,
        path: &str,
        form: MultipartForm,
        max_bytes: usize,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(path)?;
        let content_type = form.content_type();
        let body = form.finish();
        tracing::debug!(url = %url, bytes = body.len(), "Posting multipart form");
        let response = match self
            .agent
            .post(url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", &content_type)
            .send_bytes(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = http_client::read_response_bytes(response, MAX_ERROR_BODY_BYTES)
                    .unwrap_or_default();
                return Err(ClientError::backend(code, extract_detail(&body)));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(TransportError::Network(err.to_string()).into());
            }
        };
        http_client::read_response_bytes(response, max_bytes).map_err(map_read_error)
    }
}

impl Backend for HttpBackend {
    fn process_data(&self, uploads: &CompleteUploads) -> Result<ProcessOutcome, ClientError> {
        let mut form = MultipartForm::new();
        for (slot, file) in uploads.parts() {
            form.add_csv(slot.field_name(), file.file_name(), file.bytes());
        }
        let body = self.post_form(PROCESS_DATA_PATH, form, self.max_response_bytes)?;
        parse_process_response(&body).map_err(ClientError::from)
    }

    fn predict_single(&self, file: &CsvFile) -> Result<PredictedLabel, ClientError> {
        let mut form = MultipartForm::new();
        form.add_csv(SINGLE_FILE_FIELD, file.file_name(), file.bytes());
        let max_bytes = self.max_response_bytes.min(MAX_PREDICTION_BODY_BYTES);
        let body = self.post_form(PREDICT_SINGLE_PATH, form, max_bytes)?;
        parse_predict_response(&body).map_err(ClientError::from)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| TransportError::InvalidUrl(format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn map_read_error(err: std::io::Error) -> ClientError {
    match err.kind() {
        std::io::ErrorKind::InvalidData => TransportError::BodyTooLarge(err.to_string()).into(),
        _ => TransportError::Network(err.to_string()).into(),
    }
}

#[derive(Debug, Deserialize)]
struct ProcessDataWire {
    metrics: MetricsResult,
    csv: String,
}

#[derive(Debug, Deserialize)]
struct PredictWire {
    prediction: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ErrorWire {
    detail: Option<serde_json::Value>,
}

fn parse_process_response(body: &[u8]) -> Result<ProcessOutcome, TransportError> {
    let wire: ProcessDataWire = parse_json(body)?;
    Ok(ProcessOutcome {
        metrics: wire.metrics,
        predictions: PredictionsArtifact::new(wire.csv),
    })
}

fn parse_predict_response(body: &[u8]) -> Result<PredictedLabel, TransportError> {
    let wire: PredictWire = parse_json(body)?;
    PredictedLabel::from_json(wire.prediction).ok_or_else(|| {
        TransportError::MalformedBody("`prediction` must be a string or a number".to_string())
    })
}

fn parse_json<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, TransportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(TransportError::MalformedBody("Empty response body".to_string()));
    }
    serde_json::from_slice(body).map_err(|err| TransportError::MalformedBody(err.to_string()))
}

/// Pull a human-readable `detail` out of an error body.
///
/// FastAPI validation errors send `detail` as an array; those are passed on
/// as compact JSON rather than dropped.
fn extract_detail(body: &[u8]) -> Option<String> {
    let wire: ErrorWire = serde_json::from_slice(body).ok()?;
    match wire.detail? {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
