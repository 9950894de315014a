//! Prediction payloads: the batch predictions CSV and single-row labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Predictions CSV returned inline by `/process-data`, kept verbatim.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionsArtifact(String);

impl PredictionsArtifact {
    pub fn new(contents: impl Into<String>) -> Self {
        Self(contents.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of data rows, not counting a header line.
    pub fn row_count(&self) -> usize {
        self.0
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
            .saturating_sub(1)
    }
}

impl fmt::Debug for PredictionsArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionsArtifact")
            .field("bytes", &self.0.len())
            .finish()
    }
}

/// Label returned by `/predict-single`.
///
/// The backend may send a string or a number; either is echoed exactly as
/// received, numbers keep their JSON spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictedLabel {
    Text(String),
    Number(serde_json::Number),
}

impl PredictedLabel {
    /// Accept a JSON scalar, rejecting null, booleans, arrays and objects.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(text) => Some(Self::Text(text)),
            serde_json::Value::Number(number) => Some(Self::Number(number)),
            _ => None,
        }
    }
}

impl fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_echo_verbatim() {
        let int = PredictedLabel::from_json(json!(3)).unwrap();
        assert_eq!(int.to_string(), "3");
        let text = PredictedLabel::from_json(json!("DDoS")).unwrap();
        assert_eq!(text.to_string(), "DDoS");
        let float = PredictedLabel::from_json(json!(1.5)).unwrap();
        assert_eq!(float.to_string(), "1.5");
    }

    #[test]
    fn non_scalar_labels_are_rejected() {
        assert!(PredictedLabel::from_json(json!(null)).is_none());
        assert!(PredictedLabel::from_json(json!(true)).is_none());
        assert!(PredictedLabel::from_json(json!([1])).is_none());
    }

    #[test]
    fn row_count_ignores_header_and_blank_lines() {
        let artifact = PredictionsArtifact::new("Label\r\n0\r\n1\r\n\r\n");
        assert_eq!(artifact.row_count(), 2);
        assert_eq!(PredictionsArtifact::new("").row_count(), 0);
    }
}
