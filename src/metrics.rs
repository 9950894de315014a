//! Evaluation metrics returned by `/process-data`.

use std::{cmp::Ordering, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};

/// Class-wise key holding the unweighted mean of per-class metrics.
pub const MACRO_AVG_KEY: &str = "macro avg";
/// Class-wise key holding the support-weighted mean of per-class metrics.
pub const WEIGHTED_AVG_KEY: &str = "weighted avg";
/// Classification-report key that is never a class. Its value is a bare
/// number, so it is dropped while parsing.
pub const ACCURACY_KEY: &str = "accuracy";

/// Keys of the class-wise mapping that are aggregates rather than classes.
pub const RESERVED_CLASS_KEYS: [&str; 3] = [ACCURACY_KEY, MACRO_AVG_KEY, WEIGHTED_AVG_KEY];

/// Overall and class-wise scores for one training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub accuracy: f64,
    /// Support-weighted F1.
    pub f1_score: f64,
    /// Support-weighted precision.
    pub precision: f64,
    /// Support-weighted recall.
    pub recall: f64,
    /// Backend wall-clock time in seconds.
    pub processing_time: f64,
    #[serde(default)]
    pub class_wise: ClassReport,
}

/// One row of a classification report.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    /// Number of true samples; some backends send it as a float.
    pub support: f64,
}

/// Class-wise rows in the order the backend sent them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassReport {
    entries: Vec<(String, ClassMetrics)>,
}

impl ClassReport {
    pub fn get(&self, label: &str) -> Option<&ClassMetrics> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, metrics)| metrics)
    }

    /// Add a row; a repeated label keeps its first position and takes the new value.
    pub fn insert(&mut self, label: impl Into<String>, metrics: ClassMetrics) {
        let label = label.into();
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some(entry) => entry.1 = metrics,
            None => self.entries.push((label, metrics)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassMetrics)> {
        self.entries
            .iter()
            .map(|(label, metrics)| (label.as_str(), metrics))
    }
}

impl Serialize for ClassReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, metrics) in &self.entries {
            map.serialize_entry(label, metrics)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClassReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ClassReportVisitor)
    }
}

struct ClassReportVisitor;

impl<'de> Visitor<'de> for ClassReportVisitor {
    type Value = ClassReport;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of class labels to precision/recall/f1-score/support")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut report = ClassReport::default();
        while let Some(label) = access.next_key::<String>()? {
            if label == ACCURACY_KEY {
                access.next_value::<IgnoredAny>()?;
                continue;
            }
            let metrics = access.next_value::<ClassMetrics>()?;
            report.insert(label, metrics);
        }
        Ok(report)
    }
}

impl MetricsResult {
    pub fn macro_avg(&self) -> Option<&ClassMetrics> {
        self.class_wise.get(MACRO_AVG_KEY)
    }

    pub fn weighted_avg(&self) -> Option<&ClassMetrics> {
        self.class_wise.get(WEIGHTED_AVG_KEY)
    }

    /// Per-class entries without the reserved aggregate keys.
    ///
    /// Integer-like labels come first in numeric order; the rest keep the
    /// order they arrived in.
    pub fn classes(&self) -> Vec<(&str, &ClassMetrics)> {
        let mut rows: Vec<(&str, &ClassMetrics)> = self
            .class_wise
            .iter()
            .filter(|(label, _)| !is_reserved_key(label))
            .collect();
        rows.sort_by(|(a, _), (b, _)| compare_labels(a, b));
        rows
    }
}

pub fn is_reserved_key(label: &str) -> bool {
    RESERVED_CLASS_KEYS.contains(&label)
}

// Must stay a stable-sort key: non-integer labels compare equal.
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (index_like(a), index_like(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Canonical non-negative integers only ("7" yes, "07" and "-1" no).
fn index_like(label: &str) -> Option<u64> {
    if label.is_empty() || (label.len() > 1 && label.starts_with('0')) {
        return None;
    }
    if !label.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}
