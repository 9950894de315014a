//! Turns a [`MetricsResult`] into display-ready strings.
//!
//! Both the desktop panels and the CLI render from [`ResultsView`], so the
//! formatting rules live in one place.

use std::fmt::Write as _;

use crate::metrics::{ClassMetrics, MetricsResult};

/// One headline number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

/// Precision/recall/F1 of an aggregate row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AverageSummary {
    pub precision: String,
    pub recall: String,
    pub f1_score: String,
}

/// Macro and weighted averages; at least one is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AveragesView {
    pub macro_avg: Option<AverageSummary>,
    pub weighted_avg: Option<AverageSummary>,
}

/// One row of the per-class table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRow {
    pub label: String,
    pub precision: String,
    pub recall: String,
    pub f1_score: String,
    pub support: String,
}

/// Everything the results panel shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsView {
    pub overall: Vec<MetricCard>,
    pub averages: Option<AveragesView>,
    pub class_rows: Vec<ClassRow>,
}

impl ResultsView {
    pub fn from_metrics(metrics: &MetricsResult) -> Self {
        let overall = vec![
            card("Accuracy", format_percent(metrics.accuracy)),
            card("F1-Score (Weighted)", format_percent(metrics.f1_score)),
            card("Precision (Weighted)", format_percent(metrics.precision)),
            card("Recall (Weighted)", format_percent(metrics.recall)),
            card("Processing Time", format_seconds(metrics.processing_time)),
        ];
        let macro_avg = metrics.macro_avg().map(average_summary);
        let weighted_avg = metrics.weighted_avg().map(average_summary);
        let averages = (macro_avg.is_some() || weighted_avg.is_some()).then_some(AveragesView {
            macro_avg,
            weighted_avg,
        });
        let class_rows = metrics
            .classes()
            .into_iter()
            .map(|(label, row)| ClassRow {
                label: label.to_string(),
                precision: format_percent(row.precision),
                recall: format_percent(row.recall),
                f1_score: format_percent(row.f1_score),
                support: format_support(row.support),
            })
            .collect();
        Self {
            overall,
            averages,
            class_rows,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::from("Model Performance Metrics\n");
        for metric in &self.overall {
            let _ = writeln!(out, "  {:<22}{}", format!("{}:", metric.label), metric.value);
        }
        if let Some(averages) = &self.averages {
            out.push_str("\nAverage Metrics\n");
            for (name, summary) in [
                ("Macro Average", &averages.macro_avg),
                ("Weighted Average", &averages.weighted_avg),
            ] {
                if let Some(summary) = summary {
                    let _ = writeln!(
                        out,
                        "  {name}: precision {}  recall {}  f1 {}",
                        summary.precision, summary.recall, summary.f1_score
                    );
                }
            }
        }
        if !self.class_rows.is_empty() {
            let width = self
                .class_rows
                .iter()
                .map(|row| row.label.chars().count())
                .max()
                .unwrap_or(0)
                .max("Class".len());
            out.push_str("\nClass-wise Metrics\n");
            let _ = writeln!(
                out,
                "  {:<width$}  {:>9}  {:>9}  {:>9}  {:>8}",
                "Class", "Precision", "Recall", "F1-Score", "Support"
            );
            for row in &self.class_rows {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {:>9}  {:>9}  {:>9}  {:>8}",
                    row.label, row.precision, row.recall, row.f1_score, row.support
                );
            }
        }
        out
    }
}

fn card(label: &'static str, value: String) -> MetricCard {
    MetricCard { label, value }
}

fn average_summary(row: &ClassMetrics) -> AverageSummary {
    AverageSummary {
        precision: format_percent(row.precision),
        recall: format_percent(row.recall),
        f1_score: format_percent(row.f1_score),
    }
}

/// `0.9123` → `"91.23%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// `12.345` → `"12.35s"`.
pub fn format_seconds(value: f64) -> String {
    format!("{value:.2}s")
}

/// Integral supports print without decimals; anything else is echoed.
pub fn format_support(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MetricsResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn renders_reference_example() {
        let metrics = parse(
            r#"{"accuracy":0.9123,"f1_score":0.88,"precision":0.9,"recall":0.85,
                "processing_time":12.345,
                "class_wise":{"0":{"precision":0.8,"recall":0.7,"f1-score":0.75,"support":100}}}"#,
        );
        let view = ResultsView::from_metrics(&metrics);
        let values: Vec<_> = view
            .overall
            .iter()
            .map(|card| (card.label, card.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Accuracy", "91.23%"),
                ("F1-Score (Weighted)", "88.00%"),
                ("Precision (Weighted)", "90.00%"),
                ("Recall (Weighted)", "85.00%"),
                ("Processing Time", "12.35s"),
            ]
        );
        assert!(view.averages.is_none());
        assert_eq!(
            view.class_rows,
            vec![ClassRow {
                label: "0".into(),
                precision: "80.00%".into(),
                recall: "70.00%".into(),
                f1_score: "75.00%".into(),
                support: "100".into(),
            }]
        );
    }

    #[test]
    fn reserved_keys_move_to_averages_section() {
        let metrics = parse(
            r#"{"accuracy":0.5,"f1_score":0.5,"precision":0.5,"recall":0.5,"processing_time":1,
                "class_wise":{
                    "0":{"precision":0.5,"recall":0.5,"f1-score":0.5,"support":4},
                    "1":{"precision":0.25,"recall":0.5,"f1-score":0.3333,"support":2},
                    "accuracy":0.5,
                    "macro avg":{"precision":0.375,"recall":0.5,"f1-score":0.41665,"support":6},
                    "weighted avg":{"precision":0.4167,"recall":0.5,"f1-score":0.4444,"support":6}
                }}"#,
        );
        let view = ResultsView::from_metrics(&metrics);
        let labels: Vec<_> = view.class_rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "1"]);
        let averages = view.averages.unwrap();
        assert_eq!(averages.macro_avg.unwrap().precision, "37.50%");
        assert_eq!(averages.weighted_avg.unwrap().recall, "50.00%");
    }

    #[test]
    fn only_weighted_average_still_renders_section() {
        let metrics = parse(
            r#"{"accuracy":1,"f1_score":1,"precision":1,"recall":1,"processing_time":0,
                "class_wise":{"weighted avg":{"precision":1,"recall":1,"f1-score":1,"support":3}}}"#,
        );
        let view = ResultsView::from_metrics(&metrics);
        let averages = view.averages.unwrap();
        assert!(averages.macro_avg.is_none());
        assert_eq!(averages.weighted_avg.unwrap().f1_score, "100.00%");
        assert!(view.class_rows.is_empty());
    }

    #[test]
    fn text_omits_empty_sections() {
        let metrics = parse(
            r#"{"accuracy":0.25,"f1_score":0.2,"precision":0.2,"recall":0.25,"processing_time":0.5}"#,
        );
        let text = ResultsView::from_metrics(&metrics).to_text();
        assert!(text.contains("Accuracy:"));
        assert!(text.contains("25.00%"));
        assert!(text.contains("0.50s"));
        assert!(!text.contains("Average Metrics"));
        assert!(!text.contains("Class-wise Metrics"));
    }

    #[test]
    fn support_formatting() {
        assert_eq!(format_support(100.0), "100");
        assert_eq!(format_support(12.5), "12.5");
    }
}
