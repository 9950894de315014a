use super::{EguiApp, style};
use crate::report::{AverageSummary, ResultsView};
use eframe::egui::{self, RichText, Ui};

impl EguiApp {
    pub(super) fn render_results_panel(&mut self, ui: &mut Ui) {
        let Some(metrics) = self.controller.session().batch.metrics() else {
            return;
        };
        let view = ResultsView::from_metrics(metrics);
        let palette = style::palette();

        ui.heading("Model Performance Metrics");
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for card in &view.overall {
                style::metric_card_frame().show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(card.label).small().color(palette.text_muted));
                        ui.label(RichText::new(&card.value).size(22.0).color(palette.accent_ice));
                    });
                });
            }
        });

        if let Some(averages) = &view.averages {
            ui.add_space(10.0);
            ui.label(RichText::new("Average Metrics").strong());
            ui.columns(2, |columns| {
                render_average(&mut columns[0], "Macro Average", averages.macro_avg.as_ref());
                render_average(
                    &mut columns[1],
                    "Weighted Average",
                    averages.weighted_avg.as_ref(),
                );
            });
        }

        if !view.class_rows.is_empty() {
            ui.add_space(10.0);
            ui.label(RichText::new("Class-wise Metrics").strong());
            egui::Grid::new("class_wise_metrics")
                .striped(true)
                .num_columns(5)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    for header in ["Class", "Precision", "Recall", "F1-Score", "Support"] {
                        ui.label(RichText::new(header).color(palette.text_muted));
                    }
                    ui.end_row();
                    for row in &view.class_rows {
                        ui.label(&row.label);
                        ui.label(&row.precision);
                        ui.label(&row.recall);
                        ui.label(&row.f1_score);
                        ui.label(&row.support);
                        ui.end_row();
                    }
                });
        }

        ui.add_space(10.0);
        let mut download = false;
        ui.vertical_centered(|ui| {
            download = ui.button("Download Predictions CSV").clicked();
        });
        if download {
            self.controller.save_predictions_via_dialog();
        }
    }
}

fn render_average(ui: &mut Ui, title: &str, summary: Option<&AverageSummary>) {
    let Some(summary) = summary else {
        return;
    };
    ui.label(RichText::new(title).color(style::palette().accent_copper));
    ui.label(format!("Precision: {}", summary.precision));
    ui.label(format!("Recall: {}", summary.recall));
    ui.label(format!("F1-Score: {}", summary.f1_score));
}
