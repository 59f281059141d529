use {
    crate::{
        domain::{AnalysisResult, AnalysisSettings, IndicatorAnalysis},
        engine::Completed,
        ui::{SentimentColor, UI_CONFIG, UI_TEXT, UiStyleExt},
        utils::{format_duration_ms, format_local_time},
    },
    eframe::egui::{Color32, RichText, Ui},
};

/// What the result column should show.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CardView<'a> {
    Loading,
    Populated(&'a AnalysisResult),
    Empty,
}

impl<'a> CardView<'a> {
    /// Loading wins over any stale result.
    pub(crate) fn from(result: Option<&'a AnalysisResult>, loading: bool) -> Self {
        match (loading, result) {
            (true, _) => Self::Loading,
            (false, Some(result)) => Self::Populated(result),
            (false, None) => Self::Empty,
        }
    }
}

pub(crate) fn render_analysis_card(
    ui: &mut Ui,
    view: CardView<'_>,
    settings: &AnalysisSettings,
    completed: Option<&Completed>,
) {
    match view {
        CardView::Empty => {}
        CardView::Loading => render_loading(ui),
        CardView::Populated(result) => render_result(ui, result, settings, completed),
    }
}

fn render_loading(ui: &mut Ui) {
    UI_CONFIG.card_frame().show(ui, |ui| {
        ui.set_min_height(320.0);
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.add_space(24.0);
            for line in &UI_TEXT.loading_lines {
                ui.label(
                    RichText::new(line)
                        .monospace()
                        .small()
                        .color(UI_CONFIG.colors.accent),
                );
            }
        });
    });
}

fn render_result(
    ui: &mut Ui,
    result: &AnalysisResult,
    settings: &AnalysisSettings,
    completed: Option<&Completed>,
) {
    let theme = result.signal.color();

    UI_CONFIG.card_frame().show(ui, |ui| {
        // Signal header
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(result.signal.to_string())
                    .size(36.0)
                    .strong()
                    .color(theme),
            );
            ui.horizontal(|ui| {
                ui.badge(
                    format!("{}: {}%", UI_TEXT.card_confidence, result.confidence),
                    theme,
                );
                ui.badge(
                    format!("{}: {}", UI_TEXT.card_target, result.predicted_candle_close),
                    result.predicted_candle_close.color(),
                );
            });
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.label_subheader(&UI_TEXT.card_confluence);
            ui.label_subdued(format!("{}/3", result.confluence()));
        });
        let labels = settings.indicator_labels();
        ui.columns(3, |cols| {
            for (col, ((_, reading), label)) in cols
                .iter_mut()
                .zip(result.indicator_rows().into_iter().zip(labels.iter()))
            {
                indicator_badge(col, label, reading);
            }
        });

        ui.add_space(8.0);
        UI_CONFIG.inset_frame().show(ui, |ui| {
            ui.columns(3, |cols| {
                ticket_cell(
                    &mut cols[0],
                    &UI_TEXT.card_entry,
                    &result.trade_setup.entry,
                    UI_CONFIG.colors.text_primary,
                );
                ticket_cell(
                    &mut cols[1],
                    &UI_TEXT.card_stop_loss,
                    &result.trade_setup.stop_loss,
                    UI_CONFIG.colors.bearish,
                );
                ticket_cell(
                    &mut cols[2],
                    &UI_TEXT.card_take_profit,
                    &result.trade_setup.take_profit,
                    UI_CONFIG.colors.bullish,
                );
            });
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.metric(
                &UI_TEXT.card_support,
                &result.key_levels.support,
                UI_CONFIG.colors.bullish,
            );
            ui.metric(
                &UI_TEXT.card_resistance,
                &result.key_levels.resistance,
                UI_CONFIG.colors.bearish,
            );
        });

        ui.add_space(8.0);
        ui.label_subheader(&UI_TEXT.card_reasoning);
        for reason in &result.reasoning {
            UI_CONFIG.inset_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("●").small().color(theme));
                    ui.label(
                        RichText::new(reason)
                            .small()
                            .color(UI_CONFIG.colors.text_primary),
                    );
                });
            });
        }

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            for pattern in &result.patterns_detected {
                ui.badge(pattern.to_uppercase(), UI_CONFIG.colors.neutral);
            }
        });
        ui.label_subdued(format!(
            "{}: {}",
            UI_TEXT.card_structure, result.market_structure
        ));

        if let Some(done) = completed {
            ui.label_subdued(format!(
                "{} {} ({})",
                UI_TEXT.card_completed,
                format_local_time(&done.finished_at),
                format_duration_ms(done.duration_ms)
            ));
        }
    });
}

fn indicator_badge(ui: &mut Ui, label: &str, reading: &IndicatorAnalysis) {
    let color = reading.sentiment.color();
    UI_CONFIG.badge_frame(color).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(label).small().strong().color(color));
            ui.label(RichText::new(&reading.status).color(color));
            ui.label(RichText::new(reading.sentiment.to_string()).small().color(color));
        });
    });
}

fn ticket_cell(ui: &mut Ui, label: &str, value: &str, color: Color32) {
    ui.vertical_centered(|ui| {
        ui.label_subdued(label);
        ui.label(RichText::new(value).monospace().strong().color(color));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::sample_result;

    #[test]
    fn loading_takes_precedence() {
        let result = sample_result();
        assert!(matches!(CardView::from(Some(&result), true), CardView::Loading));
        assert!(matches!(CardView::from(None, true), CardView::Loading));
    }

    #[test]
    fn result_is_populated_and_absence_is_empty() {
        let result = sample_result();
        assert!(matches!(
            CardView::from(Some(&result), false),
            CardView::Populated(r) if r == &result
        ));
        assert!(matches!(CardView::from(None, false), CardView::Empty));
    }
}
