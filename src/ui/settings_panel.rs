use {
    crate::{
        config::INDICATOR_LIMITS,
        domain::AnalysisSettings,
        ui::{UI_CONFIG, UI_TEXT, UiStyleExt},
    },
    eframe::egui::{Align, DragValue, Grid, Layout, RichText, Slider, Ui},
};

/// Editable indicator parameters. Returns true when any value changed this frame,
/// so the caller can persist immediately.
pub(crate) fn render_settings_panel(ui: &mut Ui, settings: &mut AnalysisSettings) -> bool {
    let before = *settings;

    UI_CONFIG.card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(&UI_TEXT.settings_heading)
                    .strong()
                    .color(UI_CONFIG.colors.text_primary),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.badge(&UI_TEXT.settings_auto_saved, UI_CONFIG.colors.bullish)
            });
        });
        ui.separator();

        ui.columns(2, |cols| {
            render_rsi(&mut cols[0], settings);
            render_bollinger(&mut cols[1], settings);
        });

        ui.separator();
        render_ema(ui, settings);

        for hint in settings.ordering_hints() {
            ui.label(RichText::new(hint).small().color(UI_CONFIG.colors.bearish));
        }

        ui.add_space(4.0);
        ui.label(
            RichText::new(&UI_TEXT.settings_footnote)
                .small()
                .italics()
                .color(UI_CONFIG.colors.text_subdued),
        );
    });

    *settings != before
}

fn render_rsi(ui: &mut Ui, settings: &mut AnalysisSettings) {
    let rsi = &mut settings.rsi;
    ui.label_subheader(&UI_TEXT.rsi_heading);
    ui.label_subdued(&UI_TEXT.rsi_period);
    ui.add(Slider::new(&mut rsi.period, INDICATOR_LIMITS.rsi_period));

    Grid::new("rsi_thresholds").num_columns(2).show(ui, |ui| {
        ui.label_subdued(&UI_TEXT.rsi_overbought);
        ui.label_subdued(&UI_TEXT.rsi_oversold);
        ui.end_row();
        ui.add(DragValue::new(&mut rsi.overbought).range(INDICATOR_LIMITS.rsi_threshold));
        ui.add(DragValue::new(&mut rsi.oversold).range(INDICATOR_LIMITS.rsi_threshold));
        ui.end_row();
    });
}

fn render_bollinger(ui: &mut Ui, settings: &mut AnalysisSettings) {
    let bb = &mut settings.bollinger;
    ui.label_subheader(&UI_TEXT.bb_heading);
    ui.label_subdued(&UI_TEXT.bb_period);
    ui.add(Slider::new(&mut bb.period, INDICATOR_LIMITS.bollinger_period));
    ui.label_subdued(&UI_TEXT.bb_std_dev);
    ui.add(
        Slider::new(&mut bb.std_dev, INDICATOR_LIMITS.bollinger_std_dev)
            .step_by(INDICATOR_LIMITS.bollinger_std_dev_step)
            .fixed_decimals(1),
    );
}

fn render_ema(ui: &mut Ui, settings: &mut AnalysisSettings) {
    let ema = &mut settings.ema;
    ui.label_subheader(&UI_TEXT.ema_heading);
    ui.columns(2, |cols| {
        cols[0].label_subdued(&UI_TEXT.ema_fast);
        cols[0].add(Slider::new(&mut ema.period1, INDICATOR_LIMITS.ema_fast));
        cols[1].label_subdued(&UI_TEXT.ema_slow);
        cols[1].add(Slider::new(&mut ema.period2, INDICATOR_LIMITS.ema_slow));
    });
}
