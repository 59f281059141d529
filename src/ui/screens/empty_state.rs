use {
    crate::ui::{UI_CONFIG, UI_TEXT, UiStyleExt},
    eframe::egui::{Color32, RichText, Ui},
};

const STEP_COLORS: [Color32; 3] = [
    Color32::from_rgb(192, 132, 252),
    Color32::from_rgb(96, 165, 250),
    Color32::from_rgb(52, 211, 153),
];

/// Three-step how-to shown while there is neither a result nor a request in flight.
pub(crate) fn render_empty_state(ui: &mut Ui) {
    ui.add_space(16.0);
    ui.columns(3, |cols| {
        for (i, (col, (title, body))) in cols
            .iter_mut()
            .zip(UI_TEXT.guide_steps.iter())
            .enumerate()
        {
            UI_CONFIG.card_frame().show(col, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("{}", i + 1))
                        .strong()
                        .size(18.0)
                        .color(STEP_COLORS[i]),
                );
                ui.label(
                    RichText::new(title)
                        .strong()
                        .color(UI_CONFIG.colors.text_primary),
                );
                ui.label_subdued(body);
            });
        }
    });
}
