use {
    crate::{
        domain::{CandleColor, Sentiment, Signal},
        ui::UI_CONFIG,
    },
    eframe::egui::{Color32, RichText, Ui},
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into())
        .small()
        .strong()
        .color(UI_CONFIG.colors.subsection_heading)
}

/// One of the three visual treatments shared by every sentiment-bearing badge.
pub trait SentimentColor {
    fn color(&self) -> Color32;
}

impl SentimentColor for Sentiment {
    fn color(&self) -> Color32 {
        match self {
            Self::Bullish => UI_CONFIG.colors.bullish,
            Self::Bearish => UI_CONFIG.colors.bearish,
            Self::Neutral => UI_CONFIG.colors.neutral,
        }
    }
}

impl SentimentColor for Signal {
    fn color(&self) -> Color32 {
        match self {
            Self::Buy => UI_CONFIG.colors.bullish,
            Self::Sell => UI_CONFIG.colors.bearish,
            Self::Neutral | Self::Wait => UI_CONFIG.colors.neutral,
        }
    }
}

impl SentimentColor for CandleColor {
    fn color(&self) -> Color32 {
        match self {
            Self::Green => UI_CONFIG.colors.bullish,
            Self::Red => UI_CONFIG.colors.bearish,
            Self::Doji => UI_CONFIG.colors.neutral,
        }
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    /// Small tinted pill.
    fn badge(&mut self, text: impl Into<String>, color: Color32);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .small()
                .color(UI_CONFIG.colors.text_subdued),
        );
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0; // Tight spacing
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn badge(&mut self, text: impl Into<String>, color: Color32) {
        UI_CONFIG.badge_frame(color).show(self, |ui| {
            ui.label(RichText::new(text).small().strong().color(color));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn sentiments_map_to_three_distinct_treatments() {
        let colors: Vec<Color32> = Sentiment::iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn only_buy_and_sell_get_directional_colors() {
        assert_eq!(Signal::Buy.color(), Sentiment::Bullish.color());
        assert_eq!(Signal::Sell.color(), Sentiment::Bearish.color());
        assert_eq!(Signal::Wait.color(), Sentiment::Neutral.color());
        assert_eq!(Signal::Neutral.color(), Sentiment::Neutral.color());
    }
}
