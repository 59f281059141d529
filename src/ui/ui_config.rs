use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card: Color32,
    pub card_inset: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub bullish: Color32,
    pub bearish: Color32,
    pub neutral: Color32,
    pub text_primary: Color32,
    pub text_subdued: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub max_preview_height: f32,
    pub drop_zone_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(148, 163, 184),
        heading: Color32::WHITE,
        subsection_heading: Color32::from_rgb(100, 116, 139),
        central_panel: Color32::from_rgb(2, 6, 23),
        side_panel: Color32::from_rgb(15, 23, 42),
        card: Color32::from_rgb(15, 23, 42),
        card_inset: Color32::from_rgb(30, 41, 59),
        border: Color32::from_rgb(51, 65, 85),
        accent: Color32::from_rgb(59, 130, 246),
        bullish: Color32::from_rgb(52, 211, 153),
        bearish: Color32::from_rgb(251, 113, 133),
        neutral: Color32::from_rgb(148, 163, 184),
        text_primary: Color32::from_rgb(226, 232, 240),
        text_subdued: Color32::from_rgb(100, 116, 139),
    },
    max_preview_height: 500.0,
    drop_zone_height: 220.0,
};

impl UiConfig {
    /// Frame for the header bar
    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::new(1.0, self.colors.border),
            inner_margin: Margin::symmetric(16, 10),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(16),
            ..Default::default()
        }
    }

    /// Rounded bordered card used by the settings panel, uploader and result card
    pub fn card_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card,
            stroke: Stroke::new(1.0, self.colors.border),
            inner_margin: Margin::same(14),
            corner_radius: CornerRadius::same(10),
            ..Default::default()
        }
    }

    /// Darker inset block inside a card (trade ticket, reasoning rows)
    pub fn inset_frame(&self) -> Frame {
        Frame {
            fill: self.colors.card_inset,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            corner_radius: CornerRadius::same(6),
            ..Default::default()
        }
    }

    /// Tinted badge frame, e.g. indicator sentiment or the AUTO-SAVED tag
    pub fn badge_frame(&self, color: Color32) -> Frame {
        Frame {
            fill: color.gamma_multiply(0.12),
            stroke: Stroke::new(1.0, color.gamma_multiply(0.4)),
            inner_margin: Margin::symmetric(8, 4),
            corner_radius: CornerRadius::same(4),
            ..Default::default()
        }
    }
}
