mod analysis_card;
mod screens;
mod settings_panel;
mod styles;
mod ui_config;
mod ui_text;
mod uploader;

pub(crate) use analysis_card::{CardView, render_analysis_card};
pub(crate) use screens::render_empty_state;
pub(crate) use settings_panel::render_settings_panel;
pub(crate) use styles::{SentimentColor, UiStyleExt};
pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use uploader::{UploadEvent, Uploader};
