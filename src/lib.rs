#![allow(clippy::collapsible_if)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze binary and tests)
pub use app::App;
pub use config::{PERSISTENCE, PROVIDER};
pub use data::{ChartImage, SettingsStore};
pub use domain::{AnalysisResult, AnalysisSettings};
pub use engine::{AnalysisError, AnalysisProvider, GeminiClient};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API key for the hosted model
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model id used for analysis
    #[arg(long, default_value = PROVIDER.model)]
    pub model: String,

    /// Chart image to load and analyze at start-up (native only)
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            api_key: None,
            model: PROVIDER.model.to_string(),
            image: None,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
