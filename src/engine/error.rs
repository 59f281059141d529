use thiserror::Error;

use crate::data::ImageError;

/// The one message the user sees, whatever went wrong.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze chart. Please try again with a clearer screenshot.";

/// Everything that can go wrong between a chart and a parsed result.
/// The variants exist for logs; users only ever see [`ANALYSIS_FAILED_MESSAGE`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no API key configured (set API_KEY)")]
    MissingApiKey,
    #[error("invalid chart image: {0}")]
    Image(#[from] ImageError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("provider returned no text")]
    EmptyResponse,
    #[error("response did not match the expected shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("analysis worker stopped: {0}")]
    Worker(String),
}

impl AnalysisError {
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}
