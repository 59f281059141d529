//! In-process providers for exercising the worker and app without a network.

use {
    super::{client::AnalysisProvider, error::AnalysisError},
    crate::domain::{AnalysisResult, AnalysisSettings, fixtures::sample_result},
    async_trait::async_trait,
};

pub(crate) struct FixedProvider {
    fail: bool,
}

impl FixedProvider {
    pub(crate) fn succeeding() -> Self {
        Self { fail: false }
    }

    pub(crate) fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl AnalysisProvider for FixedProvider {
    async fn analyze(
        &self,
        image_data_uri: &str,
        _settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError> {
        assert!(image_data_uri.starts_with("data:image/"));
        if self.fail {
            Err(AnalysisError::EmptyResponse)
        } else {
            Ok(sample_result())
        }
    }

    fn model(&self) -> &str {
        "fixed"
    }
}

/// Blows up mid-request, so the worker never reports back.
pub(crate) struct PanickingProvider;

#[async_trait]
impl AnalysisProvider for PanickingProvider {
    async fn analyze(
        &self,
        _image_data_uri: &str,
        _settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError> {
        panic!("provider crashed");
    }

    fn model(&self) -> &str {
        "panicking"
    }
}
