use {
    super::{
        error::AnalysisError,
        messages::{
            Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse,
            GenerationConfig, Part,
        },
        prompt::{build_instruction, response_schema},
    },
    crate::{
        config::PROVIDER,
        data::split_data_uri,
        domain::{AnalysisResult, AnalysisSettings},
    },
    async_trait::async_trait,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Anything that can turn a chart image into an [`AnalysisResult`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AnalysisProvider {
    /// One request, no retry. `image_data_uri` is a `data:image/...;base64,` URI.
    async fn analyze(
        &self,
        image_data_uri: &str,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError>;

    /// Short name of the model behind this provider, for display.
    fn model(&self) -> &str;
}

/// `generateContent` client for the hosted Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Blank keys count as missing; the request will fail with [`AnalysisError::MissingApiKey`].
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: PROVIDER.base_url.to_string(),
            model: PROVIDER.model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn request(
        &self,
        image_data_uri: &str,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;
        let body = build_request(image_data_uri, settings)?;

        #[cfg(debug_assertions)]
        if DF.log_prompt {
            log::info!("Instruction sent to {}:\n{}", self.model, build_instruction(settings));
        }

        let response = self
            .http
            .post(self.endpoint())
            .header(PROVIDER.api_key_header, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(AnalysisError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.text().ok_or(AnalysisError::EmptyResponse)?;

        #[cfg(debug_assertions)]
        if DF.log_raw_response {
            log::info!("Raw response text: {}", text);
        }

        parse_result_text(&text)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AnalysisProvider for GeminiClient {
    async fn analyze(
        &self,
        image_data_uri: &str,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.request(image_data_uri, settings).await.inspect_err(|e| {
            log::error!("Analysis Error: {}", e);
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Assemble the request body: the chart as an inline part, then the instruction.
pub fn build_request(
    image_data_uri: &str,
    settings: &AnalysisSettings,
) -> Result<GenerateContentRequest, AnalysisError> {
    let (mime, payload) = split_data_uri(image_data_uri)?;
    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: None,
            parts: vec![
                Part::inline_image(mime, payload),
                Part::text(build_instruction(settings)),
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: PROVIDER.generation.response_mime_type.to_string(),
            response_schema: response_schema(),
            temperature: PROVIDER.generation.temperature,
        },
    })
}

pub fn parse_result_text(text: &str) -> Result<AnalysisResult, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(serde_json::from_str(text.trim())?)
}
