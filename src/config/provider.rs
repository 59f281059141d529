//! Hosted model endpoint configuration.

/// Generation parameters sent with every analysis request.
pub struct GenerationDefaults {
    /// Kept low so repeated runs on the same chart agree.
    pub temperature: f32,
    pub response_mime_type: &'static str,
}

pub struct ProviderConfig {
    pub base_url: &'static str,
    pub model: &'static str,
    /// Human readable badge shown in the header
    pub model_label: &'static str,
    pub api_key_header: &'static str,
    /// Environment variable holding the key (runtime natively, build time on wasm)
    pub api_key_env: &'static str,
    pub generation: GenerationDefaults,
}

pub const PROVIDER: ProviderConfig = ProviderConfig {
    base_url: "https://generativelanguage.googleapis.com",
    model: "gemini-2.5-flash",
    model_label: "GEMINI 2.5 FLASH",
    api_key_header: "x-goog-api-key",
    api_key_env: "API_KEY",
    generation: GenerationDefaults {
        temperature: 0.1,
        response_mime_type: "application/json",
    },
};

/// Badge text for an arbitrary model id, e.g. `gemini-2.5-pro` -> `GEMINI 2.5 PRO`.
pub fn model_badge(model: &str) -> String {
    if model == PROVIDER.model {
        return PROVIDER.model_label.to_string();
    }
    model.replace('-', " ").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_uses_configured_label() {
        assert_eq!(model_badge("gemini-2.5-flash"), "GEMINI 2.5 FLASH");
    }

    #[test]
    fn other_models_are_derived_from_the_id() {
        assert_eq!(model_badge("gemini-2.5-pro"), "GEMINI 2.5 PRO");
    }
}
