use crate::types::Result;
use crate::utils::config::LlmConfig;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
///
/// All providers implement this trait, allowing the generation layer to
/// swap providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate a completion that must be a single JSON object.
    ///
    /// Providers with a native JSON output mode enable it here; the
    /// default falls back to plain generation and relies on the prompt's
    /// JSON instructions.
    async fn generate_json(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
///
/// | Provider | JSON mode | Notes |
/// |----------|-----------|-------|
/// | OpenAI | native | Recommended for production |
/// | Ollama | prompt-enforced | Recommended for local |
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API provider (including Azure OpenAI and compatible APIs).
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider.
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Resolve the active provider from configuration.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        match config.provider.as_str() {
            "openai" => Ok(Provider::OpenAI {
                api_key: config.openai_api_key.clone().ok_or_else(|| {
                    crate::types::AppError::Configuration(
                        "OPENAI_API_KEY is required when LLM_PROVIDER=openai".to_string(),
                    )
                })?,
                api_base: config.openai_api_base.clone(),
                model: config.openai_model.clone(),
            }),
            "ollama" => Ok(Provider::Ollama {
                base_url: config.ollama_url.clone(),
                model: config.ollama_model.clone(),
            }),
            other => Err(crate::types::AppError::Configuration(format!(
                "Unknown LLM provider '{}' (expected 'openai' or 'ollama')",
                other
            ))),
        }
    }

    /// Create a client instance for this provider.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()).await?,
            )),
        }
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}
