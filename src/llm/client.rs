use super::{gemini::GeminiClient, types::GenerationParams};
use crate::{
    Result,
    config::{self, LlmConfig, LlmProvider, ProviderMode},
    error::ProviderError,
};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs, FinishReason,
    },
};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

/// Text backend handed to the generator. `Unavailable` switches the generator
/// to its canned advice.
#[derive(Clone)]
pub enum TextCapability {
    Available(Arc<dyn TextGenerator>),
    Unavailable,
}

impl TextCapability {
    pub fn from_config(config: &LlmConfig) -> Self {
        if config.mode == ProviderMode::Mock {
            info!("Text provider in mock mode, generator will return canned advice");
            return Self::Unavailable;
        }

        let client: Result<Arc<dyn TextGenerator>> = match config.provider {
            LlmProvider::Gemini => {
                GeminiClient::new(config.clone()).map(|c| Arc::new(c) as Arc<dyn TextGenerator>)
            }
            LlmProvider::Openai => {
                OpenAiClient::new(config.clone()).map(|c| Arc::new(c) as Arc<dyn TextGenerator>)
            }
        };

        match client {
            Ok(client) => {
                info!(
                    "Initialized {:?} text provider with model: {}",
                    config.provider, config.model
                );
                Self::Available(client)
            }
            Err(e) => {
                warn!("Could not initialize text provider: {}", e);
                warn!("Using canned advice for development");
                Self::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    fn client(&self, api_key: String) -> Client<OpenAIConfig> {
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if !self.config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(&self.config.base_url);
        }

        Client::with_config(openai_config).with_http_client(self.http.clone())
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let api_key =
            config::resolve_secret(self.config.api_key.as_deref(), &self.config.api_key_secret)?;

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Creating chat completion"
        );

        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Text(
                    prompt.to_string(),
                ))
                .build()?
                .into()];

        #[allow(deprecated)]
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .temperature(params.temperature)
            .top_p(params.top_p)
            .max_tokens(params.max_output_tokens)
            .build()?;

        let response = self
            .client(api_key)
            .chat()
            .create(request)
            .await
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        if matches!(choice.finish_reason, Some(FinishReason::ContentFilter)) {
            return Err(ProviderError::SafetyBlocked(
                "completion stopped by content filter".to_string(),
            )
            .into());
        }

        choice
            .message
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse.into())
    }
}
