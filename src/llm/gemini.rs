//! Gemini `generateContent` over REST.
//!
//! Safety blocks are read from the structured response (`finishReason` and
//! `promptFeedback.blockReason`) and surfaced as
//! [`ProviderError::SafetyBlocked`].

use super::{
    client::TextGenerator,
    types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationParams, Part},
};
use crate::{
    Result,
    config::{self, LlmConfig},
    error::ProviderError,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const SAFETY_FINISH_REASONS: [&str; 4] = ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

pub struct GeminiClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            crate::Error::config(format!("Invalid llm base_url '{}': {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            method
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let api_key =
            config::resolve_secret(self.config.api_key.as_deref(), &self.config.api_key_secret)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: params.into(),
        };

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Gemini API error {}: {}",
                status, error_text
            ))
            .into());
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("Failed to parse response: {}", e)))?;

        Ok(extract_text(api_response)?)
    }
}

fn extract_text(response: GenerateContentResponse) -> std::result::Result<String, ProviderError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(ProviderError::SafetyBlocked(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|r| SAFETY_FINISH_REASONS.contains(r))
    {
        return Err(ProviderError::SafetyBlocked(format!(
            "finish reason {}",
            reason
        )));
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(text)
}
