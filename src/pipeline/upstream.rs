//! HTTP clients the gateway uses to reach the analyzer and generator.
//!
//! Each call is a single attempt with a fixed timeout. Failures come back as
//! [`Error::Upstream`] carrying the message the gateway returns to its caller.

use crate::{
    Error, Result,
    advice::Scenario,
    analysis::AnalysisResult,
    config::GatewayConfig,
    server::types::{AdviceRequest, AdviceResponse, AnalyzeRequest, AnalyzeResponse},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, info};

const ANALYZER: &str = "analyzer";
const GENERATOR: &str = "generator";

#[async_trait]
pub trait AnalyzerApi: Send + Sync {
    async fn analyze(&self, image_data: &str) -> Result<AnalysisResult>;
}

#[async_trait]
pub trait GeneratorApi: Send + Sync {
    async fn advise(
        &self,
        scenario: Scenario,
        analysis: &AnalysisResult,
        context: Option<&str>,
    ) -> Result<String>;
}

struct Endpoint {
    url: String,
    client: reqwest::Client,
}

impl Endpoint {
    fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            url: url.trim().to_string(),
            client,
        })
    }

    fn url(&self, missing: &str) -> Result<&str> {
        if self.url.is_empty() {
            error!("{}", missing);
            return Err(Error::config(missing));
        }
        Ok(&self.url)
    }

    /// POST `body` and return the status and raw response text. Transport
    /// failures (including timeouts) are mapped by `on_network`.
    async fn post<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        on_network: impl Fn(reqwest::Error) -> Error,
    ) -> Result<(reqwest::StatusCode, String)> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(&on_network)?;

        let status = response.status();
        let text = response.text().await.map_err(&on_network)?;
        Ok((status, text))
    }
}

pub struct HttpAnalyzerClient {
    endpoint: Endpoint,
}

impl HttpAnalyzerClient {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            endpoint: Endpoint::new(url, timeout_secs)?,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Self::new(&config.analyzer_url, config.analyzer_timeout_secs)
    }
}

#[async_trait]
impl AnalyzerApi for HttpAnalyzerClient {
    async fn analyze(&self, image_data: &str) -> Result<AnalysisResult> {
        let url = self.endpoint.url("Image processor URL not configured")?;
        info!("Calling analyzer at {}", url);

        let request = AnalyzeRequest {
            image_data: image_data.to_string(),
        };
        let (status, body) = self
            .endpoint
            .post(url, &request, |e| {
                error!("Error calling analyzer: {}", e);
                Error::upstream(
                    ANALYZER,
                    format!("Error communicating with image processor: {}", e),
                )
            })
            .await?;

        let failed = |detail: &str| {
            error!("Analyzer returned error (status {}): {}", status, detail);
            Error::upstream(ANALYZER, format!("Image processor error: {}", detail))
        };

        if !status.is_success() {
            return Err(failed(&body));
        }

        let response: AnalyzeResponse = serde_json::from_str(&body)
            .map_err(|e| failed(&format!("invalid response body: {}", e)))?;

        if !response.success {
            return Err(failed(response.error.as_deref().unwrap_or("Unknown error")));
        }

        info!("Successfully received analysis result from analyzer");
        Ok(response.data.unwrap_or_default())
    }
}

pub struct HttpGeneratorClient {
    endpoint: Endpoint,
}

impl HttpGeneratorClient {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            endpoint: Endpoint::new(url, timeout_secs)?,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Self::new(&config.generator_url, config.generator_timeout_secs)
    }
}

#[async_trait]
impl GeneratorApi for HttpGeneratorClient {
    async fn advise(
        &self,
        scenario: Scenario,
        analysis: &AnalysisResult,
        context: Option<&str>,
    ) -> Result<String> {
        let url = self.endpoint.url("Message generator URL not configured")?;
        info!("Calling generator at {}", url);

        let request = AdviceRequest {
            scenario,
            analysis_result: analysis.clone(),
            context: context.map(str::to_string),
        };
        let (status, body) = self
            .endpoint
            .post(url, &request, |e| {
                error!("Error calling generator: {}", e);
                Error::upstream(
                    GENERATOR,
                    format!("Error communicating with message generator: {}", e),
                )
            })
            .await?;

        let failed = |detail: &str| {
            error!("Generator returned error (status {}): {}", status, detail);
            Error::upstream(GENERATOR, format!("Message generator error: {}", detail))
        };

        if !status.is_success() {
            return Err(failed(&body));
        }

        let response: AdviceResponse = serde_json::from_str(&body)
            .map_err(|e| failed(&format!("invalid response body: {}", e)))?;

        if !response.success {
            return Err(failed(response.error.as_deref().unwrap_or("Unknown error")));
        }

        info!("Successfully received advice from generator");
        Ok(response.advice.unwrap_or_default())
    }
}
