use super::types::{Annotations, DetectedObject, Label};
use crate::{
    Result,
    config::{self, ProviderMode, VisionConfig},
    error::ProviderError,
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Run label detection, object localization and text detection on one image.
    async fn annotate(&self, image: &[u8]) -> Result<Annotations>;
}

/// Vision backend handed to the analyzer. `Unavailable` means the analyzer
/// answers with its fixed mock scene instead of calling out.
#[derive(Clone)]
pub enum VisionCapability {
    Available(Arc<dyn VisionProvider>),
    Unavailable,
}

impl VisionCapability {
    pub fn from_config(config: &VisionConfig) -> Self {
        if config.mode == ProviderMode::Mock {
            info!("Vision provider in mock mode, analyzer will return mock data");
            return Self::Unavailable;
        }

        match GoogleVisionClient::new(config.clone()) {
            Ok(client) => {
                info!("Initialized Vision API client for {}", config.base_url);
                Self::Available(Arc::new(client))
            }
            Err(e) => {
                warn!("Could not initialize Vision API client: {}", e);
                warn!("Using mock data for image analysis");
                Self::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Google Cloud Vision `images:annotate` over REST.
pub struct GoogleVisionClient {
    config: VisionConfig,
    client: reqwest::Client,
}

impl GoogleVisionClient {
    pub fn new(config: VisionConfig) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            crate::Error::config(format!("Invalid vision base_url '{}': {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn annotate_url(&self) -> String {
        format!("{}/images:annotate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl VisionProvider for GoogleVisionClient {
    async fn annotate(&self, image: &[u8]) -> Result<Annotations> {
        let api_key =
            config::resolve_secret(self.config.api_key.as_deref(), &self.config.api_key_secret)?;

        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: ["LABEL_DETECTION", "OBJECT_LOCALIZATION", "TEXT_DETECTION"]
                    .into_iter()
                    .map(|kind| Feature {
                        kind: kind.to_string(),
                    })
                    .collect(),
            }],
        };

        debug!(image_bytes = image.len(), "Sending request to Vision API");

        let mut builder = self
            .client
            .post(self.annotate_url())
            .query(&[("key", api_key.as_str())])
            .json(&request);

        if let Some(project) = &self.config.project_id {
            builder = builder.header("x-goog-user-project", project);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Vision API error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("Failed to parse response: {}", e)))?;

        let first = body
            .responses
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        if let Some(error) = first.error {
            return Err(ProviderError::Api(format!(
                "Vision API error {}: {}",
                error.code, error.message
            ))
            .into());
        }

        Ok(Annotations {
            labels: first
                .label_annotations
                .into_iter()
                .map(|l| Label {
                    description: l.description,
                    score: l.score,
                })
                .collect(),
            objects: first
                .localized_object_annotations
                .into_iter()
                .map(|o| DetectedObject {
                    name: o.name,
                    score: o.score,
                })
                .collect(),
            text_blocks: first
                .text_annotations
                .into_iter()
                .map(|t| t.description)
                .collect(),
        })
    }
}

// Vision API wire types

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct LocalizedObjectAnnotation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}
