use async_trait::async_trait;
use housekeeping_advisor::{
    Error, Result,
    analysis::{Annotations, DetectedObject, Label, VisionProvider},
    error::ProviderError,
    llm::{GenerationParams, TextGenerator},
};
use std::sync::{Arc, Mutex};

/// Mock text provider for testing
#[derive(Debug, Default)]
pub struct MockTextGenerator {
    pub response: Option<String>,
    pub error: Option<ProviderError>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub params: Arc<Mutex<Vec<GenerationParams>>>,
}

impl MockTextGenerator {
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            ..Self::default()
        }
    }

    pub fn with_error(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.params.lock().unwrap().push(*params);

        if let Some(error) = &self.error {
            return Err(Error::Provider(error.clone()));
        }

        Ok(self
            .response
            .clone()
            .unwrap_or_else(|| "Mock advice".to_string()))
    }
}

/// Mock vision provider for testing
#[derive(Debug, Default)]
pub struct MockVisionProvider {
    pub annotations: Annotations,
    pub error: Option<ProviderError>,
    pub images: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockVisionProvider {
    pub fn with_annotations(annotations: Annotations) -> Self {
        Self {
            annotations,
            ..Self::default()
        }
    }

    pub fn with_error(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn get_images(&self) -> Vec<Vec<u8>> {
        self.images.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn annotate(&self, image: &[u8]) -> Result<Annotations> {
        self.images.lock().unwrap().push(image.to_vec());

        if let Some(error) = &self.error {
            return Err(Error::Provider(error.clone()));
        }

        Ok(self.annotations.clone())
    }
}

/// Annotations for a potted plant, with one label and one object under the
/// confidence threshold.
pub fn plant_annotations() -> Annotations {
    Annotations {
        labels: vec![
            Label {
                description: "Houseplant".to_string(),
                score: 0.9712,
            },
            Label {
                description: "Flowerpot".to_string(),
                score: 0.884,
            },
            Label {
                description: "Tidy".to_string(),
                score: 0.61,
            },
            Label {
                description: "Wood".to_string(),
                score: 0.42,
            },
        ],
        objects: vec![
            DetectedObject {
                name: "Potted plant".to_string(),
                score: 0.9351,
            },
            DetectedObject {
                name: "Cup".to_string(),
                score: 0.31,
            },
        ],
        text_blocks: vec!["WATER ME\nDAILY".to_string(), "WATER".to_string()],
    }
}
