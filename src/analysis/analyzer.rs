use super::{
    mock::mock_annotations,
    scene::derive_properties,
    types::{AnalysisResult, Annotations, DetectedObject, Label, MIN_CONFIDENCE_SCORE},
    vision::VisionCapability,
};
use crate::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{debug, info};

const DATA_URL_MARKER: &str = "base64,";

/// Decode a base64 image, accepting an optional `data:<mime>;base64,` prefix.
pub fn decode_image(image_data: &str) -> Result<Vec<u8>> {
    let payload = match image_data.split_once(DATA_URL_MARKER) {
        Some((_, rest)) => rest,
        None => image_data,
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

pub struct Analyzer {
    vision: VisionCapability,
}

impl Analyzer {
    pub fn new(vision: VisionCapability) -> Self {
        Self { vision }
    }

    pub fn uses_mock_data(&self) -> bool {
        !self.vision.is_available()
    }

    pub async fn analyze(&self, image: &[u8]) -> Result<AnalysisResult> {
        let annotations = match &self.vision {
            VisionCapability::Available(provider) => {
                debug!("Calling vision provider with {} bytes", image.len());
                provider.annotate(image).await?
            }
            VisionCapability::Unavailable => {
                info!("Using mock data for image analysis (vision provider unavailable)");
                mock_annotations()
            }
        };

        let result = filter_annotations(annotations);
        info!(
            "Image analysis complete. Found {} labels, {} objects, and {}",
            result.labels.len(),
            result.objects.len(),
            if result.text.is_empty() { "no text" } else { "text" }
        );

        Ok(result)
    }
}

/// Apply the confidence threshold and rounding, pick the first text block and
/// attach derived scene properties.
pub fn filter_annotations(annotations: Annotations) -> AnalysisResult {
    let labels: Vec<Label> = annotations
        .labels
        .into_iter()
        .filter(|label| label.score >= MIN_CONFIDENCE_SCORE)
        .map(|label| Label {
            score: round_score(label.score),
            ..label
        })
        .collect();

    let objects: Vec<DetectedObject> = annotations
        .objects
        .into_iter()
        .filter(|object| object.score >= MIN_CONFIDENCE_SCORE)
        .map(|object| DetectedObject {
            score: round_score(object.score),
            ..object
        })
        .collect();

    let text = annotations.text_blocks.into_iter().next().unwrap_or_default();
    let properties = derive_properties(&labels, &objects);

    AnalysisResult {
        labels,
        objects,
        text,
        properties: Some(properties),
    }
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
