use serde::{Deserialize, Serialize};

/// Minimum score a label or object must reach to be reported.
pub const MIN_CONFIDENCE_SCORE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub description: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub objects: Vec<DetectedObject>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<SceneProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneProperties {
    pub environment_type: String,
    pub cleanliness_level: String,
    pub organization_level: String,
}

/// Raw provider output before thresholding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub labels: Vec<Label>,
    pub objects: Vec<DetectedObject>,
    pub text_blocks: Vec<String>,
}

impl AnalysisResult {
    pub fn summary(&self) -> String {
        format!(
            "{} labels, {} objects, text length: {}",
            self.labels.len(),
            self.objects.len(),
            self.text.chars().count()
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
