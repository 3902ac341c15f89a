use super::types::{DetectedObject, Label, SceneProperties};

const UNKNOWN: &str = "unknown";

const ENVIRONMENT_LABELS: [&str; 5] = ["kitchen", "bathroom", "bedroom", "living room", "dining room"];

// Checked in this order; the first level with a matching label wins.
const CLEANLINESS_INDICATORS: [(&str, &[&str]); 3] = [
    ("clean", &["clean", "tidy", "organized", "neat", "spotless"]),
    ("moderate", &["lived in", "used", "normal"]),
    ("dirty", &["dirty", "messy", "cluttered", "disorganized", "stained"]),
];

/// Keyword and count lookups over the kept labels and objects. Not a
/// classifier.
pub fn derive_properties(labels: &[Label], objects: &[DetectedObject]) -> SceneProperties {
    SceneProperties {
        environment_type: environment_type(labels),
        cleanliness_level: cleanliness_level(labels),
        organization_level: organization_level(objects.len()).to_string(),
    }
}

fn environment_type(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| label.description.to_lowercase())
        .find(|description| ENVIRONMENT_LABELS.contains(&description.as_str()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn cleanliness_level(labels: &[Label]) -> String {
    let descriptions: Vec<String> = labels.iter().map(|l| l.description.to_lowercase()).collect();

    CLEANLINESS_INDICATORS
        .iter()
        .find(|(_, indicators)| {
            descriptions
                .iter()
                .any(|d| indicators.iter().any(|indicator| d.contains(indicator)))
        })
        .map(|(level, _)| level.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn organization_level(object_count: usize) -> &'static str {
    match object_count {
        n if n > 10 => "cluttered",
        n if n > 5 => "moderate",
        _ => "minimal",
    }
}
