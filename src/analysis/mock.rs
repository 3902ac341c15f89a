use super::types::{Annotations, DetectedObject, Label};

/// Fixed annotations for a generic kitchen interior, returned when no vision
/// provider is available.
pub fn mock_annotations() -> Annotations {
    let labels = [
        ("Kitchen", 0.95),
        ("Room", 0.92),
        ("Countertop", 0.88),
        ("Cabinetry", 0.85),
        ("Sink", 0.82),
        ("Appliance", 0.80),
        ("Clean", 0.75),
    ];
    let objects = [("Sink", 0.92), ("Refrigerator", 0.89), ("Oven", 0.85)];

    Annotations {
        labels: labels
            .into_iter()
            .map(|(description, score)| Label {
                description: description.to_string(),
                score,
            })
            .collect(),
        objects: objects
            .into_iter()
            .map(|(name, score)| DetectedObject {
                name: name.to_string(),
                score,
            })
            .collect(),
        text_blocks: vec!["Kitchen with modern appliances".to_string()],
    }
}
