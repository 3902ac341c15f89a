use super::scenario::Scenario;
use crate::{Result, analysis::AnalysisResult};
use tracing::info;

pub const MAX_PROMPT_LABELS: usize = 10;
pub const MAX_PROMPT_OBJECTS: usize = 10;

const NONE: &str = "none";

const CLOSING_INSTRUCTIONS: &str = "\
Provide your advice in a friendly, conversational tone. Include:
1. A brief assessment of the current state
2. 3-5 specific, actionable recommendations
3. One quick tip or life hack relevant to the situation

Keep your response concise (250-350 words) and practical. Avoid jargon so a beginner can follow it.";

/// Build the generation prompt for a scenario given by name.
pub fn construct_prompt(
    scenario: &str,
    analysis: &AnalysisResult,
    context: Option<&str>,
) -> Result<String> {
    let scenario: Scenario = scenario.parse()?;
    let prompt = build_prompt(scenario, analysis, context);
    info!("Constructed prompt for scenario: {}", scenario);
    Ok(prompt)
}

pub fn build_prompt(scenario: Scenario, analysis: &AnalysisResult, context: Option<&str>) -> String {
    let labels = join_or_none(
        analysis
            .labels
            .iter()
            .take(MAX_PROMPT_LABELS)
            .map(|label| format!("{} ({:.2})", label.description, label.score)),
    );
    let objects = join_or_none(
        analysis
            .objects
            .iter()
            .take(MAX_PROMPT_OBJECTS)
            .map(|object| format!("{} ({:.2})", object.name, object.score)),
    );

    let mut lines = vec![
        scenario.preamble().to_string(),
        String::new(),
        "Image Analysis:".to_string(),
        format!("- Detected Labels: {}", labels),
        format!("- Detected Objects: {}", objects),
    ];

    if !analysis.text.trim().is_empty() {
        lines.push(format!("- Text Visible in Image: {}", analysis.text.trim()));
    }

    if let Some(properties) = &analysis.properties {
        lines.push(format!("- Environment Type: {}", properties.environment_type));
        lines.push(format!("- Cleanliness Level: {}", properties.cleanliness_level));
        lines.push(format!("- Organization Level: {}", properties.organization_level));
    }

    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Additional Context from User: {}", context));
    }

    lines.push(String::new());
    lines.push("Focus on:".to_string());
    lines.extend(
        scenario
            .focus_areas()
            .iter()
            .enumerate()
            .map(|(i, area)| format!("{}. {}", i + 1, area)),
    );

    lines.push(String::new());
    lines.push(CLOSING_INSTRUCTIONS.to_string());

    lines.join("\n")
}

fn join_or_none(items: impl Iterator<Item = String>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NONE.to_string()
    } else {
        joined
    }
}
