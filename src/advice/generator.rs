use super::{prompt::build_prompt, scenario::Scenario};
use crate::{
    Error, Result,
    analysis::AnalysisResult,
    llm::{GenerationParams, TextCapability, TextGenerator},
};
use serde::Serialize;
use tracing::{error, info, warn};

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

pub const SAMPLING: GenerationParams = GenerationParams {
    temperature: TEMPERATURE,
    top_p: TOP_P,
    top_k: TOP_K,
    max_output_tokens: MAX_OUTPUT_TOKENS,
};

/// Returned whenever the text provider fails.
pub const DEFAULT_ADVICE: &str = "\
Sorry, we couldn't generate specific advice from the provided image.
Here are some general housekeeping tips instead:

1. Tidy up regularly: once a week, sort out items you rarely use and keep only what you need within easy reach.

2. Use zones: divide your space into zones and store related items together so you spend less time searching.

3. Label things: labels on storage boxes and containers show what's inside at a glance and make putting things away easy.

4. Follow the \"one in, one out\" rule: whenever you buy something new, let go of one old item so things don't pile up.

5. Try the 5-minute rule: tidying for just five minutes a day lightens the load of big cleanups and keeps your space in order.

If you'd like more specific advice, try uploading a different image.";

const KITCHEN_ADVICE: &str = "\
Based on the image of your kitchen, here are some practical housekeeping tips:

1. **Counter Organization**: Your countertops appear to have several appliances. Consider using a tiered shelf organizer to maximize vertical space and keep frequently used items accessible.

2. **Sink Area**: Keep a small dish brush and eco-friendly soap dispenser by the sink for quick cleanup after meal preparation. This prevents buildup of dishes and makes daily maintenance easier.

3. **Appliance Maintenance**: For stainless steel appliances, use a microfiber cloth with a drop of olive oil to remove fingerprints and add shine.

4. **Food Storage**: Implement a \"first in, first out\" system in your refrigerator and pantry to reduce food waste. Use clear containers to easily see what's inside.

Quick Tip: Place a bowl of water with lemon and vinegar in the microwave for 2 minutes to easily clean stuck-on food and eliminate odors naturally.";

const BATHROOM_ADVICE: &str = "\
Looking at your bathroom, here are some targeted housekeeping recommendations:

1. **Shower Maintenance**: To prevent mildew and soap scum, keep a squeegee in the shower and spend 30 seconds wiping down walls after each use.

2. **Towel Management**: Install additional hooks or a towel bar with more spacing to ensure proper drying and prevent musty odors.

3. **Counter Organization**: Use small baskets or trays to group similar toiletries together. This looks neater and makes cleaning the counter much easier.

4. **Ventilation**: Run your bathroom fan for 20-30 minutes after showering to reduce humidity and prevent mold growth.

Quick Tip: A shower curtain liner can be refreshed by washing it with two towels on a gentle cycle with vinegar added to the detergent.";

const BEDROOM_ADVICE: &str = "\
Based on your bedroom image, here are some practical housekeeping suggestions:

1. **Bedding Refresh**: Use hospital corners when making your bed for a neater appearance, and rotate your mattress every 3-6 months for even wear.

2. **Nightstand Organization**: Apply the \"one in, one out\" rule to your nightstand to prevent clutter. Keep only essentials within reach.

3. **Clothing Management**: Designate a \"landing spot\" like a decorative basket for clothes that have been worn but aren't ready for washing yet.

4. **Air Quality**: Dust your ceiling fan blades and air vents regularly. A pillowcase works perfectly for catching dust from fan blades.

Quick Tip: Place a few drops of lavender essential oil on a cotton ball and tuck it inside your pillowcase for a naturally fresh scent.";

const GENERAL_ADVICE: &str = "\
Based on the image of your home environment, here are some practical housekeeping recommendations:

1. **Surface Cleaning**: Keep a spray bottle with equal parts water and white vinegar plus a few drops of dish soap. This all-purpose cleaner works on most surfaces.

2. **Organization Strategy**: Follow the \"touch it once\" rule: when you pick something up, put it where it belongs immediately.

3. **Maintenance Schedule**: Create a rotating cleaning schedule that focuses on one area each day rather than cleaning everything at once.

4. **Decluttering Method**: Use the four-box method (keep, donate, trash, relocate). Set a timer for 15 minutes and sort quickly to avoid decision fatigue.

Quick Tip: Keep microfiber cloths in multiple rooms for quick cleanups. They trap dust better than paper towels and can be washed and reused many times.";

/// Result of one advice generation, in the shape the generator service
/// returns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub success: bool,
    pub advice: String,
    pub error: Option<String>,
}

impl GenerationOutcome {
    fn generated(advice: String) -> Self {
        Self {
            success: true,
            advice,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            advice: DEFAULT_ADVICE.to_string(),
            error: Some(error),
        }
    }
}

/// Canned advice used when no text provider is available. The analyzed
/// environment type picks the text; the scenario stands in only when the
/// analysis carries no scene properties.
pub fn canned_advice(scenario: Scenario, analysis: &AnalysisResult) -> &'static str {
    let room = match &analysis.properties {
        Some(properties) => properties.environment_type.to_lowercase(),
        None => scenario.as_str().to_string(),
    };

    match room.as_str() {
        "kitchen" => KITCHEN_ADVICE,
        "bathroom" => BATHROOM_ADVICE,
        "bedroom" => BEDROOM_ADVICE,
        _ => GENERAL_ADVICE,
    }
}

/// Ask the provider for advice with the fixed sampling parameters. Provider
/// failures turn into [`DEFAULT_ADVICE`] plus an error message; only a
/// missing credential escapes as an error.
pub async fn generate(provider: &dyn TextGenerator, prompt: &str) -> Result<GenerationOutcome> {
    let outcome = match provider.generate(prompt, &SAMPLING).await {
        Ok(advice) => {
            info!("Successfully generated advice");
            GenerationOutcome::generated(advice)
        }
        Err(e @ Error::Config(_)) => return Err(e),
        Err(Error::Provider(e)) if e.is_safety_block() => {
            warn!("Content blocked due to safety settings, returning default advice");
            GenerationOutcome::failed(format!("Content blocked due to safety settings: {}", e))
        }
        Err(e) => {
            error!("Error generating advice: {}", e);
            GenerationOutcome::failed(format!("Error generating advice: {}", e))
        }
    };

    Ok(outcome)
}

pub struct Generator {
    text: TextCapability,
}

impl Generator {
    pub fn new(text: TextCapability) -> Self {
        Self { text }
    }

    pub fn uses_canned_advice(&self) -> bool {
        !self.text.is_available()
    }

    pub async fn advise(
        &self,
        scenario: Scenario,
        analysis: &AnalysisResult,
        context: Option<&str>,
    ) -> Result<GenerationOutcome> {
        info!(
            "Processing request for scenario: {} ({})",
            scenario,
            analysis.summary()
        );

        match &self.text {
            TextCapability::Available(provider) => {
                let prompt = build_prompt(scenario, analysis, context);
                generate(provider.as_ref(), &prompt).await
            }
            TextCapability::Unavailable => {
                info!("Using canned advice (text provider unavailable)");
                Ok(GenerationOutcome::generated(
                    canned_advice(scenario, analysis).to_string(),
                ))
            }
        }
    }
}
