mod generator;
mod prompt;
mod scenario;

pub use generator::{
    DEFAULT_ADVICE, GenerationOutcome, Generator, MAX_OUTPUT_TOKENS, SAMPLING, TEMPERATURE, TOP_K,
    TOP_P, canned_advice, generate,
};
pub use prompt::{MAX_PROMPT_LABELS, MAX_PROMPT_OBJECTS, build_prompt, construct_prompt};
pub use scenario::Scenario;
