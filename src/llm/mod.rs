mod client;
mod gemini;
mod types;

pub use client::{OpenAiClient, TextCapability, TextGenerator};
pub use gemini::GeminiClient;
pub use types::GenerationParams;
