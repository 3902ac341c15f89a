mod analyzer;
mod mock;
mod scene;
mod types;
pub mod vision;

pub use analyzer::{Analyzer, decode_image, filter_annotations};
pub use mock::mock_annotations;
pub use scene::derive_properties;
pub use types::*;
pub use vision::{GoogleVisionClient, VisionCapability, VisionProvider};
