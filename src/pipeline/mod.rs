pub mod fsm;
mod orchestrator;
mod upstream;

pub use fsm::{PipelineContext, PipelineEvent, PipelineState, PipelineStateMachine};
pub use orchestrator::Orchestrator;
pub use upstream::{AnalyzerApi, GeneratorApi, HttpAnalyzerClient, HttpGeneratorClient};
