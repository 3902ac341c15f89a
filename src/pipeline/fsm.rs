use crate::{Error, Result, analysis::AnalysisResult};
use std::fmt;
use tracing::{debug, info, warn};

// Pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Validating,
    CallingAnalyzer,
    CallingGenerator,
    Done,
    Failed,
}

// Pipeline events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    RequestValidated,
    AnalysisReceived,
    AdviceReceived,
    ErrorOccurred,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Data gathered while a gateway request moves through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub request_id: String,
    pub analysis: Option<AnalysisResult>,
    pub advice: Option<String>,
    pub last_error: Option<String>,
}

impl PipelineContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }
}

pub struct PipelineStateMachine {
    state: PipelineState,
    pub context: PipelineContext,
}

impl PipelineStateMachine {
    pub fn new(request_id: impl Into<String>) -> Self {
        let context = PipelineContext::new(request_id);
        debug!(request_id = %context.request_id, "Creating pipeline FSM");
        Self {
            state: PipelineState::Validating,
            context,
        }
    }

    pub fn current_state(&self) -> PipelineState {
        self.state
    }

    pub fn transition(&mut self, event: PipelineEvent) -> Result<()> {
        use PipelineEvent::*;
        use PipelineState::*;

        let new_state = match (self.state, event) {
            (Validating, RequestValidated) => CallingAnalyzer,
            (CallingAnalyzer, AnalysisReceived) => CallingGenerator,
            (CallingGenerator, AdviceReceived) => Done,
            (Validating | CallingAnalyzer | CallingGenerator, ErrorOccurred) => Failed,
            _ => {
                warn!(
                    "Invalid pipeline transition from {} with event {}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: self.state.to_string(),
                    requested: event.to_string(),
                });
            }
        };

        info!(
            request_id = %self.context.request_id,
            "Pipeline state transition: {} -> {} (event: {})",
            self.state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    pub fn record_analysis(&mut self, analysis: AnalysisResult) -> Result<()> {
        self.transition(PipelineEvent::AnalysisReceived)?;
        self.context.analysis = Some(analysis);
        Ok(())
    }

    pub fn record_advice(&mut self, advice: String) -> Result<()> {
        self.transition(PipelineEvent::AdviceReceived)?;
        self.context.advice = Some(advice);
        Ok(())
    }

    /// Move to `Failed`, remembering the message. A machine that is already
    /// terminal keeps its state.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.context.last_error = Some(message.into());
        if !self.is_terminal() {
            // Every non-terminal state accepts ErrorOccurred.
            let _ = self.transition(PipelineEvent::ErrorOccurred);
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, PipelineState::Done | PipelineState::Failed)
    }

    pub fn take_advice(&mut self) -> Option<String> {
        self.context.advice.take()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.context.last_error.as_deref()
    }
}
