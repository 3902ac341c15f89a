use super::{
    fsm::{PipelineEvent, PipelineStateMachine},
    upstream::{AnalyzerApi, GeneratorApi},
};
use crate::{Error, Result, server::types::ChatRequest, server::validation::GATEWAY_RULES};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Drives one gateway request through analyzer and generator.
#[derive(Clone)]
pub struct Orchestrator {
    analyzer: Arc<dyn AnalyzerApi>,
    generator: Arc<dyn GeneratorApi>,
}

impl Orchestrator {
    pub fn new(analyzer: Arc<dyn AnalyzerApi>, generator: Arc<dyn GeneratorApi>) -> Self {
        Self {
            analyzer,
            generator,
        }
    }

    /// Returns the generated advice. Any error leaves the machine in `Failed`
    /// and is passed back to the caller for status mapping.
    pub async fn process(&self, request_id: &str, body: Option<&Value>) -> Result<String> {
        let mut fsm = PipelineStateMachine::new(request_id);

        match self.drive(&mut fsm, body).await {
            Ok(advice) => {
                info!(request_id, "Request processed successfully");
                Ok(advice)
            }
            Err(e) => {
                fsm.fail(e.to_string());
                error!(
                    request_id,
                    state = %fsm.current_state(),
                    upstream = e.upstream_service().unwrap_or("none"),
                    "Request failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    async fn drive(&self, fsm: &mut PipelineStateMachine, body: Option<&Value>) -> Result<String> {
        GATEWAY_RULES.validate(body)?;
        let request: ChatRequest = match body {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| Error::validation(format!("Invalid request body: {}", e)))?,
            None => return Err(Error::validation("Request body is empty")),
        };
        fsm.transition(PipelineEvent::RequestValidated)?;

        info!("Processing request for scenario: {}", request.scenario);

        let analysis = self.analyzer.analyze(&request.image_data).await?;
        fsm.record_analysis(analysis)?;

        let analysis = fsm
            .context
            .analysis
            .as_ref()
            .ok_or_else(|| Error::internal("analysis missing after AnalysisReceived"))?;
        let advice = self
            .generator
            .advise(request.scenario, analysis, request.context.as_deref())
            .await?;
        fsm.record_advice(advice)?;

        fsm.take_advice()
            .ok_or_else(|| Error::internal("advice missing after AdviceReceived"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{advice::Scenario, analysis::AnalysisResult};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    struct FixedAnalyzer(Option<String>, AtomicUsize);

    #[async_trait]
    impl AnalyzerApi for FixedAnalyzer {
        async fn analyze(&self, _image_data: &str) -> Result<AnalysisResult> {
            self.1.fetch_add(1, Ordering::SeqCst);
            match &self.0 {
                None => Ok(AnalysisResult::default()),
                Some(msg) => Err(Error::upstream("analyzer", msg.clone())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingGenerator(Mutex<Vec<(Scenario, Option<String>)>>);

    #[async_trait]
    impl GeneratorApi for RecordingGenerator {
        async fn advise(
            &self,
            scenario: Scenario,
            _analysis: &AnalysisResult,
            context: Option<&str>,
        ) -> Result<String> {
            self.0
                .lock()
                .unwrap()
                .push((scenario, context.map(str::to_string)));
            Ok(format!("advice for {}", scenario))
        }
    }

    #[tokio::test]
    async fn test_process_success_forwards_context() {
        let generator = Arc::new(RecordingGenerator::default());
        let orchestrator = Orchestrator::new(
            Arc::new(FixedAnalyzer(None, AtomicUsize::new(0))),
            generator.clone(),
        );

        let body = json!({"scenario": "closet", "image_data": "YQ==", "context": "small flat"});
        let advice = orchestrator.process("req", Some(&body)).await.unwrap();

        assert_eq!(advice, "advice for closet");
        assert_eq!(
            generator.0.lock().unwrap().as_slice(),
            &[(Scenario::Closet, Some("small flat".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_skips_upstreams() {
        let analyzer = Arc::new(FixedAnalyzer(None, AtomicUsize::new(0)));
        let orchestrator =
            Orchestrator::new(analyzer.clone(), Arc::new(RecordingGenerator::default()));

        let body = json!({"scenario": "plant"});
        let err = orchestrator.process("req", Some(&body)).await.unwrap_err();

        assert_eq!(err.to_string(), "Missing 'image_data' field in request");
        assert_eq!(analyzer.1.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyzer_failure_skips_generator() {
        let generator = Arc::new(RecordingGenerator::default());
        let orchestrator = Orchestrator::new(
            Arc::new(FixedAnalyzer(
                Some("Image processor error: boom".to_string()),
                AtomicUsize::new(0),
            )),
            generator.clone(),
        );

        let body = json!({"scenario": "fridge", "image_data": "YQ=="});
        let err = orchestrator.process("req", Some(&body)).await.unwrap_err();

        assert_eq!(err.to_string(), "Image processor error: boom");
        assert_eq!(err.upstream_service(), Some("analyzer"));
        assert!(generator.0.lock().unwrap().is_empty());
    }
}
