use super::{
    types::{
        AdviceRequest, AdviceResponse, AnalyzeRequest, AnalyzeResponse, ChatResponse,
        HealthResponse,
    },
    validation::{ANALYZER_RULES, GENERATOR_RULES},
};
use crate::{
    Error, Result,
    advice::{DEFAULT_ADVICE, Generator},
    analysis::{AnalysisResult, Analyzer, decode_image},
    config::ServiceKind,
    pipeline::Orchestrator,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

const ONLY_POST: &str = "Only POST requests are supported";
const ANALYSIS_FAILED: &str = "Image analysis failed";

#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Orchestrator,
}

#[derive(Clone)]
pub struct AnalyzerState {
    pub analyzer: Arc<Analyzer>,
}

#[derive(Clone)]
pub struct GeneratorState {
    pub generator: Arc<Generator>,
}

/// Parsed JSON body, or `None` when the body is empty or not JSON.
fn parse_body(body: &Bytes) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

fn read_request<T: DeserializeOwned>(body: Option<&Value>) -> Result<T> {
    let value = body.ok_or_else(|| Error::validation("Request body is empty"))?;
    serde_json::from_value(value.clone())
        .map_err(|e| Error::validation(format!("Invalid request body: {}", e)))
}

pub async fn chat(
    State(state): State<GatewayState>,
    body: Bytes,
) -> (StatusCode, Json<ChatResponse>) {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("chat", %request_id);

    async move {
        info!("Received chat request");
        let body = parse_body(&body);

        match state.orchestrator.process(&request_id, body.as_ref()).await {
            Ok(advice) => (StatusCode::OK, Json(ChatResponse::advice(advice))),
            Err(e) => (e.status_code(), Json(ChatResponse::error(e.public_message()))),
        }
    }
    .instrument(span)
    .await
}

pub async fn preflight() -> StatusCode {
    info!("Handling OPTIONS request (CORS preflight)");
    StatusCode::NO_CONTENT
}

pub async fn gateway_method_not_allowed(method: Method) -> (StatusCode, Json<ChatResponse>) {
    error!("Invalid request method: {}", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ChatResponse::error(ONLY_POST)),
    )
}

pub async fn analyze(
    State(state): State<AnalyzerState>,
    body: Bytes,
) -> (StatusCode, Json<AnalyzeResponse>) {
    info!("Analyzer invoked");
    let body = parse_body(&body);

    match run_analysis(&state.analyzer, body.as_ref()).await {
        Ok(result) => {
            info!("Image analysis completed: {}", result.summary());
            (StatusCode::OK, Json(AnalyzeResponse::data(result)))
        }
        Err(e) if e.status_code() == StatusCode::BAD_REQUEST => {
            error!("Invalid request: {}", e);
            (StatusCode::BAD_REQUEST, Json(AnalyzeResponse::error(e.to_string())))
        }
        Err(e) => {
            error!("Image analysis failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalyzeResponse::error(ANALYSIS_FAILED)),
            )
        }
    }
}

async fn run_analysis(analyzer: &Analyzer, body: Option<&Value>) -> Result<AnalysisResult> {
    ANALYZER_RULES.validate(body)?;
    let request: AnalyzeRequest = read_request(body)?;
    let image = decode_image(&request.image_data)?;
    analyzer.analyze(&image).await
}

pub async fn analyzer_method_not_allowed(method: Method) -> (StatusCode, Json<AnalyzeResponse>) {
    error!("Invalid request method: {}", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(AnalyzeResponse::error(ONLY_POST)),
    )
}

pub async fn generate(
    State(state): State<GeneratorState>,
    body: Bytes,
) -> (StatusCode, Json<AdviceResponse>) {
    info!("Generator invoked");
    let body = parse_body(&body);

    if let Err(e) = GENERATOR_RULES.validate(body.as_ref()) {
        error!("Invalid request: {}", e);
        return (
            StatusCode::BAD_REQUEST,
            Json(AdviceResponse::error(None, e.to_string())),
        );
    }

    let request: AdviceRequest = match read_request(body.as_ref()) {
        Ok(request) => request,
        Err(e) => {
            error!("Validation error: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(AdviceResponse::error(Some(DEFAULT_ADVICE), e.to_string())),
            );
        }
    };

    match state
        .generator
        .advise(
            request.scenario,
            &request.analysis_result,
            request.context.as_deref(),
        )
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome.into())),
        Err(e) => {
            error!("Unexpected error: {}", e);
            (
                e.status_code(),
                Json(AdviceResponse::error(
                    Some(DEFAULT_ADVICE),
                    e.public_message(),
                )),
            )
        }
    }
}

pub async fn generator_method_not_allowed(method: Method) -> (StatusCode, Json<AdviceResponse>) {
    error!("Invalid request method: {}", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(AdviceResponse::error(None, ONLY_POST)),
    )
}

pub async fn health(service: ServiceKind) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: service.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
