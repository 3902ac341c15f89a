use axum::{
    Router,
    http::{Method, StatusCode},
};
use housekeeping_advisor::{
    advice::{DEFAULT_ADVICE, Generator, SAMPLING},
    config::LlmConfig,
    error::ProviderError,
    llm::{GeminiClient, TextCapability},
    server::{generator_router, handlers::GeneratorState},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{
    mocks::MockTextGenerator,
    test_utils::{default_body_limit, send},
};

fn generator_app(text: TextCapability) -> Router {
    generator_router(
        GeneratorState {
            generator: Arc::new(Generator::new(text)),
        },
        default_body_limit(),
    )
}

fn advice_body(scenario: &str) -> String {
    json!({
        "scenario": scenario,
        "analysis_result": {
            "labels": [{"description": "Refrigerator", "score": 0.93}],
            "objects": [{"name": "Bottle", "score": 0.81}],
            "text": ""
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_generates_advice() {
    let provider = Arc::new(MockTextGenerator::with_response(
        "Keep dairy on the middle shelf.",
    ));
    let app = generator_app(TextCapability::Available(provider.clone()));

    let response = send(app, Method::POST, "/generate", Some(&advice_body("fridge"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "success": true,
            "advice": "Keep dairy on the middle shelf.",
            "error": null
        })
    );

    let prompts = provider.get_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("refrigerator organization"));
    assert!(prompts[0].contains("- Detected Labels: Refrigerator (0.93)"));
    assert!(prompts[0].contains("- Detected Objects: Bottle (0.81)"));
    assert_eq!(provider.params.lock().unwrap()[0], SAMPLING);
}

#[tokio::test]
async fn test_provider_failure_returns_default_advice_with_ok_status() {
    let provider = Arc::new(MockTextGenerator::with_error(ProviderError::Network(
        "connection reset".to_string(),
    )));
    let app = generator_app(TextCapability::Available(provider));

    let response = send(app, Method::POST, "/", Some(&advice_body("plant"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["advice"], DEFAULT_ADVICE);
    assert!(
        response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error generating advice: ")
    );
}

#[tokio::test]
async fn test_safety_block_is_reported() {
    let provider = Arc::new(MockTextGenerator::with_error(ProviderError::SafetyBlocked(
        "finish reason SAFETY".to_string(),
    )));
    let app = generator_app(TextCapability::Available(provider));

    let response = send(app, Method::POST, "/", Some(&advice_body("bedroom"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["advice"], DEFAULT_ADVICE);
    assert!(
        response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Content blocked due to safety settings: ")
    );
}

#[tokio::test]
async fn test_unavailable_provider_uses_canned_advice() {
    let app = generator_app(TextCapability::Unavailable);

    let response = send(app, Method::POST, "/", Some(&advice_body("kitchen"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(
        response.body["advice"]
            .as_str()
            .unwrap()
            .contains("image of your kitchen")
    );
}

#[tokio::test]
async fn test_canned_advice_uses_analyzed_environment() {
    let app = generator_app(TextCapability::Unavailable);
    let body = json!({
        "scenario": "plant",
        "analysis_result": {
            "labels": [{"description": "Kitchen", "score": 0.95}],
            "objects": [],
            "text": "",
            "properties": {
                "environment_type": "kitchen",
                "cleanliness_level": "clean",
                "organization_level": "organized"
            }
        }
    })
    .to_string();

    let response = send(app, Method::POST, "/generate", Some(&body)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(
        response.body["advice"]
            .as_str()
            .unwrap()
            .starts_with("Based on the image of your kitchen")
    );
}

#[tokio::test]
async fn test_validation_errors_have_null_advice() {
    let cases = [
        (None, "Request body is empty"),
        (
            Some(json!({"analysis_result": {}}).to_string()),
            "Missing 'scenario' field in request",
        ),
        (
            Some(json!({"scenario": "attic", "analysis_result": {}}).to_string()),
            "Invalid 'scenario' value. Must be one of: plant, closet, fridge, kitchen, bathroom, bedroom, other",
        ),
        (
            Some(json!({"scenario": "plant"}).to_string()),
            "Missing 'analysis_result' field in request",
        ),
    ];

    for (body, expected) in cases {
        let app = generator_app(TextCapability::Unavailable);
        let response = send(app, Method::POST, "/", body.as_deref()).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            json!({"success": false, "advice": null, "error": expected})
        );
    }
}

#[tokio::test]
async fn test_malformed_analysis_result_is_bad_request() {
    let app = generator_app(TextCapability::Unavailable);
    let body = json!({"scenario": "plant", "analysis_result": {"labels": "many"}}).to_string();

    let response = send(app, Method::POST, "/", Some(&body)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["advice"], DEFAULT_ADVICE);
    assert!(
        response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body: ")
    );
}

#[tokio::test]
async fn test_missing_credential_is_internal_error() {
    let client = GeminiClient::new(LlmConfig {
        api_key: None,
        api_key_secret: "advisor-integration-secret-never-set".to_string(),
        ..LlmConfig::default()
    })
    .unwrap();
    let app = generator_app(TextCapability::Available(Arc::new(client)));

    let response = send(app, Method::POST, "/", Some(&advice_body("closet"))).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({
            "success": false,
            "advice": DEFAULT_ADVICE,
            "error": "Internal server error"
        })
    );
}

#[tokio::test]
async fn test_get_is_rejected() {
    let app = generator_app(TextCapability::Unavailable);

    let response = send(app, Method::GET, "/generate", None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.body,
        json!({
            "success": false,
            "advice": null,
            "error": "Only POST requests are supported"
        })
    );
}
