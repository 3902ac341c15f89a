use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use housekeeping_advisor::{
    Result,
    analysis::{AnalysisResult, DetectedObject, Label},
    config::{Config, LogsConfig, ProviderMode, ServerConfig},
};
use serde_json::Value;
use tempfile::TempDir;
use tokio::fs;
use tower::ServiceExt; // for `oneshot`

/// base64 of the bytes `fake-jpeg-bytes`.
pub const SAMPLE_IMAGE_B64: &str = "ZmFrZS1qcGVnLWJ5dGVz";

/// Request body cap the services use unless configured otherwise.
pub fn default_body_limit() -> usize {
    ServerConfig::default().max_body_bytes
}

/// Valid base64 of roughly `decoded_len` bytes, as a phone photo would
/// arrive inside the JSON body.
pub fn large_image_b64(decoded_len: usize) -> String {
    "QUJD".repeat(decoded_len / 3)
}

/// Create a test configuration with both providers in mock mode
pub fn create_test_config() -> Config {
    let mut config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            ..ServerConfig::default()
        },
        ..Config::default()
    };
    config.vision.mode = ProviderMode::Mock;
    config.llm.mode = ProviderMode::Mock;
    config
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

pub fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        labels: vec![
            Label {
                description: "Houseplant".to_string(),
                score: 0.97,
            },
            Label {
                description: "Flowerpot".to_string(),
                score: 0.88,
            },
        ],
        objects: vec![DetectedObject {
            name: "Potted plant".to_string(),
            score: 0.94,
        }],
        text: "WATER ME".to_string(),
        properties: None,
    }
}

/// Response pieces returned by [`send`].
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Drive one request through `app`. A `None` body sends an empty request
/// body; the response body is parsed as JSON, or `Value::Null` when empty.
pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    send_with_headers(app, method, uri, body, &[]).await
}

pub async fn send_with_headers(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
