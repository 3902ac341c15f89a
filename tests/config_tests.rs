use housekeeping_advisor::{
    Error,
    config::{self, LlmProvider, ProviderMode, ServiceKind},
};
use pretty_assertions::assert_eq;

mod common;
use common::test_utils::{create_temp_dir, create_test_config_file};

#[tokio::test]
async fn test_load_gateway_config_file() {
    let dir = create_temp_dir();
    let path = create_test_config_file(
        &dir,
        r#"
service: gateway
server:
  host: "127.0.0.1"
  port: 8080
  max_body_bytes: 10485760
  logs:
    level: info
gateway:
  analyzer_url: "http://localhost:8081/process"
  generator_url: "http://localhost:8082/generate"
"#,
    )
    .await
    .unwrap();

    let config = config::load_from_file(&path).await.unwrap();

    assert_eq!(config.service, ServiceKind::Gateway);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.max_body_bytes, 10 * 1024 * 1024);
    assert_eq!(config.gateway.analyzer_url, "http://localhost:8081/process");
    assert_eq!(config.gateway.generator_url, "http://localhost:8082/generate");
    assert_eq!(config.gateway.analyzer_timeout_secs, 30);
    assert_eq!(config.gateway.generator_timeout_secs, 60);
}

#[tokio::test]
async fn test_load_provider_sections() {
    let dir = create_temp_dir();
    let path = create_test_config_file(
        &dir,
        r#"
service: image-processor
vision:
  mode: mock
  api_key_secret: "vision-key-prod"
llm:
  provider: openai
  base_url: "http://localhost:11434/v1"
  model: "llama3"
  timeout_secs: 30
"#,
    )
    .await
    .unwrap();

    let config = config::load_from_file(&path).await.unwrap();

    assert_eq!(config.service, ServiceKind::Analyzer);
    assert_eq!(config.vision.mode, ProviderMode::Mock);
    assert_eq!(config.vision.api_key_secret, "vision-key-prod");
    assert_eq!(config.vision.timeout_secs, 30);
    assert_eq!(config.llm.provider, LlmProvider::Openai);
    assert_eq!(config.llm.mode, ProviderMode::Live);
    assert_eq!(config.llm.model, "llama3");
    assert_eq!(config.llm.timeout_secs, 30);
}

#[tokio::test]
async fn test_empty_file_gives_defaults() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, "").await.unwrap();

    let config = config::load_from_file(&path).await.unwrap();

    assert_eq!(config.service, ServiceKind::Gateway);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 32 * 1024 * 1024);
    assert_eq!(config.llm.model, "gemini-1.5-flash");
    assert_eq!(config.llm.timeout_secs, 120);
}

#[tokio::test]
async fn test_invalid_yaml_is_error() {
    let dir = create_temp_dir();
    let path = create_test_config_file(&dir, "server: [unclosed")
        .await
        .unwrap();

    let err = config::load_from_file(&path).await.unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = create_temp_dir();
    let err = config::load_from_file(dir.path().join("absent.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
