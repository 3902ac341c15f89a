use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceKind,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Which of the three services this process serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    #[default]
    #[serde(alias = "api-gateway")]
    Gateway,
    #[serde(alias = "image-processor")]
    Analyzer,
    #[serde(alias = "message-generator")]
    Generator,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Analyzer => "analyzer",
            Self::Generator => "generator",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gateway" | "api-gateway" => Ok(Self::Gateway),
            "analyzer" | "image-processor" => Ok(Self::Analyzer),
            "generator" | "message-generator" => Ok(Self::Generator),
            other => Err(crate::Error::config(format!("Unknown service role: '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest request body accepted, in bytes. Images travel base64-encoded
    /// inside the JSON body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Upstream locations the gateway forwards to. Empty means "not configured",
/// which only becomes an error when a request actually needs the upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub analyzer_url: String,
    #[serde(default)]
    pub generator_url: String,
    #[serde(default = "default_analyzer_timeout")]
    pub analyzer_timeout_secs: u64,
    #[serde(default = "default_generator_timeout")]
    pub generator_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderMode {
    #[default]
    Live,
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default)]
    pub mode: ProviderMode,
    #[serde(default = "default_vision_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_vision_secret")]
    pub api_key_secret: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_vision_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[default]
    Gemini,
    Openai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    #[serde(default)]
    pub mode: ProviderMode,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_secret")]
    pub api_key_secret: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            analyzer_url: String::new(),
            generator_url: String::new(),
            analyzer_timeout_secs: default_analyzer_timeout(),
            generator_timeout_secs: default_generator_timeout(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            mode: ProviderMode::default(),
            base_url: default_vision_base_url(),
            api_key: None,
            api_key_secret: default_vision_secret(),
            project_id: None,
            timeout_secs: default_vision_timeout(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            mode: ProviderMode::default(),
            base_url: default_llm_base_url(),
            api_key: None,
            api_key_secret: default_llm_secret(),
            model: default_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    32 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_analyzer_timeout() -> u64 {
    30
}

// Advice generation waits on the LLM, so it gets the longer budget.
fn default_generator_timeout() -> u64 {
    60
}

fn default_vision_base_url() -> String {
    "https://vision.googleapis.com/v1".to_string()
}

fn default_vision_secret() -> String {
    "vision-api-key".to_string()
}

fn default_vision_timeout() -> u64 {
    30
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_secret() -> String {
    "gemini-api-key".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}
