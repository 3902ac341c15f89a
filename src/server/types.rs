use crate::{advice::Scenario, analysis::AnalysisResult};
use serde::{Deserialize, Serialize};

/// Gateway request body, read after validation.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub scenario: Scenario,
    pub image_data: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn advice(advice: String) -> Self {
        Self {
            success: true,
            advice: Some(advice),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            advice: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub image_data: String,
}

/// Analyzer response. `data` and `error` are always present, as `null` when
/// unused.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AnalysisResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn data(data: AnalysisResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub scenario: Scenario,
    pub analysis_result: AnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Generator response. `advice` and `error` are always present, as `null`
/// when unused.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AdviceResponse {
    pub fn error(advice: Option<&str>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            advice: advice.map(str::to_string),
            error: Some(error.into()),
        }
    }
}

impl From<crate::advice::GenerationOutcome> for AdviceResponse {
    fn from(outcome: crate::advice::GenerationOutcome) -> Self {
        Self {
            success: outcome.success,
            advice: Some(outcome.advice),
            error: outcome.error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
