// Wire shapes of the conversion/analysis service.
//
// Field names follow the service's JSON exactly; domain-facing names live on the
// workflow outcome types in the engine.

use crate::types::{DataFormat, Delimiter, IndentSize};
use serde::{Deserialize, Serialize};

pub const PATH_STATUS: &str = "/api/status";
pub const PATH_HEALTH: &str = "/api/health";
pub const PATH_JSON_TO_TOON: &str = "/api/convert/json-to-toon";
pub const PATH_TOON_TO_JSON: &str = "/api/convert/toon-to-json";
pub const PATH_QUERY: &str = "/api/query";
pub const PATH_COUNT: &str = "/api/count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub langsmith_connected: bool,
    pub gemini_configured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonToToonRequest {
    pub json_input: String,
    pub indent: IndentSize,
    pub delimiter: Delimiter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonToToonResponse {
    pub output: String,
    pub json_data_tokens: u64,
    pub toon_data_tokens: u64,
    pub savings: i64,
    pub savings_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToonToJsonRequest {
    pub toon_input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToonToJsonResponse {
    pub output: String,
    pub json_data_tokens: u64,
    pub toon_data_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub data_text: String,
    pub question: String,
    pub data_format: DataFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PromptBreakdown {
    pub data_tokens: u64,
    pub question_tokens: u64,
    pub template_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub data_format: DataFormat,
    pub breakdown: PromptBreakdown,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_llm_tokens: u64,

    // Comparison figures the service attaches when it can convert the data both ways.
    #[serde(default)]
    pub json_data_tokens: Option<u64>,
    #[serde(default)]
    pub toon_data_tokens: Option<u64>,
    #[serde(default)]
    pub data_savings_tokens: Option<i64>,
    #[serde(default)]
    pub data_savings_percent: Option<f64>,
    #[serde(default)]
    pub conversion_status: Option<String>,
    #[serde(default)]
    pub exec_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Body shape of non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
