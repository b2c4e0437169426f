// Scripted in-memory gateway for workflow tests.
//
// Each endpoint has a queue of (delay, reply). A call pops the next entry, sleeps for the
// delay (use paused tokio time), then returns the reply. Every call is recorded.

use crate::traits::{Clipboard, StudioGateway};
use crate::util::lock;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use toonstudio_core::api::{
    CountRequest, CountResponse, JsonToToonRequest, JsonToToonResponse, PromptBreakdown,
    QueryRequest, QueryResponse, StatusResponse, ToonToJsonRequest, ToonToJsonResponse,
};
use toonstudio_core::error::GatewayError;
use toonstudio_core::types::DataFormat;

type Reply<T> = (Duration, Result<T, GatewayError>);

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Status,
    Health,
    JsonToToon(JsonToToonRequest),
    ToonToJson(ToonToJsonRequest),
    Query(QueryRequest),
    Count(String),
}

#[derive(Default)]
pub struct ScriptedGateway {
    calls: Mutex<Vec<RecordedCall>>,
    status: Mutex<VecDeque<Reply<StatusResponse>>>,
    json_to_toon: Mutex<VecDeque<Reply<JsonToToonResponse>>>,
    toon_to_json: Mutex<VecDeque<Reply<ToonToJsonResponse>>>,
    query: Mutex<VecDeque<Reply<QueryResponse>>>,
    count: Mutex<VecDeque<Reply<CountResponse>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn count_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Count(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn push_status(&self, delay: Duration, reply: Result<StatusResponse, GatewayError>) {
        lock(&self.status).push_back((delay, reply));
    }

    pub fn push_json_to_toon(
        &self,
        delay: Duration,
        reply: Result<JsonToToonResponse, GatewayError>,
    ) {
        lock(&self.json_to_toon).push_back((delay, reply));
    }

    pub fn push_toon_to_json(
        &self,
        delay: Duration,
        reply: Result<ToonToJsonResponse, GatewayError>,
    ) {
        lock(&self.toon_to_json).push_back((delay, reply));
    }

    pub fn push_query(&self, delay: Duration, reply: Result<QueryResponse, GatewayError>) {
        lock(&self.query).push_back((delay, reply));
    }

    pub fn push_count(&self, delay: Duration, reply: Result<CountResponse, GatewayError>) {
        lock(&self.count).push_back((delay, reply));
    }

    fn record(&self, call: RecordedCall) {
        lock(&self.calls).push(call);
    }
}

async fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Result<T, GatewayError> {
    let entry = lock(queue).pop_front();
    match entry {
        Some((delay, reply)) => {
            tokio::time::sleep(delay).await;
            reply
        }
        None => Err(GatewayError::Transport("no scripted reply".into())),
    }
}

#[async_trait]
impl StudioGateway for ScriptedGateway {
    async fn status(&self) -> Result<StatusResponse, GatewayError> {
        self.record(RecordedCall::Status);
        next(&self.status).await
    }

    async fn health(&self) -> Result<serde_json::Value, GatewayError> {
        self.record(RecordedCall::Health);
        Ok(serde_json::json!({"status": "healthy"}))
    }

    async fn json_to_toon(
        &self,
        req: &JsonToToonRequest,
    ) -> Result<JsonToToonResponse, GatewayError> {
        self.record(RecordedCall::JsonToToon(req.clone()));
        next(&self.json_to_toon).await
    }

    async fn toon_to_json(
        &self,
        req: &ToonToJsonRequest,
    ) -> Result<ToonToJsonResponse, GatewayError> {
        self.record(RecordedCall::ToonToJson(req.clone()));
        next(&self.toon_to_json).await
    }

    async fn query(&self, req: &QueryRequest) -> Result<QueryResponse, GatewayError> {
        self.record(RecordedCall::Query(req.clone()));
        next(&self.query).await
    }

    async fn count_tokens(&self, req: &CountRequest) -> Result<CountResponse, GatewayError> {
        self.record(RecordedCall::Count(req.text.clone()));
        next(&self.count).await
    }
}

pub fn toon_response(output: &str) -> JsonToToonResponse {
    JsonToToonResponse {
        output: output.into(),
        json_data_tokens: 20,
        toon_data_tokens: 12,
        savings: 8,
        savings_percent: 40.0,
    }
}

pub fn query_response(answer: &str) -> QueryResponse {
    QueryResponse {
        answer: answer.into(),
        data_format: DataFormat::Json,
        breakdown: PromptBreakdown {
            data_tokens: 40,
            question_tokens: 6,
            template_tokens: 90,
        },
        prompt_tokens: 136,
        completion_tokens: 4,
        total_llm_tokens: 140,
        json_data_tokens: None,
        toon_data_tokens: None,
        data_savings_tokens: None,
        data_savings_percent: None,
        conversion_status: None,
        exec_ms: None,
    }
}

pub fn http_error(status: u16, message: &str) -> GatewayError {
    GatewayError::Http {
        status,
        message: message.into(),
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub written: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn set_text(&self, text: &str) -> anyhow::Result<()> {
        lock(&self.written).push(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FailingClipboard;

#[async_trait]
impl Clipboard for FailingClipboard {
    async fn set_text(&self, _text: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("clipboard unavailable"))
    }
}
