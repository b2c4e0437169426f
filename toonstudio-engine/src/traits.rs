use async_trait::async_trait;
use toonstudio_core::api::{
    CountRequest, CountResponse, JsonToToonRequest, JsonToToonResponse, QueryRequest,
    QueryResponse, StatusResponse, ToonToJsonRequest, ToonToJsonResponse,
};
use toonstudio_core::error::GatewayError;

/// Remote conversion/analysis service.
///
/// Implementations must be stateless and safe to call concurrently; every call is
/// issued exactly once (no retry, no caching).
#[async_trait]
pub trait StudioGateway: Send + Sync {
    async fn status(&self) -> Result<StatusResponse, GatewayError>;

    async fn health(&self) -> Result<serde_json::Value, GatewayError>;

    async fn json_to_toon(
        &self,
        req: &JsonToToonRequest,
    ) -> Result<JsonToToonResponse, GatewayError>;

    async fn toon_to_json(
        &self,
        req: &ToonToJsonRequest,
    ) -> Result<ToonToJsonResponse, GatewayError>;

    async fn query(&self, req: &QueryRequest) -> Result<QueryResponse, GatewayError>;

    async fn count_tokens(&self, req: &CountRequest) -> Result<CountResponse, GatewayError>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn set_text(&self, text: &str) -> anyhow::Result<()>;
}
