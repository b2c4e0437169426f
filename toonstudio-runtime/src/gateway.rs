use async_trait::async_trait;
use toonstudio_core::api::{
    CountRequest, CountResponse, JsonToToonRequest, JsonToToonResponse, QueryRequest,
    QueryResponse, StatusResponse, ToonToJsonRequest, ToonToJsonResponse,
};
use toonstudio_core::config::ClientConfig;
use toonstudio_core::error::GatewayError;
use toonstudio_engine::traits::StudioGateway;
use toonstudio_providers::request::HttpRequest;
use toonstudio_providers::runtime::{build_client, fetch_json};
use toonstudio_providers::studio_api;

/// `StudioGateway` over HTTP. Holds no per-call state, so one instance serves every workflow.
#[derive(Debug, Clone)]
pub struct HttpStudioGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStudioGateway {
    pub fn new(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let client = build_client(cfg.connect_timeout(), cfg.request_timeout())?;
        Ok(Self {
            base_url: cfg.api_base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: anyhow::Result<HttpRequest>,
    ) -> Result<T, GatewayError> {
        let req = req.map_err(|e| GatewayError::Transport(format!("{e:#}")))?;
        log::debug!("{} {}", req.method.as_str(), req.url);
        fetch_json(&self.client, &req).await
    }
}

#[async_trait]
impl StudioGateway for HttpStudioGateway {
    async fn status(&self) -> Result<StatusResponse, GatewayError> {
        self.send(Ok(studio_api::build_status_request(&self.base_url)))
            .await
    }

    async fn health(&self) -> Result<serde_json::Value, GatewayError> {
        self.send(Ok(studio_api::build_health_request(&self.base_url)))
            .await
    }

    async fn json_to_toon(
        &self,
        req: &JsonToToonRequest,
    ) -> Result<JsonToToonResponse, GatewayError> {
        self.send(studio_api::build_json_to_toon_request(&self.base_url, req))
            .await
    }

    async fn toon_to_json(
        &self,
        req: &ToonToJsonRequest,
    ) -> Result<ToonToJsonResponse, GatewayError> {
        self.send(studio_api::build_toon_to_json_request(&self.base_url, req))
            .await
    }

    async fn query(&self, req: &QueryRequest) -> Result<QueryResponse, GatewayError> {
        self.send(studio_api::build_query_request(&self.base_url, req))
            .await
    }

    async fn count_tokens(&self, req: &CountRequest) -> Result<CountResponse, GatewayError> {
        self.send(studio_api::build_count_request(&self.base_url, req))
            .await
    }
}
