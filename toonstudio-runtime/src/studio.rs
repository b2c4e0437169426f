use crate::gateway::HttpStudioGateway;
use std::sync::Arc;
use toonstudio_core::config::ClientConfig;
use toonstudio_engine::studio::Studio;
use toonstudio_engine::traits::StudioGateway;

/// Build every workflow against the HTTP service described by `cfg`.
pub fn build_studio(cfg: &ClientConfig) -> anyhow::Result<Studio> {
    let gateway: Arc<dyn StudioGateway> = Arc::new(HttpStudioGateway::new(cfg)?);
    log::info!("using service at {}", cfg.api_base_url);
    Ok(Studio::new(gateway, cfg))
}
