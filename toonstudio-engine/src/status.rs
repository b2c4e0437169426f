use crate::traits::StudioGateway;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use toonstudio_core::error::GatewayError;

/// Capability flags of the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Call tracing backend is connected.
    pub tracing_connected: bool,
    /// Answer generation model has credentials.
    pub llm_configured: bool,
    pub loading: bool,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            tracing_connected: false,
            llm_configured: false,
            loading: true,
        }
    }
}

/// Fire-once probe of the service status endpoint.
pub struct StatusProbe {
    gateway: Arc<dyn StudioGateway>,
    started: AtomicBool,
    state: watch::Sender<ServiceStatus>,
}

impl StatusProbe {
    pub fn new(gateway: Arc<dyn StudioGateway>) -> Self {
        let (state, _rx) = watch::channel(ServiceStatus::default());
        Self {
            gateway,
            started: AtomicBool::new(false),
            state,
        }
    }

    /// Probes once. Later calls return the current status without contacting the service.
    pub async fn run(&self) -> ServiceStatus {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.status();
        }

        match self.gateway.status().await {
            Ok(resp) => {
                log::debug!(
                    "service status: tracing={} llm={}",
                    resp.langsmith_connected,
                    resp.gemini_configured
                );
                self.state.send_replace(ServiceStatus {
                    tracing_connected: resp.langsmith_connected,
                    llm_configured: resp.gemini_configured,
                    loading: false,
                });
            }
            Err(e) => {
                log::warn!("status probe failed: {e}");
                self.state.send_modify(|s| s.loading = false);
            }
        }
        self.status()
    }

    /// Plain liveness call. Not tied to the probe state.
    pub async fn health(&self) -> Result<serde_json::Value, GatewayError> {
        self.gateway.health().await
    }

    pub fn status(&self) -> ServiceStatus {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ServiceStatus> {
        self.state.subscribe()
    }
}
