use crate::conversion::ConversionWorkflow;
use crate::query::QueryWorkflow;
use crate::status::StatusProbe;
use crate::traits::StudioGateway;
use std::sync::Arc;
use toonstudio_core::config::ClientConfig;

/// Every workflow of the client, sharing one gateway.
///
/// Each component owns its own state; nothing here is shared besides the gateway.
pub struct Studio {
    pub forward: ConversionWorkflow,
    pub reverse: ConversionWorkflow,
    pub query: QueryWorkflow,
    pub status: StatusProbe,
}

impl Studio {
    pub fn new(gateway: Arc<dyn StudioGateway>, cfg: &ClientConfig) -> Self {
        Self {
            forward: ConversionWorkflow::forward(gateway.clone(), cfg),
            reverse: ConversionWorkflow::reverse(gateway.clone(), cfg),
            query: QueryWorkflow::new(gateway.clone(), cfg),
            status: StatusProbe::new(gateway),
        }
    }
}
