use std::sync::Arc;

use verdant_ingest::Ingestor;

use crate::config::ServerConfig;

/// Shared handler state: the orchestrator plus server-level settings.
#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<Ingestor>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(ingestor: Arc<Ingestor>, config: ServerConfig) -> Self {
        Self {
            ingestor,
            config: Arc::new(config),
        }
    }
}
