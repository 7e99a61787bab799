//! Shared application state
//!
//! Handlers see the catalog and chat backends only through their traits,
//! so tests can swap in stubs without touching the router.

use std::sync::Arc;
use std::time::Instant;

use holonet_catalog::CatalogSource;
use holonet_llm::ChatProvider;

use crate::config::GatewayConfig;

/// State shared by all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream catalog backend.
    pub catalog: Arc<dyn CatalogSource>,

    /// Chat completion backend.
    pub chat: Arc<dyn ChatProvider>,

    /// Process configuration.
    pub config: Arc<GatewayConfig>,

    /// Process start time, reported by the readiness probe.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        chat: Arc<dyn ChatProvider>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            catalog,
            chat,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
