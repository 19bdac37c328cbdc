use std::sync::Arc;

use innkeep_core::audit::InMemoryAuditSink;
use innkeep_core::config::AppConfig;
use tracing::info;

use crate::store::Store;

pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub audit: InMemoryAuditSink,
}

pub fn build_state(config: AppConfig) -> Arc<AppState> {
    info!(
        event_name = "system.bootstrap.state_built",
        bind_address = %config.server.bind_address,
        port = config.server.port,
        "application state assembled"
    );
    Arc::new(AppState { config, store: Store::new(), audit: InMemoryAuditSink::default() })
}
