use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::hub::RoomHub;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    hub: Arc<RoomHub>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let hub = Arc::new(RoomHub::new(config.game_seed));
        Self { config, hub }
    }

    pub fn hub(&self) -> Arc<RoomHub> {
        self.hub.clone()
    }
}
