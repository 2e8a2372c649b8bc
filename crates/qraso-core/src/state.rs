use std::sync::Arc;

use qraso_config::Config;
use tokio::sync::RwLock;

use crate::store::{ResultStore, SharedStore};

/// Session-wide state. The result store lives only as long as this does.
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: SharedStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            store: Arc::new(RwLock::new(ResultStore::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
