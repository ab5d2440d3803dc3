use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::store::Store;

/// Shared handler state: the store behind a mutex (one logical writer at a
/// time, matching the single-document persistence model) plus the
/// immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config,
        }
    }
}
