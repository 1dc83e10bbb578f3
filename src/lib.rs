use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod errors;
pub mod flomo_client;
pub mod logging;
pub mod mcp;
pub mod stdio;

#[cfg(test)]
pub(crate) mod test_support;

use config::Config;
use flomo_client::{FlomoClient, NoteRelay};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Arc<dyn NoteRelay>,
}

impl AppState {
    pub fn new(config: Config, relay: Arc<dyn NoteRelay>) -> Self {
        Self {
            config: Arc::new(config),
            relay,
        }
    }

    pub fn from_config(config: Config) -> Self {
        let relay = Arc::new(FlomoClient::new(config.flomo_api_url.clone()));
        Self::new(config, relay)
    }
}
