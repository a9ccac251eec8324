//! Application state management.
//!
//! The state contains:
//! - Configuration
//! - One MongoDB client per distinct `dbHost`

use database::mongodb::{Client, MongoConfig, connect_lazy};
use std::collections::BTreeMap;
use tracing::info;

use crate::config::Config;

/// Shared application state.
///
/// Cloning is cheap: `Client` clones share the underlying connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from the config file
    pub config: Config,
    /// Pooled clients keyed by the `dbHost` value that produced them
    pub clients: BTreeMap<String, Client>,
}

impl AppState {
    /// Build a client for every distinct database host. Connections are
    /// opened on first use, so an unreachable host does not block startup.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let mut clients = BTreeMap::new();

        for domain in &config.domains {
            if clients.contains_key(&domain.db_host) {
                continue;
            }

            let mongo = MongoConfig::from_host(&domain.db_host).with_app_name(config.app.name);
            let client = connect_lazy(&mongo).await?;
            clients.insert(domain.db_host.clone(), client);
        }

        info!("{} MongoDB host(s) configured", clients.len());
        Ok(Self { config, clients })
    }

    /// Client for a configured host.
    pub fn client(&self, db_host: &str) -> eyre::Result<Client> {
        self.clients
            .get(db_host)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no MongoDB client configured for {}", db_host))
    }
}
