use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::DatabaseResult;

/// Build a pooled MongoDB client without contacting the server.
///
/// The driver connects on first use, so a database host that is down at
/// startup only fails the requests that need it. Each operation checks a
/// connection out of the pool and returns it when the operation completes.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_lazy};
///
/// let config = MongoConfig::from_host("localhost:27017");
/// let client = connect_lazy(&config).await?;
/// ```
pub async fn connect_lazy(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Configuring MongoDB client for {}", config.url);

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;
    Ok(client)
}
