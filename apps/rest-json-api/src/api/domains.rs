//! Per-domain routes
//!
//! Wires one configured domain to its store, dispatcher and optional proxy.

use axum::Router;
use domain_documents::{
    MongoDocumentStore, ProxyForwarder, ResourceDispatcher, StoreBinding, handlers,
};
use tracing::{info, warn};

use crate::config::DomainConfig;
use crate::state::AppState;

/// Create the router for one domain
pub async fn router(state: &AppState, domain: &DomainConfig) -> eyre::Result<Router> {
    let client = state.client(&domain.db_host)?;
    let binding = StoreBinding::new(&domain.name, &domain.db_host, &domain.db_name);
    let store = MongoDocumentStore::new(binding, client);

    // The database may come up after us; requests will surface any error.
    if let Err(e) = store.init_indexes().await {
        warn!(domain = %domain.name, "Could not ensure indexes: {}", e);
    }

    let mut dispatcher = ResourceDispatcher::new(&domain.name, store, &domain.json_parameter)
        .with_content_type(domain.content_type.clone());

    if let Some(binding) = &domain.service_proxy {
        info!(domain = %domain.name, target = %binding.target(), "Relaying unhandled actions");
        dispatcher = dispatcher.with_proxy(ProxyForwarder::new(binding.clone())?);
    }

    info!(
        domain = %domain.name,
        database = %domain.db_name,
        "Serving /{}",
        domain.name
    );
    Ok(handlers::router(dispatcher))
}
