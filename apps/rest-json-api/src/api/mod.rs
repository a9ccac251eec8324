//! API routes module
//!
//! Mounts every configured domain under `/<domain>`, plus readiness and
//! optional static content.

pub mod content;
pub mod domains;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub async fn routes(state: &AppState) -> eyre::Result<Router> {
    let mut router = Router::new().merge(health::router(state.clone()));

    for domain in &state.config.domains {
        router = router.nest(&format!("/{}", domain.name), domains::router(state, domain).await?);
    }

    if let Some(directory) = &state.config.content_directory {
        router = router.merge(content::router(directory));
    }

    Ok(router)
}
