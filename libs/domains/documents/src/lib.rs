//! Documents Domain
//!
//! Generic REST resources over schema-less JSON documents. Every configured
//! domain gets the same four operations, backed by one MongoDB collection
//! named after the domain and, optionally, an upstream that receives the
//! requests the domain does not handle itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, nested under /<domain>
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌─────────────┐
//! │ Dispatcher  │ ───► │    Proxy    │  ← Upstream for unhandled actions
//! └──────┬──────┘      └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Store     │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, ItemsHandle, bindings
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_documents::{
//!     handlers, MongoDocumentStore, ResourceDispatcher, StoreBinding,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//!
//! let store = MongoDocumentStore::new(StoreBinding::new("jobs", "localhost", "jobsdb"), client);
//! let dispatcher = ResourceDispatcher::new("jobs", store, "job");
//!
//! let app = axum::Router::new().nest("/jobs", handlers::router(dispatcher));
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod id;
pub mod models;
pub mod mongodb;
pub mod payload;
pub mod proxy;
pub mod request;
pub mod store;

// Re-export commonly used types
pub use dispatcher::{DEFAULT_CONTENT_TYPE, ResourceDispatcher};
pub use error::{DocumentError, DocumentResult, StoreError, StoreResult};
pub use id::UniqueIdGenerator;
pub use models::{
    Filter, FindOutcome, ID_FIELD, Item, ItemsHandle, ProxyBinding, StoreBinding, operator_field,
};
pub use self::mongodb::MongoDocumentStore;
pub use proxy::ProxyForwarder;
pub use request::ResourceRequest;
pub use store::DocumentStore;
