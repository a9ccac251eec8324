//! Database library providing MongoDB connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_lazy};
//!
//! let config = MongoConfig::from_host("localhost:27017");
//! let client = connect_lazy(&config).await?;
//! let db = client.database("mydb");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
