use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Filter, FindOutcome, Item};

/// Persistence interface for the items of one domain.
///
/// Implementations own the connection policy. Every call is independent;
/// no state is shared between calls beyond the store itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `item` under `id`. The item's `Id` field is overwritten with `id`.
    async fn create(&self, id: &str, item: Item) -> StoreResult<()>;

    /// Fetch the item whose `Id` equals `id`. `Ok(None)` when absent.
    async fn get(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Replace the item whose `Id` equals `id`. Fails with
    /// [`StoreError::MissingId`](crate::StoreError::MissingId) when `id` is empty.
    async fn update(&self, id: &str, item: Item) -> StoreResult<()>;

    /// All items matching every pair in `filter`.
    async fn find(&self, filter: &Filter) -> StoreResult<FindOutcome>;

    /// Number of items matching `filter`.
    async fn count(&self, filter: &Filter) -> StoreResult<u64>;
}
