//! Item storage behind the REST handlers.
//!
//! The handlers only see [`ItemStore`]; the MySQL implementation lives in
//! `store/mysql.rs`. Each call acquires its own pooled connection and
//! releases it when done.

mod mysql;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{Item, ItemId, NewItem, Page};

pub use mysql::MySqlItemStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("generated id {0} does not fit the items.id column")]
    IdOutOfRange(u64),
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// One-shot liveness check of the backing database.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn create(&self, item: &NewItem) -> Result<Item, StoreError>;

    /// Items ordered by id, paginated.
    async fn list(&self, page: Page) -> Result<Vec<Item>, StoreError>;

    async fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Returns `false` when no row had that id.
    async fn delete(&self, id: ItemId) -> Result<bool, StoreError>;
}
