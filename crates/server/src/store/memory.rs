//! In-process `ItemStore` for handler tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use stockroom_core::{Item, ItemId, NewItem, Page};

use super::{ItemStore, StoreError};

#[derive(Default)]
pub struct MemoryItemStore {
    rows: Mutex<BTreeMap<ItemId, Item>>,
    next_id: Mutex<ItemId>,
    /// When set, every call fails the way an unreachable MySQL pool does.
    unavailable: AtomicBool,
    /// When set, `ping` never completes.
    hanging: AtomicBool,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.check_available()
    }

    async fn create(&self, item: &NewItem) -> Result<Item, StoreError> {
        self.check_available()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let stored = item.clone().into_item(id);
        self.rows.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn list(&self, page: Page) -> Result<Vec<Item>, StoreError> {
        self.check_available()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.check_available()?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}
