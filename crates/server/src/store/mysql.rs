use async_trait::async_trait;
use sqlx::MySqlPool;

use stockroom_core::{Item, ItemId, NewItem, Page};

use super::{ItemStore, StoreError};

type ItemRow = (ItemId, String, String);

fn from_row((id, name, description): ItemRow) -> Item {
    Item {
        id,
        name,
        description,
    }
}

pub struct MySqlItemStore {
    pool: MySqlPool,
}

impl MySqlItemStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for MySqlItemStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create(&self, item: &NewItem) -> Result<Item, StoreError> {
        let result = sqlx::query("INSERT INTO items (name, description) VALUES (?, ?)")
            .bind(&item.name)
            .bind(&item.description)
            .execute(&self.pool)
            .await?;

        let raw_id = result.last_insert_id();
        let id = ItemId::try_from(raw_id).map_err(|_| StoreError::IdOutOfRange(raw_id))?;
        Ok(item.clone().into_item(id))
    }

    async fn list(&self, page: Page) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description FROM items ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_row))
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
