use serde::{Deserialize, Serialize};

use crate::error::StockroomError;

/// Column width of `items.name`.
pub const NAME_MAX_CHARS: usize = 100;
/// Column width of `items.description`.
pub const DESCRIPTION_MAX_CHARS: usize = 255;

pub type ItemId = i32;

/// A stored item, as returned by every read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

/// Create payload for `POST /items/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Check the payload fits the table columns. Lengths are counted in
    /// characters, matching MySQL `VARCHAR(n)` semantics.
    pub fn validate(&self) -> Result<(), StockroomError> {
        let name_len = self.name.chars().count();
        if name_len > NAME_MAX_CHARS {
            return Err(StockroomError::NameTooLong {
                max: NAME_MAX_CHARS,
                actual: name_len,
            });
        }
        let desc_len = self.description.chars().count();
        if desc_len > DESCRIPTION_MAX_CHARS {
            return Err(StockroomError::DescriptionTooLong {
                max: DESCRIPTION_MAX_CHARS,
                actual: desc_len,
            });
        }
        Ok(())
    }

    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Pagination for `GET /items/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub const DEFAULT_PAGE_LIMIT: u32 = 100;

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// `{"message": ...}` body used by the root and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{"detail": ...}` body used by every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub const ITEM_NOT_FOUND: &str = "Item non trouvé";

pub fn deleted_message(id: ItemId) -> String {
    format!("Item {} supprimé avec succès", id)
}
