//! Item CRUD endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::info;

use stockroom_core::{deleted_message, Item, ItemId, MessageResponse, NewItem, Page};

use crate::state::AppState;

use super::{internal_error, not_found, unprocessable, ApiResult};

/// Create an item. Not idempotent: every call inserts a new row.
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(payload) = payload.map_err(|rejection| unprocessable(rejection.body_text()))?;
    payload.validate().map_err(unprocessable)?;
    let item = state.store.create(&payload).await.map_err(internal_error)?;
    info!(id = item.id, "item created");
    Ok(Json(item))
}

pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = state.store.list(page).await.map_err(internal_error)?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ItemId>,
) -> ApiResult<Json<Item>> {
    match state.store.get(id).await.map_err(internal_error)? {
        Some(item) => Ok(Json(item)),
        None => Err(not_found()),
    }
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ItemId>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.delete(id).await.map_err(internal_error)? {
        return Err(not_found());
    }
    info!(id, "item deleted");
    Ok(Json(MessageResponse {
        message: deleted_message(id),
    }))
}
