//! REST handlers for the items API.

mod health;
mod items;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;
use axum::Json;

use stockroom_core::{ErrorDetail, MessageResponse, ITEM_NOT_FOUND};

pub use health::health;
pub use items::{create_item, delete_item, get_item, list_items};

pub(crate) type ApiError = (StatusCode, Json<ErrorDetail>);
pub(crate) type ApiResult<T> = Result<T, ApiError>;

fn error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorDetail {
            detail: detail.into(),
        }),
    )
}

pub(crate) fn not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, ITEM_NOT_FOUND)
}

pub(crate) fn unprocessable(e: impl std::fmt::Display) -> ApiError {
    error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

pub(crate) fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "request failed");
    error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Bienvenue dans l'API stockroom avec MySQL".to_string(),
    })
}
