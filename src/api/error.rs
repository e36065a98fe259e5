//! HTTP error mapping.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::StorefrontError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error("Missing owner identity")]
    Unauthorized,

    #[error("{}", .0.body_text())]
    InvalidJson(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidJson(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Storefront(err) => match err {
                StorefrontError::AddressNotFound
                | StorefrontError::WishlistItemNotFound
                | StorefrontError::InventoryItemNotFound
                | StorefrontError::OrderNotFound => StatusCode::NOT_FOUND,
                StorefrontError::Validation(_) => StatusCode::BAD_REQUEST,
                StorefrontError::DuplicateWishlistItem => StatusCode::CONFLICT,
                StorefrontError::Database(_) | StorefrontError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Don't expose storage details to clients
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
