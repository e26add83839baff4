//! # API Error Type
//!
//! What an HTTP client sees when a request fails.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────────────────────┬────────┬──────────────────────────────┐
//! │ Source                               │ Status │ {"error": ...}               │
//! ├──────────────────────────────────────┼────────┼──────────────────────────────┤
//! │ ValidationError (category_id)        │ 400    │ ID da categoria inválido     │
//! │ ValidationError (product id)         │ 400    │ ID do produto inválido       │
//! │ ValidationError (cursor/limit/...)   │ 400    │ field-specific message       │
//! │ CoreError::ProductNotFound           │ 404    │ Produto não encontrado       │
//! │ anything else                        │ 500    │ Erro interno do servidor     │
//! └──────────────────────────────────────┴────────┴──────────────────────────────┘
//! ```
//!
//! Internal detail is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use emporio_core::{CoreError, ValidationError};
use serde::{Deserialize, Serialize};
use std::any::Any;

pub const INVALID_CATEGORY_ID: &str = "ID da categoria inválido";
pub const INVALID_PRODUCT_ID: &str = "ID do produto inválido";
pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";
pub const INTERNAL_ERROR: &str = "Erro interno do servidor";

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: String,
}

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Detail goes to the log only.
    #[error("{}", INTERNAL_ERROR)]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn product_not_found() -> Self {
        ApiError::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = match err.field() {
            "category_id" => INVALID_CATEGORY_ID.to_string(),
            "product_id" => INVALID_PRODUCT_ID.to_string(),
            "cursor" => "Cursor inválido".to_string(),
            "limit" => format!(
                "O limite deve ser um número entre 1 e {}",
                emporio_core::MAX_PAGE_LIMIT
            ),
            "direction" => "Direção inválida: use 'next' ou 'prev'".to_string(),
            "min_price" => "Preço mínimo inválido".to_string(),
            "max_price" => "Preço máximo inválido".to_string(),
            "search" => format!(
                "O termo de busca deve ter no máximo {} caracteres",
                emporio_core::MAX_SEARCH_LENGTH
            ),
            _ => "Parâmetro inválido".to_string(),
        };
        tracing::debug!(error = %err, "Rejected request parameter");
        ApiError::BadRequest(message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => ApiError::product_not_found(),
            CoreError::Validation(err) => err.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "Request failed");
        }
        let body = ApiErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the generic 500 body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
