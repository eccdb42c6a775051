//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lazydog_core::Error as CatalogError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The acting actor could not be determined from the request.
  #[error("unauthenticated: {0}")]
  Unauthenticated(&'static str),

  #[error(transparent)]
  Catalog(#[from] CatalogError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, (*m).to_owned()),
      ApiError::Catalog(err) => {
        let status = match err {
          CatalogError::Invalid(_) => StatusCode::BAD_REQUEST,
          CatalogError::Forbidden(_) => StatusCode::FORBIDDEN,
          CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
          CatalogError::Conflict(_) => StatusCode::CONFLICT,
          CatalogError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            StatusCode::INTERNAL_SERVER_ERROR
          }
        };
        (status, err.message())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
