//! Handlers for `/actors` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/actors` | Body: `{"username":"...","is_moderator":false}` |
//! | `GET`    | `/actors/:id` | 404 if not found |
//! | `DELETE` | `/actors/:id` | Self, or a moderator; cascades |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lazydog_core::{Catalog, actor::Actor, store::CatalogStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, principal::ActorId};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub username:     String,
  #[serde(default)]
  pub is_moderator: bool,
}

/// `POST /actors`: returns 201 + the new actor.
pub async fn register<S>(
  State(catalog): State<Catalog<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let actor = catalog.register_actor(body.username, body.is_moderator).await?;
  Ok((StatusCode::CREATED, Json(actor)))
}

/// `GET /actors/:id`
pub async fn get_one<S>(
  State(catalog): State<Catalog<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Actor>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.get_actor(id).await?))
}

/// `DELETE /actors/:id`
pub async fn delete_one<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(requester): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_actor(id, requester).await?;
  Ok(StatusCode::NO_CONTENT)
}
