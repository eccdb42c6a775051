//! Handlers for `/flags` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/flags` | Query: [`FlagQuery`] (`actor_id`, `resource_id`, `comment_id`, `status`) |
//! | `POST`   | `/flags` | Body: exactly one of `resource_id` / `comment_id`, plus `reason` |
//! | `GET`    | `/flags/:id` | |
//! | `DELETE` | `/flags/:id` | Moderators only |
//! | `POST`   | `/flags/:id/review` | Body: `{"decision":"reviewed"\|"rejected"}`; moderators only |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use lazydog_core::{
  Catalog,
  moderation::{Flag, FlagQuery, ReviewDecision},
  store::CatalogStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, principal::ActorId};

/// `GET /flags[?status=..&resource_id=..]`
pub async fn list<S>(
  State(catalog): State<Catalog<S>>,
  Query(query): Query<FlagQuery>,
) -> Result<Json<Vec<Flag>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_flags(query).await?))
}

#[derive(Debug, Deserialize)]
pub struct NewFlagBody {
  pub resource_id: Option<Uuid>,
  pub comment_id:  Option<Uuid>,
  #[serde(default)]
  pub reason:      String,
}

/// `POST /flags`: returns 201 + the pending flag.
pub async fn create<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Json(body): Json<NewFlagBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let flag = catalog
    .create_flag(actor_id, body.resource_id, body.comment_id, body.reason)
    .await?;
  Ok((StatusCode::CREATED, Json(flag)))
}

/// `GET /flags/:id`
pub async fn get_one<S>(
  State(catalog): State<Catalog<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Flag>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.get_flag(id).await?))
}

/// `DELETE /flags/:id`
pub async fn delete_one<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_flag(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  pub decision: ReviewDecision,
}

/// `POST /flags/:id/review`
pub async fn review<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(moderator_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<ReviewBody>,
) -> Result<Json<Flag>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.review_flag(id, moderator_id, body.decision).await?))
}
