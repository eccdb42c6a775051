//! Handlers for `/ratings` and `/bookmarks` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/ratings` | Body: `{"resource_id":"...","score":4}` |
//! | `PATCH`  | `/ratings/:id` | Body: `{"score":5}`; rater only |
//! | `DELETE` | `/ratings/:id` | Rater only |
//! | `GET`    | `/bookmarks` | The acting actor's bookmarks, newest first |
//! | `POST`   | `/bookmarks` | Body: `{"resource_id":"..."}` |
//! | `DELETE` | `/bookmarks/:id` | Owner only |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lazydog_core::{
  Catalog,
  feedback::{Bookmark, Rating},
  store::CatalogStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, principal::ActorId};

// ─── Ratings ──────────────────────────────────────────────────────────────────

/// `score` is range-checked by the catalog, not at deserialisation.
#[derive(Debug, Deserialize)]
pub struct NewRatingBody {
  pub resource_id: Uuid,
  pub score:       i64,
}

#[derive(Debug, Deserialize)]
pub struct ScoreBody {
  pub score: i64,
}

/// `POST /ratings`: returns 201 + the rating.
pub async fn create_rating<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Json(body): Json<NewRatingBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let rating = catalog.create_rating(actor_id, body.resource_id, body.score).await?;
  Ok((StatusCode::CREATED, Json(rating)))
}

/// `PATCH /ratings/:id`
pub async fn update_rating<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<ScoreBody>,
) -> Result<Json<Rating>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.update_rating(id, actor_id, body.score).await?))
}

/// `DELETE /ratings/:id`
pub async fn delete_rating<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_rating(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Bookmarks ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BookmarkBody {
  pub resource_id: Uuid,
}

/// `GET /bookmarks`
pub async fn list_bookmarks<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
) -> Result<Json<Vec<Bookmark>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_bookmarks(actor_id).await?))
}

/// `POST /bookmarks`: returns 201 + the bookmark.
pub async fn create_bookmark<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Json(body): Json<BookmarkBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let bookmark = catalog.create_bookmark(actor_id, body.resource_id).await?;
  Ok((StatusCode::CREATED, Json(bookmark)))
}

/// `DELETE /bookmarks/:id`
pub async fn delete_bookmark<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_bookmark(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
