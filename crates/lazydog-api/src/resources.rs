//! Handlers for `/resources` and `/comments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/resources` | Optional `owner_id`, `category_id`, `tag_id`, `limit`, `offset` |
//! | `POST`   | `/resources` | Body: [`NewResource`]; returns 201 |
//! | `GET`    | `/resources/:id` | |
//! | `PATCH`  | `/resources/:id` | Body: [`ResourceUpdate`]; owner only |
//! | `DELETE` | `/resources/:id` | Owner only; cascades |
//! | `PUT`    | `/resources/:id/tags` | Body: `{"tag_ids":[...]}` |
//! | `GET`    | `/resources/:id/comments` | Oldest first |
//! | `POST`   | `/resources/:id/comments` | Body: `{"content":"..."}` |
//! | `GET`    | `/resources/:id/ratings` | Newest first |
//! | `PATCH`  | `/comments/:id` | Author only |
//! | `DELETE` | `/comments/:id` | Author only |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use lazydog_core::{
  Catalog,
  feedback::Rating,
  resource::{Comment, NewResource, Resource, ResourceQuery, ResourceUpdate},
  store::CatalogStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, principal::ActorId};

// ─── Resources ────────────────────────────────────────────────────────────────

/// `GET /resources[?owner_id=..][&category_id=..][&tag_id=..][&limit=..][&offset=..]`
pub async fn list<S>(
  State(catalog): State<Catalog<S>>,
  Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<Resource>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_resources(query).await?))
}

/// `POST /resources`: returns 201 + the stored resource.
pub async fn create<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Json(body): Json<NewResource>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let resource = catalog.create_resource(actor_id, body).await?;
  Ok((StatusCode::CREATED, Json(resource)))
}

/// `GET /resources/:id`
pub async fn get_one<S>(
  State(catalog): State<Catalog<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Resource>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.get_resource(id).await?))
}

/// `PATCH /resources/:id`: absent fields are left unchanged.
pub async fn update_one<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<ResourceUpdate>,
) -> Result<Json<Resource>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.update_resource(id, actor_id, body).await?))
}

/// `DELETE /resources/:id`
pub async fn delete_one<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_resource(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct TagsBody {
  pub tag_ids: Vec<Uuid>,
}

/// `PUT /resources/:id/tags`: replaces the whole tag set.
pub async fn set_tags<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<TagsBody>,
) -> Result<Json<Resource>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.set_resource_tags(id, actor_id, body.tag_ids).await?))
}

/// `GET /resources/:id/ratings`
pub async fn list_ratings<S>(
  State(catalog): State<Catalog<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Rating>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_ratings(id).await?))
}

// ─── Comments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub content: String,
}

/// `GET /resources/:id/comments`
pub async fn list_comments<S>(
  State(catalog): State<Catalog<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_comments(id).await?))
}

/// `POST /resources/:id/comments`: returns 201 + the comment.
pub async fn create_comment<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<CommentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let comment = catalog.create_comment(actor_id, id, body.content).await?;
  Ok((StatusCode::CREATED, Json(comment)))
}

/// `PATCH /comments/:id`
pub async fn update_comment<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<CommentBody>,
) -> Result<Json<Comment>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.update_comment(id, actor_id, body.content).await?))
}

/// `DELETE /comments/:id`
pub async fn delete_comment<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_comment(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
