//! Handlers for `/categories` and `/tags` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/categories` | Ordered by name |
//! | `POST`   | `/categories` | Body: `{"name":"...","description":"..."}`; moderators only |
//! | `GET`    | `/categories/:id` | |
//! | `PATCH`  | `/categories/:id` | Body: [`CategoryUpdate`]; applied atomically |
//! | `DELETE` | `/categories/:id` | Resources keep existing, uncategorised |
//! | `GET`    | `/tags` | Ordered by slug |
//! | `POST`   | `/tags` | Body: `{"name":"...","description":"..."}` |
//! | `GET`    | `/tags/:slug` | Lookup by slug |
//! | `PATCH`  | `/tags/:id` | Body: `{"name":"..."}`; slug is kept |
//! | `DELETE` | `/tags/:id` | Moderators only |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lazydog_core::{
  Catalog,
  store::CatalogStore,
  taxonomy::{Category, CategoryUpdate, Tag},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, principal::ActorId};

// ─── Categories ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewCategoryBody {
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

/// `GET /categories`
pub async fn list_categories<S>(
  State(catalog): State<Catalog<S>>,
) -> Result<Json<Vec<Category>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_categories().await?))
}

/// `POST /categories`: returns 201 + the category with its normalized name.
pub async fn create_category<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Json(body): Json<NewCategoryBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let category = catalog.create_category(actor_id, body.name, body.description).await?;
  Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /categories/:id`
pub async fn get_category<S>(
  State(catalog): State<Catalog<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Category>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.get_category(id).await?))
}

/// `PATCH /categories/:id`: name and description change in one transaction.
pub async fn update_category<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.update_category(id, actor_id, body).await?))
}

/// `DELETE /categories/:id`
pub async fn delete_category<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_category(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Tags ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewTagBody {
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameTagBody {
  pub name: String,
}

/// `GET /tags`
pub async fn list_tags<S>(State(catalog): State<Catalog<S>>) -> Result<Json<Vec<Tag>>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.list_tags().await?))
}

/// `POST /tags`: returns 201 + the tag with its generated slug.
pub async fn create_tag<S>(
  State(catalog): State<Catalog<S>>,
  Json(body): Json<NewTagBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let tag = catalog.create_tag(body.name, body.description).await?;
  Ok((StatusCode::CREATED, Json(tag)))
}

/// `GET /tags/:slug`
pub async fn get_tag<S>(
  State(catalog): State<Catalog<S>>,
  Path(slug): Path<String>,
) -> Result<Json<Tag>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.get_tag_by_slug(slug).await?))
}

/// `PATCH /tags/:id`
pub async fn rename_tag<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
  Json(body): Json<RenameTagBody>,
) -> Result<Json<Tag>, ApiError>
where
  S: CatalogStore,
{
  Ok(Json(catalog.rename_tag(id, actor_id, body.name).await?))
}

/// `DELETE /tags/:id`
pub async fn delete_tag<S>(
  State(catalog): State<Catalog<S>>,
  ActorId(actor_id): ActorId,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  catalog.delete_tag(id, actor_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
