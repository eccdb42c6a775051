//! JSON REST API for Lazydog.
//!
//! Exposes an axum [`Router`] over a [`Catalog`] backed by any
//! [`CatalogStore`]. Authentication, TLS, and transport concerns are the
//! caller's responsibility; the acting actor arrives in the `x-actor-id`
//! header.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lazydog_api::api_router(catalog.clone()))
//! ```

pub mod actors;
pub mod error;
pub mod feedback;
pub mod flags;
pub mod principal;
pub mod resources;
pub mod taxonomy;

use axum::{
  Router,
  routing::{get, patch, post, put},
};
use lazydog_core::{Catalog, store::CatalogStore};

pub use error::ApiError;
pub use principal::{ACTOR_HEADER, ActorId};

/// Build the API router for `catalog`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(catalog: Catalog<S>) -> Router<()>
where
  S: CatalogStore + Clone + 'static,
{
  Router::new()
    // Actors
    .route("/actors", post(actors::register::<S>))
    .route("/actors/{id}", get(actors::get_one::<S>).delete(actors::delete_one::<S>))
    // Resources and comments
    .route("/resources", get(resources::list::<S>).post(resources::create::<S>))
    .route(
      "/resources/{id}",
      get(resources::get_one::<S>)
        .patch(resources::update_one::<S>)
        .delete(resources::delete_one::<S>),
    )
    .route("/resources/{id}/tags", put(resources::set_tags::<S>))
    .route(
      "/resources/{id}/comments",
      get(resources::list_comments::<S>).post(resources::create_comment::<S>),
    )
    .route("/resources/{id}/ratings", get(resources::list_ratings::<S>))
    .route(
      "/comments/{id}",
      patch(resources::update_comment::<S>).delete(resources::delete_comment::<S>),
    )
    // Ratings and bookmarks
    .route("/ratings", post(feedback::create_rating::<S>))
    .route(
      "/ratings/{id}",
      patch(feedback::update_rating::<S>).delete(feedback::delete_rating::<S>),
    )
    .route(
      "/bookmarks",
      get(feedback::list_bookmarks::<S>).post(feedback::create_bookmark::<S>),
    )
    .route("/bookmarks/{id}", axum::routing::delete(feedback::delete_bookmark::<S>))
    // Moderation
    .route("/flags", get(flags::list::<S>).post(flags::create::<S>))
    .route("/flags/{id}", get(flags::get_one::<S>).delete(flags::delete_one::<S>))
    .route("/flags/{id}/review", post(flags::review::<S>))
    // Taxonomy
    .route(
      "/categories",
      get(taxonomy::list_categories::<S>).post(taxonomy::create_category::<S>),
    )
    .route(
      "/categories/{id}",
      get(taxonomy::get_category::<S>)
        .patch(taxonomy::update_category::<S>)
        .delete(taxonomy::delete_category::<S>),
    )
    .route("/tags", get(taxonomy::list_tags::<S>).post(taxonomy::create_tag::<S>))
    // One path segment: a slug for GET, a tag id for PATCH and DELETE.
    .route(
      "/tags/{key}",
      get(taxonomy::get_tag::<S>)
        .patch(taxonomy::rename_tag::<S>)
        .delete(taxonomy::delete_tag::<S>),
    )
    .with_state(catalog)
}
