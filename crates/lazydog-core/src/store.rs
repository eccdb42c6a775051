//! Storage abstraction consumed by [`Catalog`](crate::Catalog).
//!
//! A backend provides a single primitive, [`CatalogStore::transact`], which
//! runs a closure against a [`Transaction`] as one atomic unit: committed if
//! the closure returns `Ok`, rolled back otherwise. Every consistency rule
//! (uniqueness checks, the write itself, aggregate recomputation) runs inside
//! that closure.
//!
//! Backends must also enforce the uniqueness invariants with their own
//! constraints and report violations as [`Error::Conflict`](crate::Error).

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  actor::Actor,
  aggregate::ScoreSummary,
  feedback::{Bookmark, Rating, Score},
  moderation::{Flag, FlagQuery, FlagTarget},
  resource::{Comment, Resource, ResourceQuery},
  taxonomy::{Category, Tag},
};

// ─── Unit of work ────────────────────────────────────────────────────────────

/// Reads and writes available inside one storage transaction.
///
/// Point lookups return `Ok(None)` for a missing id. Deletes of a missing id
/// are no-ops.
pub trait Transaction {
  // ── Actors ────────────────────────────────────────────────────────────

  fn get_actor(&self, actor_id: Uuid) -> Result<Option<Actor>>;
  fn username_taken(&self, username: &str) -> Result<bool>;
  fn insert_actor(&mut self, actor: &Actor) -> Result<()>;
  /// Removes the actor and, by cascade, everything it owns.
  fn delete_actor(&mut self, actor_id: Uuid) -> Result<()>;

  /// Resources rated by `actor_id` that the actor does not itself own.
  fn resources_rated_by(&self, actor_id: Uuid) -> Result<Vec<Uuid>>;

  // ── Resources ─────────────────────────────────────────────────────────

  fn get_resource(&self, resource_id: Uuid) -> Result<Option<Resource>>;
  fn list_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>>;
  fn url_taken(&self, url: &str, excluding: Option<Uuid>) -> Result<bool>;
  fn title_taken(&self, owner_id: Uuid, title: &str, excluding: Option<Uuid>) -> Result<bool>;
  /// Inserts the resource together with its tag links.
  fn insert_resource(&mut self, resource: &Resource) -> Result<()>;
  /// Writes title, description, url, category and `updated_at`. Aggregate
  /// fields and tag links are left untouched.
  fn update_resource(&mut self, resource: &Resource) -> Result<()>;
  fn set_resource_tags(&mut self, resource_id: Uuid, tag_ids: &[Uuid]) -> Result<()>;
  fn delete_resource(&mut self, resource_id: Uuid) -> Result<()>;
  fn set_resource_aggregate(&mut self, resource_id: Uuid, summary: ScoreSummary) -> Result<()>;

  // ── Comments ──────────────────────────────────────────────────────────

  fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;
  fn list_comments(&self, resource_id: Uuid) -> Result<Vec<Comment>>;
  fn insert_comment(&mut self, comment: &Comment) -> Result<()>;
  fn update_comment(&mut self, comment: &Comment) -> Result<()>;
  fn delete_comment(&mut self, comment_id: Uuid) -> Result<()>;

  // ── Ratings ───────────────────────────────────────────────────────────

  fn get_rating(&self, rating_id: Uuid) -> Result<Option<Rating>>;
  fn rating_exists(&self, actor_id: Uuid, resource_id: Uuid) -> Result<bool>;
  fn list_ratings(&self, resource_id: Uuid) -> Result<Vec<Rating>>;
  /// Every current score for the resource; the input to aggregation.
  fn scores_for_resource(&self, resource_id: Uuid) -> Result<Vec<Score>>;
  fn insert_rating(&mut self, rating: &Rating) -> Result<()>;
  fn update_rating(&mut self, rating: &Rating) -> Result<()>;
  fn delete_rating(&mut self, rating_id: Uuid) -> Result<()>;

  // ── Bookmarks ─────────────────────────────────────────────────────────

  fn get_bookmark(&self, bookmark_id: Uuid) -> Result<Option<Bookmark>>;
  fn bookmark_exists(&self, actor_id: Uuid, resource_id: Uuid) -> Result<bool>;
  fn list_bookmarks(&self, actor_id: Uuid) -> Result<Vec<Bookmark>>;
  fn insert_bookmark(&mut self, bookmark: &Bookmark) -> Result<()>;
  fn delete_bookmark(&mut self, bookmark_id: Uuid) -> Result<()>;

  // ── Flags ─────────────────────────────────────────────────────────────

  fn get_flag(&self, flag_id: Uuid) -> Result<Option<Flag>>;
  fn flag_exists(&self, actor_id: Uuid, target: FlagTarget) -> Result<bool>;
  /// Newest first.
  fn list_flags(&self, query: &FlagQuery) -> Result<Vec<Flag>>;
  fn insert_flag(&mut self, flag: &Flag) -> Result<()>;
  /// Writes status and review fields.
  fn update_flag(&mut self, flag: &Flag) -> Result<()>;
  fn delete_flag(&mut self, flag_id: Uuid) -> Result<()>;

  // ── Categories ────────────────────────────────────────────────────────

  fn get_category(&self, category_id: Uuid) -> Result<Option<Category>>;
  fn list_categories(&self) -> Result<Vec<Category>>;
  /// `name_key` is the case-folded comparison key.
  fn category_name_taken(&self, name_key: &str, excluding: Option<Uuid>) -> Result<bool>;
  fn insert_category(&mut self, category: &Category) -> Result<()>;
  fn update_category(&mut self, category: &Category) -> Result<()>;
  fn delete_category(&mut self, category_id: Uuid) -> Result<()>;

  // ── Tags ──────────────────────────────────────────────────────────────

  fn get_tag(&self, tag_id: Uuid) -> Result<Option<Tag>>;
  fn get_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>>;
  fn list_tags(&self) -> Result<Vec<Tag>>;
  fn tag_name_taken(&self, name: &str, excluding: Option<Uuid>) -> Result<bool>;
  fn slug_taken(&self, slug: &str) -> Result<bool>;
  fn insert_tag(&mut self, tag: &Tag) -> Result<()>;
  fn update_tag(&mut self, tag: &Tag) -> Result<()>;
  fn delete_tag(&mut self, tag_id: Uuid) -> Result<()>;
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A backend able to run [`Transaction`] closures atomically.
///
/// The returned future is `Send` so the store can be shared across a
/// multi-threaded runtime (e.g. behind `axum`).
pub trait CatalogStore: Send + Sync {
  /// Run `unit` inside one transaction. Commits on `Ok`, rolls back on `Err`
  /// and returns the closure's error unchanged.
  fn transact<T, F>(&self, unit: F) -> impl Future<Output = Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&mut dyn Transaction) -> Result<T> + Send + 'static;
}
