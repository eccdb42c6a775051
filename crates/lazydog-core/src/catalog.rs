//! [`Catalog`]: the operations exposed to transports.
//!
//! Every operation is one call to [`CatalogStore::transact`]. Inside it,
//! referenced records are loaded and the authorization predicate consulted
//! before the uniqueness guard, which runs immediately before the write. Any
//! change to a resource's ratings recomputes its aggregate last, in the same
//! unit.

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  actor::Actor,
  aggregate,
  authz::{Authorizer, Capability, EntityKind, OwnershipPolicy, Protected, require},
  feedback::{Bookmark, Rating, Score},
  guard,
  moderation::{Flag, FlagQuery, FlagTarget, ReviewDecision},
  resource::{
    Comment, NewResource, Resource, ResourceQuery, ResourceUpdate, validate_comment,
    validate_description, validate_title, validate_url,
  },
  slug::try_generate_slug,
  store::{CatalogStore, Transaction},
  taxonomy::{Category, CategoryUpdate, Tag, validate_category_description},
};

// ─── Lookup helpers ──────────────────────────────────────────────────────────

fn found<T>(value: Option<T>, kind: EntityKind, key: impl std::fmt::Display) -> Result<T> {
  value.ok_or_else(|| Error::not_found(kind, key))
}

fn load_actor(tx: &dyn Transaction, id: Uuid) -> Result<Actor> {
  found(tx.get_actor(id)?, EntityKind::Actor, id)
}

fn load_resource(tx: &dyn Transaction, id: Uuid) -> Result<Resource> {
  found(tx.get_resource(id)?, EntityKind::Resource, id)
}

fn load_comment(tx: &dyn Transaction, id: Uuid) -> Result<Comment> {
  found(tx.get_comment(id)?, EntityKind::Comment, id)
}

fn load_rating(tx: &dyn Transaction, id: Uuid) -> Result<Rating> {
  found(tx.get_rating(id)?, EntityKind::Rating, id)
}

fn load_bookmark(tx: &dyn Transaction, id: Uuid) -> Result<Bookmark> {
  found(tx.get_bookmark(id)?, EntityKind::Bookmark, id)
}

fn load_flag(tx: &dyn Transaction, id: Uuid) -> Result<Flag> {
  found(tx.get_flag(id)?, EntityKind::Flag, id)
}

fn load_category(tx: &dyn Transaction, id: Uuid) -> Result<Category> {
  found(tx.get_category(id)?, EntityKind::Category, id)
}

fn load_tag(tx: &dyn Transaction, id: Uuid) -> Result<Tag> {
  found(tx.get_tag(id)?, EntityKind::Tag, id)
}

/// Ensure the flagged record exists.
fn ensure_target(tx: &dyn Transaction, target: FlagTarget) -> Result<()> {
  match target {
    FlagTarget::Resource(id) => load_resource(tx, id).map(drop),
    FlagTarget::Comment(id) => load_comment(tx, id).map(drop),
  }
}

/// Deduplicate `tag_ids` (first occurrence wins) and ensure each one exists.
fn resolve_tags(tx: &dyn Transaction, tag_ids: Vec<Uuid>) -> Result<Vec<Uuid>> {
  let mut seen = HashSet::new();
  let mut resolved = Vec::with_capacity(tag_ids.len());
  for id in tag_ids {
    if seen.insert(id) {
      load_tag(tx, id)?;
      resolved.push(id);
    }
  }
  Ok(resolved)
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// The catalog engine over a storage backend.
///
/// Cloning is cheap when the store is (e.g. `SqliteStore`).
#[derive(Clone)]
pub struct Catalog<S> {
  store: S,
  authz: Arc<dyn Authorizer>,
}

impl<S: CatalogStore> Catalog<S> {
  /// A catalog using the default [`OwnershipPolicy`].
  pub fn new(store: S) -> Self { Self::with_authorizer(store, Arc::new(OwnershipPolicy)) }

  pub fn with_authorizer(store: S, authz: Arc<dyn Authorizer>) -> Self { Self { store, authz } }

  pub fn store(&self) -> &S { &self.store }

  // ── Actors ────────────────────────────────────────────────────────────────

  pub async fn register_actor(&self, username: String, is_moderator: bool) -> Result<Actor> {
    let actor = self
      .store
      .transact(move |tx| {
        let actor = Actor::new(&username, is_moderator)?;
        if tx.username_taken(&actor.username)? {
          return Err(Error::conflict("username taken"));
        }
        tx.insert_actor(&actor)?;
        Ok(actor)
      })
      .await?;
    tracing::debug!(actor_id = %actor.actor_id, "actor registered");
    Ok(actor)
  }

  pub async fn get_actor(&self, actor_id: Uuid) -> Result<Actor> {
    self.store.transact(move |tx| load_actor(&*tx, actor_id)).await
  }

  /// Remove an actor and everything it owns. Resources that survive but lose
  /// the actor's ratings get their aggregates recomputed in the same unit.
  pub async fn delete_actor(&self, actor_id: Uuid, requester_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    let affected = self
      .store
      .transact(move |tx| {
        let target = load_actor(&*tx, actor_id)?;
        let requester = load_actor(&*tx, requester_id)?;
        require(
          &*authz,
          &requester,
          Protected::owned_by(EntityKind::Actor, target.actor_id),
          Capability::Delete,
          "cannot delete another actor",
        )?;

        let affected = tx.resources_rated_by(actor_id)?;
        tx.delete_actor(actor_id)?;
        for &resource_id in &affected {
          aggregate::recompute(tx, resource_id)?;
        }
        Ok(affected.len())
      })
      .await?;
    tracing::debug!(%actor_id, recomputed = affected, "actor deleted");
    Ok(())
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  pub async fn create_resource(&self, actor_id: Uuid, input: NewResource) -> Result<Resource> {
    let authz = Arc::clone(&self.authz);
    let resource = self
      .store
      .transact(move |tx| {
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::new_record(EntityKind::Resource),
          Capability::Create,
          "cannot create resources",
        )?;

        let title = validate_title(&input.title)?;
        let description = validate_description(&input.description)?;
        let url = validate_url(&input.url)?;
        if let Some(category_id) = input.category_id {
          load_category(&*tx, category_id)?;
        }
        let tag_ids = resolve_tags(&*tx, input.tag_ids)?;
        guard::check_resource_identity(&*tx, actor_id, &title, &url, None)?;

        let now = Utc::now();
        let resource = Resource {
          resource_id: Uuid::new_v4(),
          owner_id: actor_id,
          title,
          description,
          url,
          category_id: input.category_id,
          tag_ids,
          average_score: 0.0,
          score_count: 0,
          created_at: now,
          updated_at: now,
        };
        tx.insert_resource(&resource)?;
        Ok(resource)
      })
      .await?;
    tracing::debug!(resource_id = %resource.resource_id, %actor_id, "resource created");
    Ok(resource)
  }

  pub async fn get_resource(&self, resource_id: Uuid) -> Result<Resource> {
    self.store.transact(move |tx| load_resource(&*tx, resource_id)).await
  }

  pub async fn list_resources(&self, query: ResourceQuery) -> Result<Vec<Resource>> {
    self.store.transact(move |tx| tx.list_resources(&query)).await
  }

  pub async fn update_resource(
    &self,
    resource_id: Uuid,
    actor_id: Uuid,
    update: ResourceUpdate,
  ) -> Result<Resource> {
    let authz = Arc::clone(&self.authz);
    let resource = self
      .store
      .transact(move |tx| {
        let mut resource = load_resource(&*tx, resource_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Resource, resource.owner_id),
          Capability::Modify,
          "not resource owner",
        )?;

        if let Some(title) = update.title {
          resource.title = validate_title(&title)?;
        }
        if let Some(description) = update.description {
          resource.description = validate_description(&description)?;
        }
        if let Some(url) = update.url {
          resource.url = validate_url(&url)?;
        }
        if let Some(category_id) = update.category_id {
          load_category(&*tx, category_id)?;
          resource.category_id = Some(category_id);
        }
        guard::check_resource_identity(
          &*tx,
          resource.owner_id,
          &resource.title,
          &resource.url,
          Some(resource_id),
        )?;

        resource.updated_at = Utc::now();
        tx.update_resource(&resource)?;
        Ok(resource)
      })
      .await?;
    tracing::debug!(%resource_id, "resource updated");
    Ok(resource)
  }

  /// Replace the tag set of a resource.
  pub async fn set_resource_tags(
    &self,
    resource_id: Uuid,
    actor_id: Uuid,
    tag_ids: Vec<Uuid>,
  ) -> Result<Resource> {
    let authz = Arc::clone(&self.authz);
    let resource = self
      .store
      .transact(move |tx| {
        let mut resource = load_resource(&*tx, resource_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Resource, resource.owner_id),
          Capability::Modify,
          "not resource owner",
        )?;

        resource.tag_ids = resolve_tags(&*tx, tag_ids)?;
        tx.set_resource_tags(resource_id, &resource.tag_ids)?;
        Ok(resource)
      })
      .await?;
    tracing::debug!(%resource_id, tags = resource.tag_ids.len(), "resource tags replaced");
    Ok(resource)
  }

  /// Delete a resource together with its ratings, bookmarks, comments and
  /// flags.
  pub async fn delete_resource(&self, resource_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let resource = load_resource(&*tx, resource_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Resource, resource.owner_id),
          Capability::Delete,
          "not resource owner",
        )?;
        tx.delete_resource(resource_id)
      })
      .await?;
    tracing::debug!(%resource_id, "resource deleted");
    Ok(())
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  pub async fn create_comment(
    &self,
    actor_id: Uuid,
    resource_id: Uuid,
    content: String,
  ) -> Result<Comment> {
    let authz = Arc::clone(&self.authz);
    let comment = self
      .store
      .transact(move |tx| {
        let actor = load_actor(&*tx, actor_id)?;
        load_resource(&*tx, resource_id)?;
        require(
          &*authz,
          &actor,
          Protected::new_record(EntityKind::Comment),
          Capability::Create,
          "cannot comment",
        )?;

        let now = Utc::now();
        let comment = Comment {
          comment_id: Uuid::new_v4(),
          actor_id,
          resource_id,
          content: validate_comment(&content)?,
          created_at: now,
          updated_at: now,
        };
        tx.insert_comment(&comment)?;
        Ok(comment)
      })
      .await?;
    tracing::debug!(comment_id = %comment.comment_id, %resource_id, "comment created");
    Ok(comment)
  }

  pub async fn list_comments(&self, resource_id: Uuid) -> Result<Vec<Comment>> {
    self
      .store
      .transact(move |tx| {
        load_resource(&*tx, resource_id)?;
        tx.list_comments(resource_id)
      })
      .await
  }

  pub async fn update_comment(
    &self,
    comment_id: Uuid,
    actor_id: Uuid,
    content: String,
  ) -> Result<Comment> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let mut comment = load_comment(&*tx, comment_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Comment, comment.actor_id),
          Capability::Modify,
          "not comment author",
        )?;
        comment.content = validate_comment(&content)?;
        comment.updated_at = Utc::now();
        tx.update_comment(&comment)?;
        Ok(comment)
      })
      .await
  }

  /// Delete a comment and the flags raised against it.
  pub async fn delete_comment(&self, comment_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let comment = load_comment(&*tx, comment_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Comment, comment.actor_id),
          Capability::Delete,
          "not comment author",
        )?;
        tx.delete_comment(comment_id)
      })
      .await?;
    tracing::debug!(%comment_id, "comment deleted");
    Ok(())
  }

  // ── Ratings ───────────────────────────────────────────────────────────────

  pub async fn create_rating(&self, actor_id: Uuid, resource_id: Uuid, score: i64) -> Result<Rating> {
    let authz = Arc::clone(&self.authz);
    let rating = self
      .store
      .transact(move |tx| {
        let score = Score::new(score)?;
        let actor = load_actor(&*tx, actor_id)?;
        let resource = load_resource(&*tx, resource_id)?;
        require(
          &*authz,
          &actor,
          Protected::new_record(EntityKind::Rating),
          Capability::Create,
          "cannot rate",
        )?;
        guard::check_rating(&*tx, actor_id, &resource, true)?;

        let now = Utc::now();
        let rating = Rating {
          rating_id: Uuid::new_v4(),
          actor_id,
          resource_id,
          score,
          created_at: now,
          updated_at: now,
        };
        tx.insert_rating(&rating)?;
        aggregate::recompute(tx, resource_id)?;
        Ok(rating)
      })
      .await?;
    tracing::debug!(rating_id = %rating.rating_id, %resource_id, %actor_id, "rating created");
    Ok(rating)
  }

  pub async fn update_rating(&self, rating_id: Uuid, actor_id: Uuid, score: i64) -> Result<Rating> {
    let authz = Arc::clone(&self.authz);
    let rating = self
      .store
      .transact(move |tx| {
        let score = Score::new(score)?;
        let mut rating = load_rating(&*tx, rating_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Rating, rating.actor_id),
          Capability::Modify,
          "not rating owner",
        )?;
        let resource = load_resource(&*tx, rating.resource_id)?;
        guard::check_rating(&*tx, actor_id, &resource, false)?;

        rating.score = score;
        rating.updated_at = Utc::now();
        tx.update_rating(&rating)?;
        aggregate::recompute(tx, rating.resource_id)?;
        Ok(rating)
      })
      .await?;
    tracing::debug!(%rating_id, score = %rating.score, "rating updated");
    Ok(rating)
  }

  pub async fn delete_rating(&self, rating_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let rating = load_rating(&*tx, rating_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Rating, rating.actor_id),
          Capability::Delete,
          "not rating owner",
        )?;
        tx.delete_rating(rating_id)?;
        aggregate::recompute(tx, rating.resource_id)?;
        Ok(())
      })
      .await?;
    tracing::debug!(%rating_id, "rating deleted");
    Ok(())
  }

  pub async fn list_ratings(&self, resource_id: Uuid) -> Result<Vec<Rating>> {
    self
      .store
      .transact(move |tx| {
        load_resource(&*tx, resource_id)?;
        tx.list_ratings(resource_id)
      })
      .await
  }

  // ── Bookmarks ─────────────────────────────────────────────────────────────

  pub async fn create_bookmark(&self, actor_id: Uuid, resource_id: Uuid) -> Result<Bookmark> {
    let authz = Arc::clone(&self.authz);
    let bookmark = self
      .store
      .transact(move |tx| {
        let actor = load_actor(&*tx, actor_id)?;
        load_resource(&*tx, resource_id)?;
        require(
          &*authz,
          &actor,
          Protected::new_record(EntityKind::Bookmark),
          Capability::Create,
          "cannot bookmark",
        )?;
        guard::check_bookmark(&*tx, actor_id, resource_id)?;

        let bookmark = Bookmark {
          bookmark_id: Uuid::new_v4(),
          actor_id,
          resource_id,
          created_at: Utc::now(),
        };
        tx.insert_bookmark(&bookmark)?;
        Ok(bookmark)
      })
      .await?;
    tracing::debug!(bookmark_id = %bookmark.bookmark_id, %resource_id, %actor_id, "bookmark created");
    Ok(bookmark)
  }

  pub async fn delete_bookmark(&self, bookmark_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let bookmark = load_bookmark(&*tx, bookmark_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Bookmark, bookmark.actor_id),
          Capability::Delete,
          "not bookmark owner",
        )?;
        tx.delete_bookmark(bookmark_id)
      })
      .await?;
    tracing::debug!(%bookmark_id, "bookmark deleted");
    Ok(())
  }

  /// Bookmarks held by `actor_id`, newest first.
  pub async fn list_bookmarks(&self, actor_id: Uuid) -> Result<Vec<Bookmark>> {
    self
      .store
      .transact(move |tx| {
        load_actor(&*tx, actor_id)?;
        tx.list_bookmarks(actor_id)
      })
      .await
  }

  // ── Flags ─────────────────────────────────────────────────────────────────

  pub async fn create_flag(
    &self,
    actor_id: Uuid,
    resource_id: Option<Uuid>,
    comment_id: Option<Uuid>,
    reason: String,
  ) -> Result<Flag> {
    let authz = Arc::clone(&self.authz);
    let flag = self
      .store
      .transact(move |tx| {
        let actor = load_actor(&*tx, actor_id)?;
        ensure_target(&*tx, FlagTarget::from_parts(resource_id, comment_id)?)?;
        require(
          &*authz,
          &actor,
          Protected::new_record(EntityKind::Flag),
          Capability::Create,
          "cannot flag",
        )?;
        let target = guard::check_flag(&*tx, actor_id, resource_id, comment_id)?;

        let flag = Flag::new(actor_id, target, &reason)?;
        tx.insert_flag(&flag)?;
        Ok(flag)
      })
      .await?;
    tracing::debug!(flag_id = %flag.flag_id, target = ?flag.target, "flag raised");
    Ok(flag)
  }

  pub async fn review_flag(
    &self,
    flag_id: Uuid,
    moderator_id: Uuid,
    decision: ReviewDecision,
  ) -> Result<Flag> {
    let authz = Arc::clone(&self.authz);
    let flag = self
      .store
      .transact(move |tx| {
        let mut flag = load_flag(&*tx, flag_id)?;
        let moderator = load_actor(&*tx, moderator_id)?;
        flag.review(&moderator, &*authz, decision, Utc::now())?;
        tx.update_flag(&flag)?;
        Ok(flag)
      })
      .await?;
    tracing::debug!(%flag_id, status = ?flag.status, %moderator_id, "flag reviewed");
    Ok(flag)
  }

  pub async fn get_flag(&self, flag_id: Uuid) -> Result<Flag> {
    self.store.transact(move |tx| load_flag(&*tx, flag_id)).await
  }

  pub async fn list_flags(&self, query: FlagQuery) -> Result<Vec<Flag>> {
    self.store.transact(move |tx| tx.list_flags(&query)).await
  }

  pub async fn delete_flag(&self, flag_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        load_flag(&*tx, flag_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::unowned(EntityKind::Flag),
          Capability::Delete,
          "moderator required",
        )?;
        tx.delete_flag(flag_id)
      })
      .await?;
    tracing::debug!(%flag_id, "flag deleted");
    Ok(())
  }

  // ── Categories ────────────────────────────────────────────────────────────

  pub async fn create_category(
    &self,
    actor_id: Uuid,
    name: String,
    description: String,
  ) -> Result<Category> {
    let authz = Arc::clone(&self.authz);
    let category = self
      .store
      .transact(move |tx| {
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::new_record(EntityKind::Category),
          Capability::Create,
          "moderator required",
        )?;
        let name = guard::check_category_name(&*tx, &name, None)?;

        let now = Utc::now();
        let category = Category {
          category_id: Uuid::new_v4(),
          owner_id: actor_id,
          name,
          description: validate_category_description(&description)?,
          created_at: now,
          updated_at: now,
        };
        tx.insert_category(&category)?;
        Ok(category)
      })
      .await?;
    tracing::debug!(category_id = %category.category_id, name = %category.name, "category created");
    Ok(category)
  }

  pub async fn rename_category(
    &self,
    category_id: Uuid,
    actor_id: Uuid,
    name: String,
  ) -> Result<Category> {
    let update = CategoryUpdate { name: Some(name), description: None };
    self.update_category(category_id, actor_id, update).await
  }

  pub async fn update_category_description(
    &self,
    category_id: Uuid,
    actor_id: Uuid,
    description: String,
  ) -> Result<Category> {
    let update = CategoryUpdate { name: None, description: Some(description) };
    self.update_category(category_id, actor_id, update).await
  }

  /// Apply a rename and a description change together. Either both are
  /// written or neither is.
  pub async fn update_category(
    &self,
    category_id: Uuid,
    actor_id: Uuid,
    update: CategoryUpdate,
  ) -> Result<Category> {
    let authz = Arc::clone(&self.authz);
    let category = self
      .store
      .transact(move |tx| {
        let mut category = load_category(&*tx, category_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Category, category.owner_id),
          Capability::Modify,
          "not category owner",
        )?;

        if let Some(description) = update.description {
          category.description = validate_category_description(&description)?;
        }
        if let Some(name) = update.name {
          category.name = guard::check_category_name(&*tx, &name, Some(category_id))?;
        }
        category.updated_at = Utc::now();
        tx.update_category(&category)?;
        Ok(category)
      })
      .await?;
    tracing::debug!(%category_id, name = %category.name, "category updated");
    Ok(category)
  }

  /// Delete a category. Resources in it become uncategorised.
  pub async fn delete_category(&self, category_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let category = load_category(&*tx, category_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::owned_by(EntityKind::Category, category.owner_id),
          Capability::Delete,
          "not category owner",
        )?;
        tx.delete_category(category_id)
      })
      .await?;
    tracing::debug!(%category_id, "category deleted");
    Ok(())
  }

  pub async fn get_category(&self, category_id: Uuid) -> Result<Category> {
    self.store.transact(move |tx| load_category(&*tx, category_id)).await
  }

  pub async fn list_categories(&self) -> Result<Vec<Category>> {
    self.store.transact(|tx| tx.list_categories()).await
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  /// Create a tag with a slug derived from its name.
  pub async fn create_tag(&self, name: String, description: String) -> Result<Tag> {
    let tag = self
      .store
      .transact(move |tx| {
        let name = guard::check_tag_name(&*tx, &name, None)?;
        let slug = try_generate_slug(&name, |candidate| tx.slug_taken(candidate).map(|taken| !taken))?;

        let now = Utc::now();
        let tag = Tag {
          tag_id: Uuid::new_v4(),
          name,
          description: description.trim().to_owned(),
          slug,
          created_at: now,
          updated_at: now,
        };
        tx.insert_tag(&tag)?;
        Ok(tag)
      })
      .await?;
    tracing::debug!(tag_id = %tag.tag_id, slug = %tag.slug, "tag created");
    Ok(tag)
  }

  /// Rename a tag. The slug assigned at creation is kept.
  pub async fn rename_tag(&self, tag_id: Uuid, actor_id: Uuid, name: String) -> Result<Tag> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        let mut tag = load_tag(&*tx, tag_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::unowned(EntityKind::Tag),
          Capability::Modify,
          "moderator required",
        )?;
        tag.name = guard::check_tag_name(&*tx, &name, Some(tag_id))?;
        tag.updated_at = Utc::now();
        tx.update_tag(&tag)?;
        Ok(tag)
      })
      .await
  }

  pub async fn delete_tag(&self, tag_id: Uuid, actor_id: Uuid) -> Result<()> {
    let authz = Arc::clone(&self.authz);
    self
      .store
      .transact(move |tx| {
        load_tag(&*tx, tag_id)?;
        let actor = load_actor(&*tx, actor_id)?;
        require(
          &*authz,
          &actor,
          Protected::unowned(EntityKind::Tag),
          Capability::Delete,
          "moderator required",
        )?;
        tx.delete_tag(tag_id)
      })
      .await?;
    tracing::debug!(%tag_id, "tag deleted");
    Ok(())
  }

  pub async fn get_tag_by_slug(&self, slug: String) -> Result<Tag> {
    self
      .store
      .transact(move |tx| {
        let tag = tx.get_tag_by_slug(&slug)?;
        found(tag, EntityKind::Tag, slug)
      })
      .await
  }

  pub async fn list_tags(&self) -> Result<Vec<Tag>> {
    self.store.transact(|tx| tx.list_tags()).await
  }
}
