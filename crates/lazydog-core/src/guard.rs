//! Uniqueness checks run before a write, inside the same transaction.
//!
//! These reject duplicates early with a precise message. The store's own
//! constraints still have the final word when two transactions race.

use uuid::Uuid;

use crate::{
  Error, Result,
  moderation::FlagTarget,
  normalize::{category_name_key, normalize_category_name, normalize_tag_name},
  resource::Resource,
  store::Transaction,
  taxonomy::{CATEGORY_NAME_MAX, TAG_NAME_MAX},
};

/// Validate a category name and return its storage form. `excluding` is the
/// category being renamed, if any.
pub fn check_category_name(
  tx: &dyn Transaction,
  name: &str,
  excluding: Option<Uuid>,
) -> Result<String> {
  let normalized = normalize_category_name(name);
  if normalized.is_empty() {
    return Err(Error::invalid("name required"));
  }
  if normalized.chars().count() > CATEGORY_NAME_MAX {
    return Err(Error::invalid("name too long"));
  }
  if tx.category_name_taken(&category_name_key(&normalized), excluding)? {
    return Err(Error::conflict("category exists"));
  }
  Ok(normalized)
}

/// Validate a tag name and return its storage form.
pub fn check_tag_name(tx: &dyn Transaction, name: &str, excluding: Option<Uuid>) -> Result<String> {
  let normalized = normalize_tag_name(name);
  if normalized.is_empty() {
    return Err(Error::invalid("name required"));
  }
  if normalized.chars().count() > TAG_NAME_MAX {
    return Err(Error::invalid("name too long"));
  }
  if tx.tag_name_taken(&normalized, excluding)? {
    return Err(Error::conflict("tag exists"));
  }
  Ok(normalized)
}

/// An actor may rate a resource once, and never one it owns. Re-scoring an
/// existing rating (`is_create == false`) skips the duplicate check.
pub fn check_rating(
  tx: &dyn Transaction,
  actor_id: Uuid,
  resource: &Resource,
  is_create: bool,
) -> Result<()> {
  if resource.owner_id == actor_id {
    return Err(Error::forbidden("cannot rate own resource"));
  }
  if is_create && tx.rating_exists(actor_id, resource.resource_id)? {
    return Err(Error::conflict("already rated"));
  }
  Ok(())
}

pub fn check_bookmark(tx: &dyn Transaction, actor_id: Uuid, resource_id: Uuid) -> Result<()> {
  if tx.bookmark_exists(actor_id, resource_id)? {
    return Err(Error::conflict("already bookmarked"));
  }
  Ok(())
}

/// Resolve the single flag target and check the actor has not flagged it
/// already.
pub fn check_flag(
  tx: &dyn Transaction,
  actor_id: Uuid,
  resource_id: Option<Uuid>,
  comment_id: Option<Uuid>,
) -> Result<FlagTarget> {
  let target = FlagTarget::from_parts(resource_id, comment_id)?;
  if tx.flag_exists(actor_id, target)? {
    return Err(Error::conflict("already flagged"));
  }
  Ok(target)
}

/// URLs are unique across the catalog; titles are unique per owner.
pub fn check_resource_identity(
  tx: &dyn Transaction,
  owner_id: Uuid,
  title: &str,
  url: &str,
  excluding: Option<Uuid>,
) -> Result<()> {
  if tx.url_taken(url, excluding)? {
    return Err(Error::conflict("url already registered"));
  }
  if tx.title_taken(owner_id, title, excluding)? {
    return Err(Error::conflict("title already used"));
  }
  Ok(())
}
