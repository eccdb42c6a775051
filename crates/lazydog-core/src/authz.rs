//! A single authorization predicate, parameterized by entity kind and the
//! capability being exercised.
//!
//! Authentication happens upstream. By the time an operation runs, the
//! [`Actor`] has been resolved; this module only decides what it may do.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, actor::Actor};

/// Every kind of record the catalog manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
  Actor,
  Resource,
  Comment,
  Rating,
  Bookmark,
  Flag,
  Category,
  Tag,
}

impl EntityKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Actor => "actor",
      Self::Resource => "resource",
      Self::Comment => "comment",
      Self::Rating => "rating",
      Self::Bookmark => "bookmark",
      Self::Flag => "flag",
      Self::Category => "category",
      Self::Tag => "tag",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
  Create,
  Modify,
  Delete,
  /// Resolve a moderation flag.
  Review,
}

/// What is being acted upon: the kind, plus the owning actor when the record
/// already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protected {
  pub kind:  EntityKind,
  pub owner: Option<Uuid>,
}

impl Protected {
  /// A record that does not exist yet.
  pub fn new_record(kind: EntityKind) -> Self { Self { kind, owner: None } }

  pub fn owned_by(kind: EntityKind, owner: Uuid) -> Self {
    Self { kind, owner: Some(owner) }
  }

  /// A record with no owning actor (tags, for instance).
  pub fn unowned(kind: EntityKind) -> Self { Self { kind, owner: None } }
}

pub trait Authorizer: Send + Sync {
  fn permits(&self, actor: &Actor, target: Protected, capability: Capability) -> bool;
}

/// Default policy:
///
/// | Kind | Create | Modify / Delete | Review |
/// |------|--------|-----------------|--------|
/// | resource, comment, rating, bookmark | anyone | owner | no |
/// | category | moderator | owner or moderator | no |
/// | tag | anyone | moderator | no |
/// | flag | anyone | moderator | moderator |
/// | actor | anyone | self (delete: self or moderator) | no |
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipPolicy;

impl Authorizer for OwnershipPolicy {
  fn permits(&self, actor: &Actor, target: Protected, capability: Capability) -> bool {
    let is_owner = target.owner == Some(actor.actor_id);
    let moderator = actor.is_moderator;

    match (target.kind, capability) {
      (_, Capability::Review) => target.kind == EntityKind::Flag && moderator,
      (EntityKind::Category, Capability::Create) => moderator,
      (_, Capability::Create) => true,
      (
        EntityKind::Resource | EntityKind::Comment | EntityKind::Rating | EntityKind::Bookmark,
        _,
      ) => is_owner,
      (EntityKind::Category, _) => is_owner || moderator,
      (EntityKind::Tag | EntityKind::Flag, _) => moderator,
      (EntityKind::Actor, Capability::Delete) => is_owner || moderator,
      (EntityKind::Actor, _) => is_owner,
    }
  }
}

/// Fail with [`Error::Forbidden`] carrying `message` unless permitted.
pub fn require(
  authz: &dyn Authorizer,
  actor: &Actor,
  target: Protected,
  capability: Capability,
  message: &str,
) -> Result<()> {
  if authz.permits(actor, target, capability) {
    Ok(())
  } else {
    tracing::debug!(
      actor_id = %actor.actor_id,
      kind = %target.kind,
      ?capability,
      "authorization denied"
    );
    Err(Error::forbidden(message))
  }
}
