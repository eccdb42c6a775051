//! Flags and their moderation lifecycle.
//!
//! ```text
//! Pending ──► Reviewed   (terminal)
//!    └──────► Rejected   (terminal)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  actor::Actor,
  authz::{Authorizer, Capability, EntityKind, Protected, require},
};

// ─── Target ──────────────────────────────────────────────────────────────────

/// What a flag points at. Exactly one target, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum FlagTarget {
  Resource(Uuid),
  Comment(Uuid),
}

impl FlagTarget {
  /// Build a target from the two optional references a caller submits.
  pub fn from_parts(resource_id: Option<Uuid>, comment_id: Option<Uuid>) -> Result<Self> {
    match (resource_id, comment_id) {
      (Some(id), None) => Ok(Self::Resource(id)),
      (None, Some(id)) => Ok(Self::Comment(id)),
      _ => Err(Error::invalid("exactly one target required")),
    }
  }

  pub fn kind(self) -> EntityKind {
    match self {
      Self::Resource(_) => EntityKind::Resource,
      Self::Comment(_) => EntityKind::Comment,
    }
  }

  pub fn id(self) -> Uuid {
    match self {
      Self::Resource(id) | Self::Comment(id) => id,
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagStatus {
  Pending,
  Reviewed,
  Rejected,
}

/// Filters for listing flags. All set filters must match.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FlagQuery {
  pub actor_id:    Option<Uuid>,
  pub resource_id: Option<Uuid>,
  pub comment_id:  Option<Uuid>,
  pub status:      Option<FlagStatus>,
}

/// The outcome a moderator assigns to a pending flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
  Reviewed,
  Rejected,
}

impl FlagStatus {
  pub fn is_terminal(self) -> bool { !matches!(self, Self::Pending) }

  /// The status reached by applying `decision`.
  pub fn apply(self, decision: ReviewDecision) -> Result<Self> {
    match self {
      Self::Pending => Ok(match decision {
        ReviewDecision::Reviewed => Self::Reviewed,
        ReviewDecision::Rejected => Self::Rejected,
      }),
      Self::Reviewed | Self::Rejected => Err(Error::invalid("flag already resolved")),
    }
  }
}

// ─── Flag ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
  pub flag_id:     Uuid,
  pub actor_id:    Uuid,
  pub target:      FlagTarget,
  pub reason:      String,
  pub status:      FlagStatus,
  pub reviewed_by: Option<Uuid>,
  pub reviewed_at: Option<DateTime<Utc>>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Flag {
  /// A new pending flag raised by `actor_id`.
  pub fn new(actor_id: Uuid, target: FlagTarget, reason: &str) -> Result<Self> {
    let reason = reason.trim();
    if reason.is_empty() {
      return Err(Error::invalid("reason required"));
    }
    let now = Utc::now();
    Ok(Self {
      flag_id: Uuid::new_v4(),
      actor_id,
      target,
      reason: reason.to_owned(),
      status: FlagStatus::Pending,
      reviewed_by: None,
      reviewed_at: None,
      created_at: now,
      updated_at: now,
    })
  }

  /// Resolve the flag. Only actors allowed to review flags may call this,
  /// and only while the flag is pending.
  pub fn review(
    &mut self,
    reviewer: &Actor,
    authz: &dyn Authorizer,
    decision: ReviewDecision,
    at: DateTime<Utc>,
  ) -> Result<()> {
    require(
      authz,
      reviewer,
      Protected::unowned(EntityKind::Flag),
      Capability::Review,
      "moderator required",
    )?;
    self.status = self.status.apply(decision)?;
    self.reviewed_by = Some(reviewer.actor_id);
    self.reviewed_at = Some(at);
    self.updated_at = at;
    Ok(())
  }
}
