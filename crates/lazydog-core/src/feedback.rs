//! Ratings and bookmarks: per-actor relationships to a resource.
//!
//! Both are limited to one row per `(actor, resource)` pair.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Score ───────────────────────────────────────────────────────────────────

/// A star score in `1..=5`. Construction is the only validation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  pub fn new(value: i64) -> Result<Self> {
    if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::invalid("score must be between 1 and 5"))
    }
  }

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<i64> for Score {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::new(value) }
}

impl From<Score> for u8 {
  fn from(score: Score) -> Self { score.0 }
}

impl fmt::Display for Score {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Rating ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
  pub rating_id:   Uuid,
  pub actor_id:    Uuid,
  pub resource_id: Uuid,
  pub score:       Score,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

// ─── Bookmark ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
  pub bookmark_id: Uuid,
  pub actor_id:    Uuid,
  pub resource_id: Uuid,
  pub created_at:  DateTime<Utc>,
}
