//! Actor: the authenticated principal behind every mutation.
//!
//! Credentials live upstream; the catalog only records identity and whether
//! the actor may moderate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

pub const USERNAME_MAX: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub actor_id:     Uuid,
  pub username:     String,
  pub is_moderator: bool,
  pub created_at:   DateTime<Utc>,
}

impl Actor {
  /// Build a new actor, trimming and validating `username`.
  pub fn new(username: &str, is_moderator: bool) -> Result<Self> {
    let username = username.trim();
    if username.is_empty() {
      return Err(Error::invalid("username required"));
    }
    if username.chars().count() > USERNAME_MAX {
      return Err(Error::invalid("username too long"));
    }
    Ok(Self {
      actor_id: Uuid::new_v4(),
      username: username.to_owned(),
      is_moderator,
      created_at: Utc::now(),
    })
  }
}
