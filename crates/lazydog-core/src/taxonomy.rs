//! Categories and tags: the named entities that classify resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

pub const CATEGORY_NAME_MAX: usize = 200;
pub const CATEGORY_DESCRIPTION_MAX: usize = 500;
pub const TAG_NAME_MAX: usize = 255;

/// A category. `name` is stored title-cased and is unique regardless of
/// case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub category_id: Uuid,
  pub owner_id:    Uuid,
  pub name:        String,
  pub description: String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Partial category update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
  pub name:        Option<String>,
  pub description: Option<String>,
}

/// A tag. `name` is unique as stored (case-sensitive); `slug` is derived
/// from the name once, at creation, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub tag_id:      Uuid,
  pub name:        String,
  pub description: String,
  pub slug:        String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

pub fn validate_category_description(raw: &str) -> Result<String> {
  let description = raw.trim();
  if description.chars().count() > CATEGORY_DESCRIPTION_MAX {
    return Err(Error::invalid("description too long"));
  }
  Ok(description.to_owned())
}
