//! Resources and the comments attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;
pub const URL_MAX: usize = 200;

// ─── Resource ────────────────────────────────────────────────────────────────

/// A catalogued link with its derived rating statistics.
///
/// `average_score` and `score_count` are owned by the aggregate maintainer
/// and are never written from caller input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
  pub resource_id:   Uuid,
  pub owner_id:      Uuid,
  pub title:         String,
  pub description:   String,
  pub url:           String,
  pub category_id:   Option<Uuid>,
  pub tag_ids:       Vec<Uuid>,
  pub average_score: f64,
  pub score_count:   u32,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Caller-supplied fields for a new resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewResource {
  pub title:       String,
  pub description: String,
  pub url:         String,
  pub category_id: Option<Uuid>,
  #[serde(default)]
  pub tag_ids:     Vec<Uuid>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceUpdate {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub url:         Option<String>,
  pub category_id: Option<Uuid>,
}

/// Filters for listing resources. All set filters must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
  pub owner_id:    Option<Uuid>,
  pub category_id: Option<Uuid>,
  pub tag_id:      Option<Uuid>,
  pub limit:       Option<usize>,
  pub offset:      Option<usize>,
}

pub fn validate_title(raw: &str) -> Result<String> {
  let title = raw.trim();
  if title.is_empty() {
    return Err(Error::invalid("title required"));
  }
  if title.chars().count() > TITLE_MAX {
    return Err(Error::invalid("title too long"));
  }
  Ok(title.to_owned())
}

pub fn validate_description(raw: &str) -> Result<String> {
  let description = raw.trim();
  let len = description.chars().count();
  if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&len) {
    return Err(Error::invalid(format!(
      "description must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"
    )));
  }
  Ok(description.to_owned())
}

/// Parses an absolute `http`/`https` URL with a host and returns its
/// normalized serialization, which is the form stored and compared for
/// uniqueness.
pub fn validate_url(raw: &str) -> Result<String> {
  let parsed = Url::parse(raw.trim()).map_err(|err| Error::invalid(format!("invalid url: {err}")))?;
  match parsed.scheme() {
    "http" | "https" => {}
    _ => return Err(Error::invalid("url must use http or https")),
  }
  if parsed.host_str().is_none_or(str::is_empty) {
    return Err(Error::invalid("url must have a host"));
  }

  let url = String::from(parsed);
  if url.chars().count() > URL_MAX {
    return Err(Error::invalid("url too long"));
  }
  Ok(url)
}

// ─── Comment ─────────────────────────────────────────────────────────────────

/// A comment on a resource. Author and resource are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id:  Uuid,
  pub actor_id:    Uuid,
  pub resource_id: Uuid,
  pub content:     String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

pub fn validate_comment(raw: &str) -> Result<String> {
  let content = raw.trim();
  if content.is_empty() {
    return Err(Error::invalid("content required"));
  }
  Ok(content.to_owned())
}
