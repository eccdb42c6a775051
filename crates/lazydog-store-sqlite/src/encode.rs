//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings,
//! enums snake_case strings.

use chrono::{DateTime, Utc};
use lazydog_core::{
  actor::Actor,
  feedback::{Bookmark, Rating, Score},
  moderation::{Flag, FlagStatus, FlagTarget},
  resource::{Comment, Resource},
  taxonomy::{Category, Tag},
};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_status(status: FlagStatus) -> &'static str {
  match status {
    FlagStatus::Pending => "pending",
    FlagStatus::Reviewed => "reviewed",
    FlagStatus::Rejected => "rejected",
  }
}

pub fn decode_status(s: &str) -> Result<FlagStatus> {
  match s {
    "pending" => Ok(FlagStatus::Pending),
    "reviewed" => Ok(FlagStatus::Reviewed),
    "rejected" => Ok(FlagStatus::Rejected),
    other => Err(Error::Corrupt { column: "flags.status", value: other.to_owned() }),
  }
}

pub fn decode_score(value: i64) -> Result<Score> {
  Score::new(value).map_err(|_| Error::Corrupt {
    column: "ratings.score",
    value:  value.to_string(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const ACTOR_COLUMNS: &str = "actor_id, username, is_moderator, created_at";

/// Raw values read from an `actors` row.
pub struct RawActor {
  pub actor_id:     String,
  pub username:     String,
  pub is_moderator: bool,
  pub created_at:   String,
}

impl RawActor {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      actor_id:     row.get(0)?,
      username:     row.get(1)?,
      is_moderator: row.get(2)?,
      created_at:   row.get(3)?,
    })
  }

  pub fn into_actor(self) -> Result<Actor> {
    Ok(Actor {
      actor_id:     decode_uuid(&self.actor_id)?,
      username:     self.username,
      is_moderator: self.is_moderator,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub const RESOURCE_COLUMNS: &str = "r.resource_id, r.owner_id, r.category_id, r.title, \
  r.description, r.url, r.average_score, r.score_count, r.created_at, r.updated_at";

/// Raw values read from a `resources` row (aliased `r`). Tag links are
/// loaded separately.
pub struct RawResource {
  pub resource_id:   String,
  pub owner_id:      String,
  pub category_id:   Option<String>,
  pub title:         String,
  pub description:   String,
  pub url:           String,
  pub average_score: f64,
  pub score_count:   u32,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawResource {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      resource_id:   row.get(0)?,
      owner_id:      row.get(1)?,
      category_id:   row.get(2)?,
      title:         row.get(3)?,
      description:   row.get(4)?,
      url:           row.get(5)?,
      average_score: row.get(6)?,
      score_count:   row.get(7)?,
      created_at:    row.get(8)?,
      updated_at:    row.get(9)?,
    })
  }

  pub fn into_resource(self, tag_ids: Vec<Uuid>) -> Result<Resource> {
    Ok(Resource {
      resource_id:   decode_uuid(&self.resource_id)?,
      owner_id:      decode_uuid(&self.owner_id)?,
      title:         self.title,
      description:   self.description,
      url:           self.url,
      category_id:   decode_opt_uuid(self.category_id)?,
      tag_ids,
      average_score: self.average_score,
      score_count:   self.score_count,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

pub const COMMENT_COLUMNS: &str =
  "comment_id, actor_id, resource_id, content, created_at, updated_at";

pub struct RawComment {
  pub comment_id:  String,
  pub actor_id:    String,
  pub resource_id: String,
  pub content:     String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawComment {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      comment_id:  row.get(0)?,
      actor_id:    row.get(1)?,
      resource_id: row.get(2)?,
      content:     row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id:  decode_uuid(&self.comment_id)?,
      actor_id:    decode_uuid(&self.actor_id)?,
      resource_id: decode_uuid(&self.resource_id)?,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const RATING_COLUMNS: &str =
  "rating_id, actor_id, resource_id, score, created_at, updated_at";

pub struct RawRating {
  pub rating_id:   String,
  pub actor_id:    String,
  pub resource_id: String,
  pub score:       i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawRating {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      rating_id:   row.get(0)?,
      actor_id:    row.get(1)?,
      resource_id: row.get(2)?,
      score:       row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  pub fn into_rating(self) -> Result<Rating> {
    Ok(Rating {
      rating_id:   decode_uuid(&self.rating_id)?,
      actor_id:    decode_uuid(&self.actor_id)?,
      resource_id: decode_uuid(&self.resource_id)?,
      score:       decode_score(self.score)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const BOOKMARK_COLUMNS: &str = "bookmark_id, actor_id, resource_id, created_at";

pub struct RawBookmark {
  pub bookmark_id: String,
  pub actor_id:    String,
  pub resource_id: String,
  pub created_at:  String,
}

impl RawBookmark {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      bookmark_id: row.get(0)?,
      actor_id:    row.get(1)?,
      resource_id: row.get(2)?,
      created_at:  row.get(3)?,
    })
  }

  pub fn into_bookmark(self) -> Result<Bookmark> {
    Ok(Bookmark {
      bookmark_id: decode_uuid(&self.bookmark_id)?,
      actor_id:    decode_uuid(&self.actor_id)?,
      resource_id: decode_uuid(&self.resource_id)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const FLAG_COLUMNS: &str = "flag_id, actor_id, resource_id, comment_id, reason, status, \
  reviewed_by, reviewed_at, created_at, updated_at";

pub struct RawFlag {
  pub flag_id:     String,
  pub actor_id:    String,
  pub resource_id: Option<String>,
  pub comment_id:  Option<String>,
  pub reason:      String,
  pub status:      String,
  pub reviewed_by: Option<String>,
  pub reviewed_at: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawFlag {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      flag_id:     row.get(0)?,
      actor_id:    row.get(1)?,
      resource_id: row.get(2)?,
      comment_id:  row.get(3)?,
      reason:      row.get(4)?,
      status:      row.get(5)?,
      reviewed_by: row.get(6)?,
      reviewed_at: row.get(7)?,
      created_at:  row.get(8)?,
      updated_at:  row.get(9)?,
    })
  }

  pub fn into_flag(self) -> Result<Flag> {
    let target = FlagTarget::from_parts(
      decode_opt_uuid(self.resource_id)?,
      decode_opt_uuid(self.comment_id)?,
    )
    .map_err(|_| Error::Corrupt {
      column: "flags.resource_id/comment_id",
      value:  self.flag_id.clone(),
    })?;

    Ok(Flag {
      flag_id: decode_uuid(&self.flag_id)?,
      actor_id: decode_uuid(&self.actor_id)?,
      target,
      reason: self.reason,
      status: decode_status(&self.status)?,
      reviewed_by: decode_opt_uuid(self.reviewed_by)?,
      reviewed_at: self.reviewed_at.as_deref().map(decode_dt).transpose()?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const CATEGORY_COLUMNS: &str =
  "category_id, owner_id, name, description, created_at, updated_at";

pub struct RawCategory {
  pub category_id: String,
  pub owner_id:    String,
  pub name:        String,
  pub description: String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawCategory {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      category_id: row.get(0)?,
      owner_id:    row.get(1)?,
      name:        row.get(2)?,
      description: row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category {
      category_id: decode_uuid(&self.category_id)?,
      owner_id:    decode_uuid(&self.owner_id)?,
      name:        self.name,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const TAG_COLUMNS: &str = "tag_id, name, description, slug, created_at, updated_at";

pub struct RawTag {
  pub tag_id:      String,
  pub name:        String,
  pub description: String,
  pub slug:        String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawTag {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      tag_id:      row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      slug:        row.get(3)?,
      created_at:  row.get(4)?,
      updated_at:  row.get(5)?,
    })
  }

  pub fn into_tag(self) -> Result<Tag> {
    Ok(Tag {
      tag_id:      decode_uuid(&self.tag_id)?,
      name:        self.name,
      description: self.description,
      slug:        self.slug,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}
