//! [`SqliteUnit`]: the [`Transaction`] implementation handed to catalog
//! closures.
//!
//! A unit borrows the connection of an open `rusqlite::Transaction`; it never
//! commits or rolls back itself. Queries are written against a private
//! `crate::Result` and converted to the core error at the trait boundary.

use rusqlite::{Connection, OptionalExtension as _, params};
use uuid::Uuid;

use lazydog_core::{
  actor::Actor,
  aggregate::ScoreSummary,
  feedback::{Bookmark, Rating, Score},
  moderation::{Flag, FlagQuery, FlagTarget},
  normalize::category_name_key,
  resource::{Comment, Resource, ResourceQuery},
  store::Transaction,
  taxonomy::{Category, Tag},
};

use crate::{
  Result,
  encode::{
    ACTOR_COLUMNS, BOOKMARK_COLUMNS, CATEGORY_COLUMNS, COMMENT_COLUMNS, FLAG_COLUMNS,
    RATING_COLUMNS, RESOURCE_COLUMNS, RawActor, RawBookmark, RawCategory, RawComment, RawFlag,
    RawRating, RawResource, RawTag, TAG_COLUMNS, decode_score, decode_uuid, encode_dt,
    encode_status, encode_uuid,
  },
  error::remap_unique,
};

type CoreResult<T> = lazydog_core::Result<T>;

const DEFAULT_LIMIT: usize = 100;

pub struct SqliteUnit<'c> {
  conn: &'c Connection,
}

impl<'c> SqliteUnit<'c> {
  pub fn new(conn: &'c Connection) -> Self { Self { conn } }

  fn exists(&self, sql: &str, params: impl rusqlite::Params) -> Result<bool> {
    Ok(self.conn.query_row(sql, params, |_| Ok(())).optional()?.is_some())
  }

  fn tag_ids_for(&self, resource_id: &str) -> Result<Vec<Uuid>> {
    let mut stmt = self.conn.prepare_cached(
      "SELECT tag_id FROM resource_tags WHERE resource_id = ?1 ORDER BY position",
    )?;
    let ids = stmt
      .query_map(params![resource_id], |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    ids.iter().map(|id| decode_uuid(id)).collect()
  }

  fn hydrate_resources(&self, raws: Vec<RawResource>) -> Result<Vec<Resource>> {
    raws
      .into_iter()
      .map(|raw| {
        let tag_ids = self.tag_ids_for(&raw.resource_id)?;
        raw.into_resource(tag_ids)
      })
      .collect()
  }

  fn write_tags(&self, resource_id: &str, tag_ids: &[Uuid]) -> Result<()> {
    self
      .conn
      .execute("DELETE FROM resource_tags WHERE resource_id = ?1", params![resource_id])?;
    let mut stmt = self.conn.prepare_cached(
      "INSERT INTO resource_tags (resource_id, tag_id, position) VALUES (?1, ?2, ?3)",
    )?;
    for (position, tag_id) in tag_ids.iter().enumerate() {
      stmt.execute(params![resource_id, encode_uuid(*tag_id), position as i64])?;
    }
    Ok(())
  }

  // ── Actors ────────────────────────────────────────────────────────────────

  fn get_actor(&self, actor_id: Uuid) -> Result<Option<Actor>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {ACTOR_COLUMNS} FROM actors WHERE actor_id = ?1"),
        params![encode_uuid(actor_id)],
        RawActor::from_row,
      )
      .optional()?;
    raw.map(RawActor::into_actor).transpose()
  }

  fn insert_actor(&self, actor: &Actor) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO actors (actor_id, username, is_moderator, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
          encode_uuid(actor.actor_id),
          actor.username,
          actor.is_moderator,
          encode_dt(actor.created_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("actors.username", "username taken")]))?;
    Ok(())
  }

  fn resources_rated_by(&self, actor_id: Uuid) -> Result<Vec<Uuid>> {
    let mut stmt = self.conn.prepare(
      "SELECT DISTINCT ra.resource_id
       FROM ratings ra
       JOIN resources r ON r.resource_id = ra.resource_id
       WHERE ra.actor_id = ?1 AND r.owner_id != ?1",
    )?;
    let ids = stmt
      .query_map(params![encode_uuid(actor_id)], |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    ids.iter().map(|id| decode_uuid(id)).collect()
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  fn get_resource(&self, resource_id: Uuid) -> Result<Option<Resource>> {
    let id_str = encode_uuid(resource_id);
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {RESOURCE_COLUMNS} FROM resources r WHERE r.resource_id = ?1"),
        params![id_str],
        RawResource::from_row,
      )
      .optional()?;
    match raw {
      Some(raw) => {
        let tag_ids = self.tag_ids_for(&id_str)?;
        Ok(Some(raw.into_resource(tag_ids)?))
      }
      None => Ok(None),
    }
  }

  fn list_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>> {
    let owner = query.owner_id.map(encode_uuid);
    let category = query.category_id.map(encode_uuid);
    let tag = query.tag_id.map(encode_uuid);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT) as i64;
    let offset = query.offset.unwrap_or(0) as i64;

    // Unset filters bind NULL and match everything.
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {RESOURCE_COLUMNS}
       FROM resources r
       WHERE (?1 IS NULL OR r.owner_id = ?1)
         AND (?2 IS NULL OR r.category_id = ?2)
         AND (?3 IS NULL OR EXISTS (
               SELECT 1 FROM resource_tags rt
               WHERE rt.resource_id = r.resource_id AND rt.tag_id = ?3))
       ORDER BY r.created_at DESC, r.rowid DESC
       LIMIT ?4 OFFSET ?5"
    ))?;
    let raws = stmt
      .query_map(params![owner, category, tag, limit, offset], RawResource::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    self.hydrate_resources(raws)
  }

  fn insert_resource(&self, resource: &Resource) -> Result<()> {
    let id_str = encode_uuid(resource.resource_id);
    self
      .conn
      .execute(
        "INSERT INTO resources (
           resource_id, owner_id, category_id, title, description, url,
           average_score, score_count, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
          id_str,
          encode_uuid(resource.owner_id),
          resource.category_id.map(encode_uuid),
          resource.title,
          resource.description,
          resource.url,
          resource.average_score,
          resource.score_count,
          encode_dt(resource.created_at),
          encode_dt(resource.updated_at),
        ],
      )
      .map_err(remap_resource_conflict)?;
    self.write_tags(&id_str, &resource.tag_ids)
  }

  fn update_resource(&self, resource: &Resource) -> Result<()> {
    self
      .conn
      .execute(
        "UPDATE resources
         SET title = ?2, description = ?3, url = ?4, category_id = ?5, updated_at = ?6
         WHERE resource_id = ?1",
        params![
          encode_uuid(resource.resource_id),
          resource.title,
          resource.description,
          resource.url,
          resource.category_id.map(encode_uuid),
          encode_dt(resource.updated_at),
        ],
      )
      .map_err(remap_resource_conflict)?;
    Ok(())
  }

  fn set_aggregate(&self, resource_id: Uuid, summary: ScoreSummary) -> Result<()> {
    self.conn.execute(
      "UPDATE resources SET average_score = ?2, score_count = ?3 WHERE resource_id = ?1",
      params![encode_uuid(resource_id), summary.average_score, summary.score_count],
    )?;
    Ok(())
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = ?1"),
        params![encode_uuid(comment_id)],
        RawComment::from_row,
      )
      .optional()?;
    raw.map(RawComment::into_comment).transpose()
  }

  fn list_comments(&self, resource_id: Uuid) -> Result<Vec<Comment>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {COMMENT_COLUMNS} FROM comments
       WHERE resource_id = ?1
       ORDER BY created_at, rowid"
    ))?;
    let raws = stmt
      .query_map(params![encode_uuid(resource_id)], RawComment::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawComment::into_comment).collect()
  }

  fn insert_comment(&self, comment: &Comment) -> Result<()> {
    self.conn.execute(
      "INSERT INTO comments (comment_id, actor_id, resource_id, content, created_at, updated_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      params![
        encode_uuid(comment.comment_id),
        encode_uuid(comment.actor_id),
        encode_uuid(comment.resource_id),
        comment.content,
        encode_dt(comment.created_at),
        encode_dt(comment.updated_at),
      ],
    )?;
    Ok(())
  }

  fn update_comment(&self, comment: &Comment) -> Result<()> {
    self.conn.execute(
      "UPDATE comments SET content = ?2, updated_at = ?3 WHERE comment_id = ?1",
      params![
        encode_uuid(comment.comment_id),
        comment.content,
        encode_dt(comment.updated_at),
      ],
    )?;
    Ok(())
  }

  // ── Ratings ───────────────────────────────────────────────────────────────

  fn get_rating(&self, rating_id: Uuid) -> Result<Option<Rating>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {RATING_COLUMNS} FROM ratings WHERE rating_id = ?1"),
        params![encode_uuid(rating_id)],
        RawRating::from_row,
      )
      .optional()?;
    raw.map(RawRating::into_rating).transpose()
  }

  fn list_ratings(&self, resource_id: Uuid) -> Result<Vec<Rating>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {RATING_COLUMNS} FROM ratings
       WHERE resource_id = ?1
       ORDER BY created_at DESC, rowid DESC"
    ))?;
    let raws = stmt
      .query_map(params![encode_uuid(resource_id)], RawRating::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawRating::into_rating).collect()
  }

  fn scores_for_resource(&self, resource_id: Uuid) -> Result<Vec<Score>> {
    let mut stmt = self
      .conn
      .prepare_cached("SELECT score FROM ratings WHERE resource_id = ?1")?;
    let values = stmt
      .query_map(params![encode_uuid(resource_id)], |row| row.get::<_, i64>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    values.into_iter().map(decode_score).collect()
  }

  fn insert_rating(&self, rating: &Rating) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO ratings (rating_id, actor_id, resource_id, score, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
          encode_uuid(rating.rating_id),
          encode_uuid(rating.actor_id),
          encode_uuid(rating.resource_id),
          rating.score.get(),
          encode_dt(rating.created_at),
          encode_dt(rating.updated_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("ratings.actor_id", "already rated")]))?;
    Ok(())
  }

  fn update_rating(&self, rating: &Rating) -> Result<()> {
    self.conn.execute(
      "UPDATE ratings SET score = ?2, updated_at = ?3 WHERE rating_id = ?1",
      params![
        encode_uuid(rating.rating_id),
        rating.score.get(),
        encode_dt(rating.updated_at),
      ],
    )?;
    Ok(())
  }

  // ── Bookmarks ─────────────────────────────────────────────────────────────

  fn get_bookmark(&self, bookmark_id: Uuid) -> Result<Option<Bookmark>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE bookmark_id = ?1"),
        params![encode_uuid(bookmark_id)],
        RawBookmark::from_row,
      )
      .optional()?;
    raw.map(RawBookmark::into_bookmark).transpose()
  }

  fn list_bookmarks(&self, actor_id: Uuid) -> Result<Vec<Bookmark>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {BOOKMARK_COLUMNS} FROM bookmarks
       WHERE actor_id = ?1
       ORDER BY created_at DESC, rowid DESC"
    ))?;
    let raws = stmt
      .query_map(params![encode_uuid(actor_id)], RawBookmark::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawBookmark::into_bookmark).collect()
  }

  fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO bookmarks (bookmark_id, actor_id, resource_id, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
          encode_uuid(bookmark.bookmark_id),
          encode_uuid(bookmark.actor_id),
          encode_uuid(bookmark.resource_id),
          encode_dt(bookmark.created_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("bookmarks.actor_id", "already bookmarked")]))?;
    Ok(())
  }

  // ── Flags ─────────────────────────────────────────────────────────────────

  fn get_flag(&self, flag_id: Uuid) -> Result<Option<Flag>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {FLAG_COLUMNS} FROM flags WHERE flag_id = ?1"),
        params![encode_uuid(flag_id)],
        RawFlag::from_row,
      )
      .optional()?;
    raw.map(RawFlag::into_flag).transpose()
  }

  fn flag_exists(&self, actor_id: Uuid, target: FlagTarget) -> Result<bool> {
    let sql = match target {
      FlagTarget::Resource(_) => "SELECT 1 FROM flags WHERE actor_id = ?1 AND resource_id = ?2",
      FlagTarget::Comment(_) => "SELECT 1 FROM flags WHERE actor_id = ?1 AND comment_id = ?2",
    };
    self.exists(sql, params![encode_uuid(actor_id), encode_uuid(target.id())])
  }

  fn list_flags(&self, query: &FlagQuery) -> Result<Vec<Flag>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {FLAG_COLUMNS} FROM flags
       WHERE (?1 IS NULL OR actor_id = ?1)
         AND (?2 IS NULL OR resource_id = ?2)
         AND (?3 IS NULL OR comment_id = ?3)
         AND (?4 IS NULL OR status = ?4)
       ORDER BY created_at DESC, rowid DESC"
    ))?;
    let raws = stmt
      .query_map(
        params![
          query.actor_id.map(encode_uuid),
          query.resource_id.map(encode_uuid),
          query.comment_id.map(encode_uuid),
          query.status.map(encode_status),
        ],
        RawFlag::from_row,
      )?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawFlag::into_flag).collect()
  }

  fn insert_flag(&self, flag: &Flag) -> Result<()> {
    let (resource_id, comment_id) = match flag.target {
      FlagTarget::Resource(id) => (Some(encode_uuid(id)), None),
      FlagTarget::Comment(id) => (None, Some(encode_uuid(id))),
    };
    self
      .conn
      .execute(
        "INSERT INTO flags (
           flag_id, actor_id, resource_id, comment_id, reason, status,
           reviewed_by, reviewed_at, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
          encode_uuid(flag.flag_id),
          encode_uuid(flag.actor_id),
          resource_id,
          comment_id,
          flag.reason,
          encode_status(flag.status),
          flag.reviewed_by.map(encode_uuid),
          flag.reviewed_at.map(encode_dt),
          encode_dt(flag.created_at),
          encode_dt(flag.updated_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("flags.actor_id", "already flagged")]))?;
    Ok(())
  }

  fn update_flag(&self, flag: &Flag) -> Result<()> {
    self.conn.execute(
      "UPDATE flags
       SET status = ?2, reviewed_by = ?3, reviewed_at = ?4, updated_at = ?5
       WHERE flag_id = ?1",
      params![
        encode_uuid(flag.flag_id),
        encode_status(flag.status),
        flag.reviewed_by.map(encode_uuid),
        flag.reviewed_at.map(encode_dt),
        encode_dt(flag.updated_at),
      ],
    )?;
    Ok(())
  }

  // ── Categories ────────────────────────────────────────────────────────────

  fn get_category(&self, category_id: Uuid) -> Result<Option<Category>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE category_id = ?1"),
        params![encode_uuid(category_id)],
        RawCategory::from_row,
      )
      .optional()?;
    raw.map(RawCategory::into_category).transpose()
  }

  fn list_categories(&self) -> Result<Vec<Category>> {
    let mut stmt = self
      .conn
      .prepare(&format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name_key"))?;
    let raws = stmt
      .query_map([], RawCategory::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawCategory::into_category).collect()
  }

  fn insert_category(&self, category: &Category) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO categories (
           category_id, owner_id, name, name_key, description, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
          encode_uuid(category.category_id),
          encode_uuid(category.owner_id),
          category.name,
          category_name_key(&category.name),
          category.description,
          encode_dt(category.created_at),
          encode_dt(category.updated_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("categories.name_key", "category exists")]))?;
    Ok(())
  }

  fn update_category(&self, category: &Category) -> Result<()> {
    self
      .conn
      .execute(
        "UPDATE categories
         SET name = ?2, name_key = ?3, description = ?4, updated_at = ?5
         WHERE category_id = ?1",
        params![
          encode_uuid(category.category_id),
          category.name,
          category_name_key(&category.name),
          category.description,
          encode_dt(category.updated_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("categories.name_key", "category exists")]))?;
    Ok(())
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  fn get_tag_where(&self, column: &str, value: &str) -> Result<Option<Tag>> {
    let raw = self
      .conn
      .query_row(
        &format!("SELECT {TAG_COLUMNS} FROM tags WHERE {column} = ?1"),
        params![value],
        RawTag::from_row,
      )
      .optional()?;
    raw.map(RawTag::into_tag).transpose()
  }

  fn list_tags(&self) -> Result<Vec<Tag>> {
    let mut stmt = self
      .conn
      .prepare(&format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY slug"))?;
    let raws = stmt
      .query_map([], RawTag::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawTag::into_tag).collect()
  }

  fn insert_tag(&self, tag: &Tag) -> Result<()> {
    self
      .conn
      .execute(
        "INSERT INTO tags (tag_id, name, description, slug, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
          encode_uuid(tag.tag_id),
          tag.name,
          tag.description,
          tag.slug,
          encode_dt(tag.created_at),
          encode_dt(tag.updated_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("tags.name", "tag exists"), ("tags.slug", "slug exists")]))?;
    Ok(())
  }

  fn update_tag(&self, tag: &Tag) -> Result<()> {
    self
      .conn
      .execute(
        "UPDATE tags SET name = ?2, description = ?3, updated_at = ?4 WHERE tag_id = ?1",
        params![
          encode_uuid(tag.tag_id),
          tag.name,
          tag.description,
          encode_dt(tag.updated_at),
        ],
      )
      .map_err(|e| remap_unique(e, &[("tags.name", "tag exists")]))?;
    Ok(())
  }

  fn delete_by_id(&self, table: &str, column: &str, id: Uuid) -> Result<()> {
    self
      .conn
      .execute(&format!("DELETE FROM {table} WHERE {column} = ?1"), params![encode_uuid(id)])?;
    Ok(())
  }
}

fn remap_resource_conflict(err: rusqlite::Error) -> crate::Error {
  remap_unique(err, &[
    ("resources.url", "url already registered"),
    ("resources.owner_id", "title already used"),
  ])
}

// ─── Transaction impl ────────────────────────────────────────────────────────

impl Transaction for SqliteUnit<'_> {
  // ── Actors ────────────────────────────────────────────────────────────────

  fn get_actor(&self, actor_id: Uuid) -> CoreResult<Option<Actor>> {
    Ok(SqliteUnit::get_actor(self, actor_id)?)
  }

  fn username_taken(&self, username: &str) -> CoreResult<bool> {
    Ok(self.exists("SELECT 1 FROM actors WHERE username = ?1", params![username])?)
  }

  fn insert_actor(&mut self, actor: &Actor) -> CoreResult<()> {
    Ok(SqliteUnit::insert_actor(self, actor)?)
  }

  fn delete_actor(&mut self, actor_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("actors", "actor_id", actor_id)?)
  }

  fn resources_rated_by(&self, actor_id: Uuid) -> CoreResult<Vec<Uuid>> {
    Ok(SqliteUnit::resources_rated_by(self, actor_id)?)
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  fn get_resource(&self, resource_id: Uuid) -> CoreResult<Option<Resource>> {
    Ok(SqliteUnit::get_resource(self, resource_id)?)
  }

  fn list_resources(&self, query: &ResourceQuery) -> CoreResult<Vec<Resource>> {
    Ok(SqliteUnit::list_resources(self, query)?)
  }

  fn url_taken(&self, url: &str, excluding: Option<Uuid>) -> CoreResult<bool> {
    Ok(self.exists(
      "SELECT 1 FROM resources WHERE url = ?1 AND (?2 IS NULL OR resource_id != ?2)",
      params![url, excluding.map(encode_uuid)],
    )?)
  }

  fn title_taken(&self, owner_id: Uuid, title: &str, excluding: Option<Uuid>) -> CoreResult<bool> {
    Ok(self.exists(
      "SELECT 1 FROM resources
       WHERE owner_id = ?1 AND title = ?2 AND (?3 IS NULL OR resource_id != ?3)",
      params![encode_uuid(owner_id), title, excluding.map(encode_uuid)],
    )?)
  }

  fn insert_resource(&mut self, resource: &Resource) -> CoreResult<()> {
    Ok(SqliteUnit::insert_resource(self, resource)?)
  }

  fn update_resource(&mut self, resource: &Resource) -> CoreResult<()> {
    Ok(SqliteUnit::update_resource(self, resource)?)
  }

  fn set_resource_tags(&mut self, resource_id: Uuid, tag_ids: &[Uuid]) -> CoreResult<()> {
    Ok(self.write_tags(&encode_uuid(resource_id), tag_ids)?)
  }

  fn delete_resource(&mut self, resource_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("resources", "resource_id", resource_id)?)
  }

  fn set_resource_aggregate(&mut self, resource_id: Uuid, summary: ScoreSummary) -> CoreResult<()> {
    Ok(self.set_aggregate(resource_id, summary)?)
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  fn get_comment(&self, comment_id: Uuid) -> CoreResult<Option<Comment>> {
    Ok(SqliteUnit::get_comment(self, comment_id)?)
  }

  fn list_comments(&self, resource_id: Uuid) -> CoreResult<Vec<Comment>> {
    Ok(SqliteUnit::list_comments(self, resource_id)?)
  }

  fn insert_comment(&mut self, comment: &Comment) -> CoreResult<()> {
    Ok(SqliteUnit::insert_comment(self, comment)?)
  }

  fn update_comment(&mut self, comment: &Comment) -> CoreResult<()> {
    Ok(SqliteUnit::update_comment(self, comment)?)
  }

  fn delete_comment(&mut self, comment_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("comments", "comment_id", comment_id)?)
  }

  // ── Ratings ───────────────────────────────────────────────────────────────

  fn get_rating(&self, rating_id: Uuid) -> CoreResult<Option<Rating>> {
    Ok(SqliteUnit::get_rating(self, rating_id)?)
  }

  fn rating_exists(&self, actor_id: Uuid, resource_id: Uuid) -> CoreResult<bool> {
    Ok(self.exists(
      "SELECT 1 FROM ratings WHERE actor_id = ?1 AND resource_id = ?2",
      params![encode_uuid(actor_id), encode_uuid(resource_id)],
    )?)
  }

  fn list_ratings(&self, resource_id: Uuid) -> CoreResult<Vec<Rating>> {
    Ok(SqliteUnit::list_ratings(self, resource_id)?)
  }

  fn scores_for_resource(&self, resource_id: Uuid) -> CoreResult<Vec<Score>> {
    Ok(SqliteUnit::scores_for_resource(self, resource_id)?)
  }

  fn insert_rating(&mut self, rating: &Rating) -> CoreResult<()> {
    Ok(SqliteUnit::insert_rating(self, rating)?)
  }

  fn update_rating(&mut self, rating: &Rating) -> CoreResult<()> {
    Ok(SqliteUnit::update_rating(self, rating)?)
  }

  fn delete_rating(&mut self, rating_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("ratings", "rating_id", rating_id)?)
  }

  // ── Bookmarks ─────────────────────────────────────────────────────────────

  fn get_bookmark(&self, bookmark_id: Uuid) -> CoreResult<Option<Bookmark>> {
    Ok(SqliteUnit::get_bookmark(self, bookmark_id)?)
  }

  fn bookmark_exists(&self, actor_id: Uuid, resource_id: Uuid) -> CoreResult<bool> {
    Ok(self.exists(
      "SELECT 1 FROM bookmarks WHERE actor_id = ?1 AND resource_id = ?2",
      params![encode_uuid(actor_id), encode_uuid(resource_id)],
    )?)
  }

  fn list_bookmarks(&self, actor_id: Uuid) -> CoreResult<Vec<Bookmark>> {
    Ok(SqliteUnit::list_bookmarks(self, actor_id)?)
  }

  fn insert_bookmark(&mut self, bookmark: &Bookmark) -> CoreResult<()> {
    Ok(SqliteUnit::insert_bookmark(self, bookmark)?)
  }

  fn delete_bookmark(&mut self, bookmark_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("bookmarks", "bookmark_id", bookmark_id)?)
  }

  // ── Flags ─────────────────────────────────────────────────────────────────

  fn get_flag(&self, flag_id: Uuid) -> CoreResult<Option<Flag>> {
    Ok(SqliteUnit::get_flag(self, flag_id)?)
  }

  fn flag_exists(&self, actor_id: Uuid, target: FlagTarget) -> CoreResult<bool> {
    Ok(SqliteUnit::flag_exists(self, actor_id, target)?)
  }

  fn list_flags(&self, query: &FlagQuery) -> CoreResult<Vec<Flag>> {
    Ok(SqliteUnit::list_flags(self, query)?)
  }

  fn insert_flag(&mut self, flag: &Flag) -> CoreResult<()> {
    Ok(SqliteUnit::insert_flag(self, flag)?)
  }

  fn update_flag(&mut self, flag: &Flag) -> CoreResult<()> {
    Ok(SqliteUnit::update_flag(self, flag)?)
  }

  fn delete_flag(&mut self, flag_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("flags", "flag_id", flag_id)?)
  }

  // ── Categories ────────────────────────────────────────────────────────────

  fn get_category(&self, category_id: Uuid) -> CoreResult<Option<Category>> {
    Ok(SqliteUnit::get_category(self, category_id)?)
  }

  fn list_categories(&self) -> CoreResult<Vec<Category>> {
    Ok(SqliteUnit::list_categories(self)?)
  }

  fn category_name_taken(&self, name_key: &str, excluding: Option<Uuid>) -> CoreResult<bool> {
    Ok(self.exists(
      "SELECT 1 FROM categories WHERE name_key = ?1 AND (?2 IS NULL OR category_id != ?2)",
      params![name_key, excluding.map(encode_uuid)],
    )?)
  }

  fn insert_category(&mut self, category: &Category) -> CoreResult<()> {
    Ok(SqliteUnit::insert_category(self, category)?)
  }

  fn update_category(&mut self, category: &Category) -> CoreResult<()> {
    Ok(SqliteUnit::update_category(self, category)?)
  }

  fn delete_category(&mut self, category_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("categories", "category_id", category_id)?)
  }

  // ── Tags ──────────────────────────────────────────────────────────────────

  fn get_tag(&self, tag_id: Uuid) -> CoreResult<Option<Tag>> {
    Ok(self.get_tag_where("tag_id", &encode_uuid(tag_id))?)
  }

  fn get_tag_by_slug(&self, slug: &str) -> CoreResult<Option<Tag>> {
    Ok(self.get_tag_where("slug", slug)?)
  }

  fn list_tags(&self) -> CoreResult<Vec<Tag>> {
    Ok(SqliteUnit::list_tags(self)?)
  }

  fn tag_name_taken(&self, name: &str, excluding: Option<Uuid>) -> CoreResult<bool> {
    Ok(self.exists(
      "SELECT 1 FROM tags WHERE name = ?1 AND (?2 IS NULL OR tag_id != ?2)",
      params![name, excluding.map(encode_uuid)],
    )?)
  }

  fn slug_taken(&self, slug: &str) -> CoreResult<bool> {
    Ok(self.exists("SELECT 1 FROM tags WHERE slug = ?1", params![slug])?)
  }

  fn insert_tag(&mut self, tag: &Tag) -> CoreResult<()> {
    Ok(SqliteUnit::insert_tag(self, tag)?)
  }

  fn update_tag(&mut self, tag: &Tag) -> CoreResult<()> {
    Ok(SqliteUnit::update_tag(self, tag)?)
  }

  fn delete_tag(&mut self, tag_id: Uuid) -> CoreResult<()> {
    Ok(self.delete_by_id("tags", "tag_id", tag_id)?)
  }
}
