//! SQL schema for the Lazydog SQLite store.
//!
//! Executed once at connection startup. The UNIQUE and CHECK constraints
//! back the in-process guard and decide the outcome when two transactions
//! race past it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS actors (
    actor_id      TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    is_moderator  INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    category_id  TEXT PRIMARY KEY,
    owner_id     TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    name         TEXT NOT NULL,
    name_key     TEXT NOT NULL UNIQUE,   -- ASCII-lowercased name
    description  TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    tag_id       TEXT PRIMARY KEY,
    name         TEXT NOT NULL UNIQUE,
    description  TEXT NOT NULL DEFAULT '',
    slug         TEXT NOT NULL UNIQUE CHECK (slug != ''),
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

-- average_score / score_count are derived from ratings and only written by
-- the aggregate recompute.
CREATE TABLE IF NOT EXISTS resources (
    resource_id    TEXT PRIMARY KEY,
    owner_id       TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    category_id    TEXT REFERENCES categories(category_id) ON DELETE SET NULL,
    title          TEXT NOT NULL,
    description    TEXT NOT NULL,
    url            TEXT NOT NULL UNIQUE,
    average_score  REAL NOT NULL DEFAULT 0.0,
    score_count    INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL,
    UNIQUE (owner_id, title)
);

CREATE TABLE IF NOT EXISTS resource_tags (
    resource_id  TEXT NOT NULL REFERENCES resources(resource_id) ON DELETE CASCADE,
    tag_id       TEXT NOT NULL REFERENCES tags(tag_id) ON DELETE CASCADE,
    position     INTEGER NOT NULL,
    PRIMARY KEY (resource_id, tag_id)
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id   TEXT PRIMARY KEY,
    actor_id     TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    resource_id  TEXT NOT NULL REFERENCES resources(resource_id) ON DELETE CASCADE,
    content      TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ratings (
    rating_id    TEXT PRIMARY KEY,
    actor_id     TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    resource_id  TEXT NOT NULL REFERENCES resources(resource_id) ON DELETE CASCADE,
    score        INTEGER NOT NULL CHECK (score BETWEEN 1 AND 5),
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL,
    UNIQUE (actor_id, resource_id)
);

CREATE TABLE IF NOT EXISTS bookmarks (
    bookmark_id  TEXT PRIMARY KEY,
    actor_id     TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    resource_id  TEXT NOT NULL REFERENCES resources(resource_id) ON DELETE CASCADE,
    created_at   TEXT NOT NULL,
    UNIQUE (actor_id, resource_id)
);

-- Exactly one of resource_id / comment_id is set. NULLs are distinct in
-- UNIQUE, so each pair constraint only bites for its own target kind.
CREATE TABLE IF NOT EXISTS flags (
    flag_id      TEXT PRIMARY KEY,
    actor_id     TEXT NOT NULL REFERENCES actors(actor_id) ON DELETE CASCADE,
    resource_id  TEXT REFERENCES resources(resource_id) ON DELETE CASCADE,
    comment_id   TEXT REFERENCES comments(comment_id) ON DELETE CASCADE,
    reason       TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'pending'
                 CHECK (status IN ('pending', 'reviewed', 'rejected')),
    reviewed_by  TEXT REFERENCES actors(actor_id) ON DELETE SET NULL,
    reviewed_at  TEXT,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL,
    CHECK ((resource_id IS NULL) != (comment_id IS NULL)),
    UNIQUE (actor_id, resource_id),
    UNIQUE (actor_id, comment_id)
);

CREATE INDEX IF NOT EXISTS resources_owner_idx     ON resources(owner_id);
CREATE INDEX IF NOT EXISTS resources_category_idx  ON resources(category_id);
CREATE INDEX IF NOT EXISTS resource_tags_tag_idx   ON resource_tags(tag_id);
CREATE INDEX IF NOT EXISTS comments_resource_idx   ON comments(resource_id);
CREATE INDEX IF NOT EXISTS ratings_resource_idx    ON ratings(resource_id);
CREATE INDEX IF NOT EXISTS bookmarks_actor_idx     ON bookmarks(actor_id);
CREATE INDEX IF NOT EXISTS flags_status_idx        ON flags(status);

PRAGMA user_version = 1;
";
