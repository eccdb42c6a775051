//! Process wiring for the Lazydog server: configuration and the top-level
//! router.

use std::path::{Path, PathBuf};

use axum::Router;
use lazydog_core::{Catalog, store::CatalogStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Environment variables with this prefix override file settings, e.g.
/// `LAZYDOG_PORT=9000`.
pub const ENV_PREFIX: &str = "LAZYDOG";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Layer defaults, the optional TOML file at `path`, and `LAZYDOG_*`
/// environment variables, in increasing priority.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "~/.local/share/lazydog/catalog.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix(ENV_PREFIX))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API mounted under `/api`, with request tracing.
pub fn router<S>(catalog: Catalog<S>) -> Router
where
  S: CatalogStore + Clone + 'static,
{
  Router::new()
    .nest("/api", lazydog_api::api_router(catalog))
    .layer(TraceLayer::new_for_http())
}
