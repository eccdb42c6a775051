//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::{path::Path, time::Duration};

use rusqlite::TransactionBehavior;

use lazydog_core::store::{CatalogStore, Transaction};

use crate::{Result, schema::SCHEMA, unit::SqliteUnit};

/// How long a writer waits on another connection's lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lazydog catalog backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema ready");
    Ok(())
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  async fn transact<T, F>(&self, unit: F) -> lazydog_core::Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut dyn Transaction) -> lazydog_core::Result<T> + Send + 'static,
  {
    // The outer result carries connection failures; the inner one is the
    // unit's own outcome. Returning without commit drops `tx`, which rolls
    // back.
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let result = {
          let mut work = SqliteUnit::new(&tx);
          unit(&mut work)
        };
        match result {
          Ok(value) => {
            tx.commit()?;
            Ok(Ok(value))
          }
          Err(err) => Ok(Err(err)),
        }
      })
      .await
      .map_err(crate::Error::from)?;

    if let Err(err) = &outcome {
      tracing::debug!(error = %err, "transaction rolled back");
    }
    outcome
  }
}
