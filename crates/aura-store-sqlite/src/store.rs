//! [`SqliteSessionStore`]: the SQLite implementation of [`SessionStore`].

use std::path::Path;

use aura_core::{ActorKind, Credential, session::SessionStore};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{Result, error::Error, schema::SCHEMA};

/// A session store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSessionStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteSessionStore {
  /// Open (or create) a store at `path`, creating parent directories as
  /// needed.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened session store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
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
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl SessionStore for SqliteSessionStore {
  type Error = Error;

  async fn get(&self, actor: ActorKind) -> Result<Option<Credential>> {
    let key = actor.credential_key();
    let token: Option<String> = self
      .conn
      .call(move |conn| {
        let token = conn
          .query_row(
            "SELECT token FROM sessions WHERE actor = ?1",
            rusqlite::params![key],
            |r| r.get(0),
          )
          .optional()?;
        Ok(token)
      })
      .await?;
    Ok(token.map(Credential::new))
  }

  async fn set(&self, actor: ActorKind, credential: Credential) -> Result<()> {
    let key = actor.credential_key();
    let token = credential.as_str().to_owned();
    let updated_at = Utc::now().to_rfc3339();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (actor, token, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(actor) DO UPDATE SET
             token = excluded.token,
             updated_at = excluded.updated_at",
          rusqlite::params![key, token, updated_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear(&self, actor: ActorKind) -> Result<()> {
    let key = actor.credential_key();
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM sessions WHERE actor = ?1", rusqlite::params![key])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
