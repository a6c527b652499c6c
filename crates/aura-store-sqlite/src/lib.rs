//! SQLite backend for the Aura session store.
//!
//! Persists one credential per actor so a session survives process restarts.
//! All database access runs through [`tokio_rusqlite`] on its own thread.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSessionStore;
