//! The `SessionStore` trait and an in-memory implementation.
//!
//! A session store holds at most one [`Credential`] per [`ActorKind`]. It is
//! a storage passthrough: no validation, no expiry, no logic beyond
//! get / set / clear. Persistent backends live in other crates
//! (e.g. `aura-store-sqlite`).

use std::{collections::HashMap, convert::Infallible, future::Future, sync::RwLock};

use crate::actor::{ActorKind, Credential};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the client-side credential store.
///
/// All methods return `Send` futures so the trait can be shared across a
/// multi-threaded tokio runtime.
pub trait SessionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The stored credential for `actor`, if any. No side effects.
  fn get(
    &self,
    actor: ActorKind,
  ) -> impl Future<Output = Result<Option<Credential>, Self::Error>> + Send + '_;

  /// Store `credential` for `actor`, overwriting unconditionally.
  fn set(
    &self,
    actor: ActorKind,
    credential: Credential,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the credential for `actor`. Clearing an absent credential is not
  /// an error.
  fn clear(
    &self,
    actor: ActorKind,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// A process-local store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
  slots: RwLock<HashMap<ActorKind, Credential>>,
}

impl MemorySessionStore {
  pub fn new() -> Self { Self::default() }
}

impl SessionStore for MemorySessionStore {
  type Error = Infallible;

  async fn get(&self, actor: ActorKind) -> Result<Option<Credential>, Infallible> {
    let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
    Ok(slots.get(&actor).cloned())
  }

  async fn set(&self, actor: ActorKind, credential: Credential) -> Result<(), Infallible> {
    let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
    slots.insert(actor, credential);
    Ok(())
  }

  async fn clear(&self, actor: ActorKind) -> Result<(), Infallible> {
    let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
    slots.remove(&actor);
    Ok(())
  }
}
