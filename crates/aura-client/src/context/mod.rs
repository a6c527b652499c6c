//! Per-actor session contexts.
//!
//! A [`SessionContext`] owns the only [`StateWriter`] of its actor's
//! container, so every change to the session goes through
//! [`refresh`](SessionContext::refresh). Actions never patch the record they
//! hold; they call the API and then refetch the authoritative copy.

mod company;
mod student;

use std::sync::Arc;

use aura_core::{
  Actor, Company, Credential, Student,
  hydrate::Hydrator,
  session::SessionStore,
  state::{Snapshot, StateReader, StateWriter, Trigger, container},
};

use crate::{ApiClient, Error, Result};

pub type StudentContext<S> = SessionContext<Student, S>;
pub type CompanyContext<S> = SessionContext<Company, S>;

pub struct SessionContext<A: Actor, S> {
  client:   Arc<ApiClient>,
  hydrator: Hydrator<A, S, ApiClient>,
  writer:   StateWriter<A::Record>,
}

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::SessionStore(Box::new(e))
}

impl<A: Actor, S: SessionStore> SessionContext<A, S> {
  /// A context with an uninitialised container. Nothing is fetched until the
  /// first [`refresh`](Self::refresh).
  pub fn new(client: Arc<ApiClient>, store: Arc<S>) -> Self {
    let (writer, _) = container();
    Self { hydrator: Hydrator::new(store, client.clone()), client, writer }
  }

  pub fn client(&self) -> &ApiClient { &self.client }

  pub fn reader(&self) -> StateReader<A::Record> { self.writer.reader() }

  pub fn snapshot(&self) -> Snapshot<A::Record> { self.writer.reader().snapshot() }

  /// Refetch the session and publish it.
  ///
  /// On failure the container is still marked initialised, with the session
  /// absent, and the error is returned to the caller.
  pub async fn refresh(&self, trigger: Trigger) -> Result<Snapshot<A::Record>> {
    tracing::debug!(actor = %A::KIND, %trigger, "refreshing session");
    match self.hydrator.hydrate().await {
      Ok(session) => {
        tracing::info!(
          actor = %A::KIND,
          %trigger,
          authenticated = session.is_some(),
          "session hydrated"
        );
        self.writer.complete_hydration(session);
        Ok(self.snapshot())
      }
      Err(e) => {
        tracing::warn!(actor = %A::KIND, %trigger, error = %e, "hydration failed; session treated as absent");
        self.writer.complete_hydration(None);
        Err(e.into())
      }
    }
  }

  // ── Credential plumbing ───────────────────────────────────────────────────

  async fn credential(&self) -> Result<Option<Credential>> {
    self.hydrator.store().get(A::KIND).await.map_err(store_error)
  }

  /// The stored credential, or [`Error::NotAuthenticated`].
  async fn require_credential(&self) -> Result<Credential> {
    self.credential().await?.ok_or(Error::NotAuthenticated)
  }

  async fn store_credential(&self, token: String) -> Result<()> {
    self
      .hydrator
      .store()
      .set(A::KIND, Credential::new(token))
      .await
      .map_err(store_error)
  }

  async fn clear_credential(&self) -> Result<()> {
    self.hydrator.store().clear(A::KIND).await.map_err(store_error)
  }

  /// Pass `outcome` through. A 401 from an authenticated call invalidates
  /// the session the same way a rejected hydration does.
  async fn settle<T>(&self, outcome: Result<T>) -> Result<T> {
    if let Err(e) = &outcome
      && e.is_unauthorized()
    {
      tracing::info!(actor = %A::KIND, "credential rejected; clearing session");
      self.clear_credential().await?;
      self.writer.complete_hydration(None);
    }
    outcome
  }

  /// Best-effort server logout; the local credential is cleared regardless.
  async fn logout_at(&self, path: &str) -> Result<Snapshot<A::Record>> {
    let credential = self.credential().await?;
    if let Err(e) = self.client.post_empty(path, credential.as_ref()).await {
      tracing::debug!(actor = %A::KIND, error = %e, "logout call failed; clearing locally");
    }
    self.clear_credential().await?;
    self.refresh(Trigger::Action("logout")).await
  }
}
