//! Remote session hydration.
//!
//! [`Hydrator::hydrate`] turns the stored credential into an up-to-date
//! [`Session`], or into "absent". It is the only producer of identity
//! records; callers refetch through it after every state-mutating action
//! instead of patching what they hold.

use std::{future::Future, marker::PhantomData, sync::Arc};

use crate::{
  Error, Result,
  actor::{Actor, ActorKind, Credential},
  session::SessionStore,
  state::Session,
};

// ─── Identity source ─────────────────────────────────────────────────────────

/// What the authenticated identity read produced.
#[derive(Debug, Clone)]
pub enum Fetched {
  /// The raw response body, not yet parsed. A body that is not JSON at all
  /// fails validation the same way as one with the wrong shape.
  Document(Vec<u8>),
  /// The server refused the credential (HTTP 401).
  Rejected,
}

/// The authenticated "who am I" read. Implemented by the HTTP client.
pub trait IdentitySource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn fetch_identity<'a>(
    &'a self,
    actor: ActorKind,
    credential: &'a Credential,
  ) -> impl Future<Output = Result<Fetched, Self::Error>> + Send + 'a;
}

// ─── Hydrator ────────────────────────────────────────────────────────────────

/// Produces the current identity record for actor `A`.
pub struct Hydrator<A, S, I> {
  store:  Arc<S>,
  source: Arc<I>,
  _actor: PhantomData<fn() -> A>,
}

impl<A, S, I> Clone for Hydrator<A, S, I> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), source: self.source.clone(), _actor: PhantomData }
  }
}

impl<A, S, I> Hydrator<A, S, I>
where
  A: Actor,
  S: SessionStore,
  I: IdentitySource,
{
  pub fn new(store: Arc<S>, source: Arc<I>) -> Self {
    Self { store, source, _actor: PhantomData }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn source(&self) -> &Arc<I> { &self.source }

  /// Fetch and validate the identity record.
  ///
  /// - No stored credential: `Ok(None)` without touching the network.
  /// - Credential rejected: the credential is cleared, then `Ok(None)`.
  /// - Response is not JSON or fails shape validation: [`Error::Schema`].
  /// - Otherwise the validated session.
  ///
  /// Never writes the credential on success.
  pub async fn hydrate(&self) -> Result<Option<Session<A::Record>>> {
    let Some(credential) = self
      .store
      .get(A::KIND)
      .await
      .map_err(|e| Error::SessionStore(Box::new(e)))?
    else {
      tracing::debug!(actor = %A::KIND, "no stored credential; skipping identity read");
      return Ok(None);
    };

    let fetched = self
      .source
      .fetch_identity(A::KIND, &credential)
      .await
      .map_err(|e| Error::Source(Box::new(e)))?;

    match fetched {
      Fetched::Rejected => {
        tracing::info!(actor = %A::KIND, "credential rejected; clearing session");
        self
          .store
          .clear(A::KIND)
          .await
          .map_err(|e| Error::SessionStore(Box::new(e)))?;
        Ok(None)
      }
      Fetched::Document(body) => {
        let record = serde_json::from_slice::<A::Record>(&body).map_err(|source| {
          tracing::error!(actor = %A::KIND, error = %source, "identity response failed schema validation");
          Error::Schema { actor: A::KIND, source }
        })?;
        Ok(Some(Session { credential, record }))
      }
    }
  }
}
