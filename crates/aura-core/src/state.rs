//! The application state container.
//!
//! One slot per actor holding `{initialized, session}`. The slot is a tokio
//! `watch` channel: every write is an atomic whole-value replace, and readers
//! can wait for the first hydration to complete.
//!
//! The single-writer rule is enforced by visibility. [`container`] hands out
//! exactly one [`StateWriter`], which is not `Clone`; whoever owns it is the
//! hydration-completion handler. Everyone else gets a [`StateReader`].

use std::{fmt, sync::Arc};

use tokio::sync::watch;

use crate::actor::{Credential, Identity};

// ─── Session ─────────────────────────────────────────────────────────────────

/// A hydrated identity record together with the credential it was
/// authenticated with.
#[derive(Debug, Clone)]
pub struct Session<R> {
  pub credential: Credential,
  pub record:     R,
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A read-only view of the container at one point in time.
#[derive(Debug)]
pub struct Snapshot<R> {
  initialized: bool,
  session:     Option<Arc<Session<R>>>,
}

impl<R> Clone for Snapshot<R> {
  fn clone(&self) -> Self {
    Self { initialized: self.initialized, session: self.session.clone() }
  }
}

impl<R> Snapshot<R> {
  fn uninitialized() -> Self { Self { initialized: false, session: None } }

  /// `false` until the first hydration attempt has completed.
  pub fn is_initialized(&self) -> bool { self.initialized }

  pub fn session(&self) -> Option<&Session<R>> { self.session.as_deref() }

  pub fn record(&self) -> Option<&R> { self.session().map(|s| &s.record) }

  pub fn is_authenticated(&self) -> bool { self.session.is_some() }
}

impl<R: Identity> Snapshot<R> {
  pub fn is_fully_verified(&self) -> bool {
    self.record().is_some_and(Identity::is_fully_verified)
  }
}

// ─── Triggers ────────────────────────────────────────────────────────────────

/// Why a hydration was started. Used for logging only; every trigger
/// performs the same full refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
  Startup,
  /// The host regained focus; a best-effort revalidation point.
  Focus,
  /// A state-mutating action just completed.
  Action(&'static str),
}

impl fmt::Display for Trigger {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Startup => f.write_str("startup"),
      Self::Focus => f.write_str("focus"),
      Self::Action(name) => write!(f, "after {name}"),
    }
  }
}

// ─── Container ───────────────────────────────────────────────────────────────

/// Create an uninitialised container and its sole writer.
pub fn container<R>() -> (StateWriter<R>, StateReader<R>) {
  let (tx, rx) = watch::channel(Snapshot::uninitialized());
  (StateWriter { tx }, StateReader { rx })
}

/// The only handle that can replace the container's contents.
#[derive(Debug)]
pub struct StateWriter<R> {
  tx: watch::Sender<Snapshot<R>>,
}

impl<R> StateWriter<R> {
  /// Record the outcome of a hydration attempt. Marks the container
  /// initialised and replaces the session wholesale; `None` clears it.
  pub fn complete_hydration(&self, outcome: Option<Session<R>>) {
    self.tx.send_replace(Snapshot {
      initialized: true,
      session:     outcome.map(Arc::new),
    });
  }

  pub fn reader(&self) -> StateReader<R> { StateReader { rx: self.tx.subscribe() } }
}

/// A read-only handle. Cheap to clone.
#[derive(Debug)]
pub struct StateReader<R> {
  rx: watch::Receiver<Snapshot<R>>,
}

impl<R> Clone for StateReader<R> {
  fn clone(&self) -> Self { Self { rx: self.rx.clone() } }
}

impl<R> StateReader<R> {
  pub fn snapshot(&self) -> Snapshot<R> { self.rx.borrow().clone() }

  /// Wait until the first hydration attempt has completed.
  ///
  /// If the writer is dropped before that happens the current (uninitialised)
  /// snapshot is returned.
  pub async fn initialized(&mut self) -> Snapshot<R> {
    if let Ok(snapshot) = self.rx.wait_for(Snapshot::is_initialized).await {
      return snapshot.clone();
    }
    self.rx.borrow().clone()
  }

  /// Wait for the next write. Returns `None` once the writer is gone.
  pub async fn changed(&mut self) -> Option<Snapshot<R>> {
    self.rx.changed().await.ok()?;
    Some(self.rx.borrow_and_update().clone())
  }
}
