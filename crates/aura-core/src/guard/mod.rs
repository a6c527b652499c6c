//! The route access guard.
//!
//! A guard is declared with a step and decides, from the current container
//! state, whether protected content may render or the visitor must be
//! redirected. The decision itself is the pure function [`evaluate`]; the
//! imperative half (logging and replace-navigation) lives in
//! [`Guard::apply`].
//!
//! Per invocation the guard moves through `WAITING_FOR_INIT → EVALUATING →
//! ALLOW | DENY(target)`. Evaluation is synchronous over one snapshot, so
//! only the waiting and terminal states are ever observable as a
//! [`GuardState`].
//!
//! Predicates run in a fixed, actor-specific order and the first failure
//! wins; later predicates are never consulted.

pub mod company;
pub mod student;

use std::fmt;

use crate::{
  actor::Actor,
  route::{Route, RouteContext},
  state::{Session, Snapshot, StateReader},
};

// ─── Decisions ───────────────────────────────────────────────────────────────

/// How a denial is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  /// An expected gate: the visitor has not reached this step yet.
  Gate,
  /// Locally held data failed a self-consistency check.
  Integrity,
}

/// Where a denied visitor is sent, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
  pub target:    Route,
  /// The originating location, for actors whose login returns there.
  pub return_to: Option<String>,
  pub reason:    &'static str,
  pub severity:  Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  Allow,
  Redirect(Redirect),
}

impl Decision {
  pub fn target(&self) -> Option<Route> {
    match self {
      Self::Allow => None,
      Self::Redirect(r) => Some(r.target),
    }
  }
}

/// The observable outcome of one guard invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
  WaitingForInit,
  Allow,
  Deny(Redirect),
}

impl GuardState {
  /// Only `Allow` renders the protected content; every other state shows a
  /// neutral placeholder.
  pub fn renders_content(&self) -> bool { matches!(self, Self::Allow) }
}

// ─── Predicates ──────────────────────────────────────────────────────────────

/// One entry of a predicate chain: a check and the redirect issued when it
/// fails.
pub struct Predicate<R> {
  pub reason:   &'static str,
  pub check:    fn(&Session<R>, &RouteContext) -> bool,
  pub target:   Route,
  pub severity: Severity,
}

impl<R> fmt::Debug for Predicate<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Predicate")
      .field("reason", &self.reason)
      .field("target", &self.target)
      .field("severity", &self.severity)
      .finish()
  }
}

/// Supplies the ordered predicate chain for each of an actor's steps.
///
/// The absent-session case is handled by [`evaluate`] before the chain runs,
/// always redirecting to [`Self::LOGIN`].
pub trait PredicateChain: Actor {
  /// Closed set of steps this actor's guards can be declared with.
  type Step: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static;

  const LOGIN: Route;

  /// Whether redirects carry the originating location for post-login return.
  const CARRIES_ORIGIN: bool;

  fn resolve(step: Self::Step) -> Vec<Predicate<Self::Record>>;
}

/// Decide render-or-redirect for `step` given the hydrated session.
///
/// Pure: the same inputs always yield the same decision.
pub fn evaluate<C: PredicateChain>(
  step: C::Step,
  session: Option<&Session<C::Record>>,
  route: &RouteContext,
) -> Decision {
  let return_to = C::CARRIES_ORIGIN.then(|| route.location.clone());

  let Some(session) = session else {
    return Decision::Redirect(Redirect {
      target: C::LOGIN,
      return_to,
      reason: "not authenticated",
      severity: Severity::Gate,
    });
  };

  C::resolve(step)
    .into_iter()
    .find(|p| !(p.check)(session, route))
    .map_or(Decision::Allow, |p| {
      Decision::Redirect(Redirect {
        target: p.target,
        return_to,
        reason: p.reason,
        severity: p.severity,
      })
    })
}

// ─── Navigation ──────────────────────────────────────────────────────────────

/// The router seen from a guard: replace-style navigation only, so no
/// history entry is kept for the denied attempt.
pub trait Navigator {
  fn replace(&mut self, redirect: &Redirect);
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// A guard declared for one step of actor `C` at one location.
pub struct Guard<C: PredicateChain> {
  step:  C::Step,
  route: RouteContext,
}

impl<C: PredicateChain> fmt::Debug for Guard<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Guard")
      .field("actor", &C::KIND)
      .field("step", &self.step)
      .field("route", &self.route)
      .finish()
  }
}

impl<C: PredicateChain> Guard<C> {
  pub fn new(step: C::Step, route: RouteContext) -> Self { Self { step, route } }

  pub fn step(&self) -> C::Step { self.step }

  /// The state for `snapshot`, without side effects.
  pub fn decide(&self, snapshot: &Snapshot<C::Record>) -> GuardState {
    if !snapshot.is_initialized() {
      return GuardState::WaitingForInit;
    }
    match evaluate::<C>(self.step, snapshot.session(), &self.route) {
      Decision::Allow => GuardState::Allow,
      Decision::Redirect(r) => GuardState::Deny(r),
    }
  }

  /// Decide, then log and navigate on denial.
  pub fn apply<N: Navigator>(
    &self,
    snapshot: &Snapshot<C::Record>,
    navigator: &mut N,
  ) -> GuardState {
    let state = self.decide(snapshot);
    if let GuardState::Deny(redirect) = &state {
      match redirect.severity {
        Severity::Gate => tracing::info!(
          actor = %C::KIND,
          step = %self.step,
          target = %redirect.target,
          reason = redirect.reason,
          "guard redirect"
        ),
        Severity::Integrity => tracing::warn!(
          actor = %C::KIND,
          step = %self.step,
          target = %redirect.target,
          reason = redirect.reason,
          "guard redirect on integrity violation"
        ),
      }
      navigator.replace(redirect);
    }
    state
  }

  /// Wait for the container to initialise, then [`apply`](Self::apply) once.
  pub async fn resolve<N: Navigator>(
    &self,
    reader: &mut StateReader<C::Record>,
    navigator: &mut N,
  ) -> GuardState {
    let snapshot = reader.initialized().await;
    self.apply(&snapshot, navigator)
  }

  /// Wait for a container write whose state differs from `last`, then
  /// [`apply`](Self::apply) it. Writes that leave the state unchanged do not
  /// navigate. `None` once the writer is gone.
  pub async fn next_change<N: Navigator>(
    &self,
    reader: &mut StateReader<C::Record>,
    last: &GuardState,
    navigator: &mut N,
  ) -> Option<GuardState> {
    loop {
      let snapshot = reader.changed().await?;
      if self.decide(&snapshot) != *last {
        return Some(self.apply(&snapshot, navigator));
      }
    }
  }
}

#[cfg(test)]
pub(crate) mod testing {
  use super::{Navigator, Redirect};

  /// Records every navigation instead of performing it.
  #[derive(Debug, Default)]
  pub struct Recorder {
    pub visits: Vec<Redirect>,
  }

  impl Navigator for Recorder {
    fn replace(&mut self, redirect: &Redirect) { self.visits.push(redirect.clone()); }
  }
}
