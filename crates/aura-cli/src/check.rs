//! `aura check <path>`: run the route guard from the command line.

use std::time::Duration;

use anyhow::Result;
use aura_client::SessionContext;
use aura_core::{
  Company, Student,
  guard::{Guard, GuardState, Navigator, PredicateChain, Redirect},
  route::{self, Protected},
  session::SessionStore,
  state::Trigger,
};

use crate::Env;

/// Navigates by printing where the router would be sent.
struct Printer;

impl Navigator for Printer {
  fn replace(&mut self, redirect: &Redirect) {
    match &redirect.return_to {
      Some(from) => println!("redirect {} (return to {from})", redirect.target),
      None => println!("redirect {}", redirect.target),
    }
  }
}

fn report(state: &GuardState) {
  if state.renders_content() {
    println!("allow");
  }
}

/// Hydrate, then resolve `guard` against the result. A failed hydration is
/// logged and the guard decides on the absent session.
///
/// With `watch`, rehydrate on that interval and print again whenever the
/// outcome changes, until interrupted.
async fn resolve<C, S>(
  ctx: &SessionContext<C, S>,
  guard: Guard<C>,
  watch: Option<Duration>,
) -> Result<()>
where
  C: PredicateChain,
  S: SessionStore,
{
  let mut reader = ctx.reader();
  if let Err(e) = ctx.refresh(Trigger::Startup).await {
    tracing::warn!(error = %e, "hydration failed");
  }
  let mut last = guard.resolve(&mut reader, &mut Printer).await;
  report(&last);

  let Some(every) = watch else {
    return Ok(());
  };
  let mut printer = Printer;
  let mut ticks = tokio::time::interval(every);
  // The first tick completes immediately.
  ticks.tick().await;
  loop {
    tokio::select! {
      next = guard.next_change(&mut reader, &last, &mut printer) => {
        let Some(state) = next else { return Ok(()) };
        report(&state);
        last = state;
      }
      _ = ticks.tick() => {
        if let Err(e) = ctx.refresh(Trigger::Focus).await {
          tracing::warn!(error = %e, "rehydration failed");
        }
      }
      _ = tokio::signal::ctrl_c() => return Ok(()),
    }
  }
}

pub async fn run(
  env: &Env,
  path: &str,
  from: Option<String>,
  watch: Option<Duration>,
) -> Result<()> {
  let Some((protected, mut route)) = route::resolve(path) else {
    println!("public");
    return Ok(());
  };
  if let Some(from) = from {
    route.location = from;
  }

  match protected {
    Protected::Student(step) => {
      let ctx = SessionContext::<Student, _>::new(env.client.clone(), env.store.clone());
      resolve(&ctx, Guard::new(step, route), watch).await
    }
    Protected::Company(step) => {
      let ctx = SessionContext::<Company, _>::new(env.client.clone(), env.store.clone());
      resolve(&ctx, Guard::new(step, route), watch).await
    }
  }
}
