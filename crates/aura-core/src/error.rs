//! Error types for `aura-core`.

use thiserror::Error;

use crate::actor::ActorKind;

#[derive(Debug, Error)]
pub enum Error {
  /// The identity endpoint answered with a shape the client cannot parse.
  /// This is a contract break, never a normal logged-out state.
  #[error("{actor} identity response failed schema validation: {source}")]
  Schema {
    actor:  ActorKind,
    #[source]
    source: serde_json::Error,
  },

  #[error("session store error: {0}")]
  SessionStore(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("identity source error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn is_schema_violation(&self) -> bool { matches!(self, Self::Schema { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
