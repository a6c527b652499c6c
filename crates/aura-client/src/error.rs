//! Error type for `aura-client`.

use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(String),

  #[error("http error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server answered 401: the credential is missing, expired or revoked.
  #[error("{path}: credential rejected")]
  Unauthorized { path: String },

  #[error("{method} {path} → {status}")]
  Status {
    method: Method,
    path:   String,
    status: StatusCode,
  },

  #[error("{path}: unexpected response body: {source}")]
  Response {
    path:   String,
    #[source]
    source: serde_json::Error,
  },

  #[error("not signed in")]
  NotAuthenticated,

  #[error("sign-in callback carried an empty token")]
  EmptyToken,

  #[error("session store error: {0}")]
  SessionStore(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error(transparent)]
  Core(#[from] aura_core::Error),
}

impl Error {
  pub fn is_unauthorized(&self) -> bool { matches!(self, Self::Unauthorized { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
