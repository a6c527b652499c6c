//! Client connection settings.

use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
  /// Base URL every API path is appended to.
  #[serde(default = "default_api_url")]
  pub api_url:      String,
  /// Per-request transport timeout.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_api_url() -> String { DEFAULT_API_URL.to_owned() }

fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl Default for ClientConfig {
  fn default() -> Self {
    Self { api_url: default_api_url(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

impl ClientConfig {
  pub fn new(api_url: impl Into<String>) -> Self {
    Self { api_url: api_url.into(), ..Self::default() }
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

  /// Reject settings the client cannot run with. An empty API URL is never
  /// papered over with a fallback.
  pub fn validate(&self) -> Result<()> {
    if self.api_url.trim().is_empty() {
      return Err(Error::Config("api_url must not be empty".into()));
    }
    if self.timeout_secs == 0 {
      return Err(Error::Config("timeout_secs must be positive".into()));
    }
    Ok(())
  }
}
