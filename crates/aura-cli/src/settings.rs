//! Layered configuration: defaults, then an optional TOML file, then
//! `AURA_`-prefixed environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aura_client::{
  ClientConfig,
  config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS},
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  #[serde(default = "default_api_url")]
  pub api_url:      String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Where credentials are persisted between runs.
  #[serde(default)]
  pub session_db:   Option<PathBuf>,
}

fn default_api_url() -> String { DEFAULT_API_URL.to_owned() }

fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

/// Flag values that take precedence over every other source.
#[derive(Debug, Default)]
pub struct Overrides {
  pub api_url:    Option<String>,
  pub session_db: Option<PathBuf>,
}

impl Settings {
  pub fn load(file: &Path, overrides: Overrides) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("AURA"))
      .set_override_option("api_url", overrides.api_url)?
      .set_override_option(
        "session_db",
        overrides.session_db.map(|p| p.display().to_string()),
      )?
      .build()
      .with_context(|| format!("failed to read configuration from {}", file.display()))?;

    let settings: Self = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.client().validate()?;
    Ok(settings)
  }

  pub fn client(&self) -> ClientConfig {
    ClientConfig { api_url: self.api_url.clone(), timeout_secs: self.timeout_secs }
  }

  /// The configured session database, or `<data dir>/aura/sessions.db`.
  pub fn session_db(&self) -> PathBuf {
    if let Some(path) = &self.session_db {
      return expand_tilde(path);
    }
    if let Some(dirs) = directories::ProjectDirs::from("", "", "aura") {
      dirs.data_dir().join("sessions.db")
    } else {
      PathBuf::from("aura-sessions.db")
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Some(dirs) = directories::BaseDirs::new()
  {
    return dirs.home_dir().join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_config(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("aura-cli-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn missing_file_uses_defaults() {
    let s = Settings::load(Path::new("/nonexistent/aura.toml"), Overrides::default()).unwrap();
    assert_eq!(s.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(s.session_db().ends_with("sessions.db"));
  }

  #[test]
  fn file_values_are_read_and_flags_win() {
    let path = write_config(
      "layering",
      "api_url = \"https://file.test/api\"\ntimeout_secs = 3\nsession_db = \"/tmp/a.db\"\n",
    );

    let s = Settings::load(&path, Overrides::default()).unwrap();
    assert_eq!(s.api_url, "https://file.test/api");
    assert_eq!(s.timeout_secs, 3);
    assert_eq!(s.session_db(), PathBuf::from("/tmp/a.db"));

    let s = Settings::load(&path, Overrides {
      api_url:    Some("https://flag.test/api".into()),
      session_db: None,
    })
    .unwrap();
    assert_eq!(s.api_url, "https://flag.test/api");

    let _ = std::fs::remove_file(path);
  }

  #[test]
  fn empty_api_url_is_a_configuration_error() {
    let path = write_config("empty", "api_url = \"\"\n");
    assert!(Settings::load(&path, Overrides::default()).is_err());
    let _ = std::fs::remove_file(path);
  }
}
