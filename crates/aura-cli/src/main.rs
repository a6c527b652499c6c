//! `aura`: the Aura-Match client from a terminal.
//!
//! # Usage
//!
//! ```text
//! aura student login asha@example.com --password secret
//! aura company whoami
//! aura check /company/jobs/matches/j1
//! aura check /student/result --watch 30
//! aura --api-url https://aura.example/api --config ~/.config/aura.toml student whoami
//! ```

mod check;
mod company;
mod settings;
mod student;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use aura_client::ApiClient;
use aura_store_sqlite::SqliteSessionStore;
use clap::{Parser, Subcommand};
use serde::Serialize;
use settings::{Overrides, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "aura", version, about = "Aura-Match client sessions and route guards")]
struct Args {
  /// Path to a TOML config file (api_url, timeout_secs, session_db).
  #[arg(short, long, value_name = "FILE", default_value = "aura.toml")]
  config: PathBuf,

  /// Base URL of the Aura-Match API.
  #[arg(long)]
  api_url: Option<String>,

  /// SQLite file holding the stored credentials.
  #[arg(long, value_name = "FILE")]
  session_db: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Student portal actions.
  #[command(subcommand)]
  Student(student::StudentCommand),

  /// Company portal actions.
  #[command(subcommand)]
  Company(company::CompanyCommand),

  /// Run the route guard for PATH and print `allow`, `redirect <target>` or
  /// `public`.
  Check {
    path: String,

    /// Location to carry as the post-login return target (defaults to PATH).
    #[arg(long, value_name = "LOCATION")]
    from: Option<String>,

    /// Keep rehydrating every SECONDS and print each change of outcome
    /// until interrupted.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    watch: Option<u64>,
  },
}

// ─── Shared plumbing ─────────────────────────────────────────────────────────

/// What every command needs: the API client and the credential store.
pub struct Env {
  pub client: Arc<ApiClient>,
  pub store:  Arc<SqliteSessionStore>,
}

impl Env {
  async fn open(settings: &Settings) -> Result<Self> {
    let client = ApiClient::new(&settings.client()).context("failed to build API client")?;
    let path = settings.session_db();
    let store = SqliteSessionStore::open(&path)
      .await
      .with_context(|| format!("failed to open session store at {}", path.display()))?;
    Ok(Self { client: Arc::new(client), store: Arc::new(store) })
  }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value).context("serialising output")?);
  Ok(())
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let settings = Settings::load(&args.config, Overrides {
    api_url:    args.api_url,
    session_db: args.session_db,
  })?;
  tracing::debug!(?settings, "loaded settings");

  let env = Env::open(&settings).await?;

  match args.command {
    Command::Student(cmd) => student::run(&env, cmd).await,
    Command::Company(cmd) => company::run(&env, cmd).await,
    Command::Check { path, from, watch } => {
      check::run(&env, &path, from, watch.map(Duration::from_secs)).await
    }
  }
}
