//! `matchup` — server and admin tool for the weekly photo matchup.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store and either serves the JSON API or runs an administrative command.
//!
//! ```text
//! matchup serve
//! matchup add-item --id photo-17 --title "Harbour at dusk"
//! matchup create --week 2025-01-06 --a photo-17 --b photo-21 --activate
//! matchup close --week 2025-01-06
//! ```

mod admin;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::{Router, http::HeaderName};
use clap::{Parser, Subcommand};
use matchup_api::ApiConfig;
use matchup_core::{matchup::MatchupStatus, week::WeekStart};
use matchup_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Weekly photo matchup server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (default).
  Serve,
  /// Register a photo that matchups can reference.
  AddItem {
    #[arg(long)]
    id:        String,
    #[arg(long)]
    title:     Option<String>,
    #[arg(long)]
    image_url: Option<String>,
  },
  /// Create the matchup for a week.
  Create {
    #[arg(long)]
    week:     WeekStart,
    #[arg(long)]
    a:        Option<String>,
    #[arg(long)]
    b:        Option<String>,
    /// Create directly as the active matchup.
    #[arg(long)]
    activate: bool,
  },
  /// Set both options of a pending matchup.
  SetOptions {
    #[arg(long)]
    week: WeekStart,
    #[arg(long)]
    a:    String,
    #[arg(long)]
    b:    String,
  },
  /// Open a pending week for voting.
  Activate {
    #[arg(long)]
    week: WeekStart,
  },
  /// Close an active week. Closed weeks cannot be reopened.
  Close {
    #[arg(long)]
    week: WeekStart,
  },
  /// List all matchups with their totals.
  List,
  /// Print totals for a week, or the last closed week's result.
  Results {
    #[arg(long)]
    week: Option<WeekStart>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(store, &server_cfg).await,
    Command::AddItem { id, title, image_url } => {
      admin::add_item(&store, id, title, image_url).await
    }
    Command::Create { week, a, b, activate } => admin::create(&store, week, a, b, activate).await,
    Command::SetOptions { week, a, b } => admin::set_options(&store, week, a, b).await,
    Command::Activate { week } => admin::set_status(&store, week, MatchupStatus::Active).await,
    Command::Close { week } => admin::set_status(&store, week, MatchupStatus::Closed).await,
    Command::List => admin::list(&store).await,
    Command::Results { week } => admin::results(&store, week).await,
  }
}

async fn serve(store: SqliteStore, server_cfg: &ServerConfig) -> anyhow::Result<()> {
  let client_ip_header = HeaderName::try_from(server_cfg.client_ip_header.as_str())
    .with_context(|| format!("invalid client_ip_header {:?}", server_cfg.client_ip_header))?;

  let api = matchup_api::api_router(Arc::new(store), ApiConfig { client_ip_header });
  let app = Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
