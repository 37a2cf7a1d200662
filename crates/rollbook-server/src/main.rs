//! rollbook server binary.
//!
//! Reads `rollbook.toml` (or the path specified with `--config`), opens the
//! SQLite store, and either serves the JSON API over HTTP or imports a teacher
//! roster.
//!
//! ```text
//! rollbook-server --config rollbook.toml serve
//! rollbook-server import-teachers teacher_list.csv
//! ```

use std::{fs::File, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rollbook_server::{ServerConfig, import::import_teachers};
use rollbook_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "rollbook class schedule server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rollbook.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (the default).
  Serve,
  /// Import teachers from a roster CSV file.
  ImportTeachers {
    /// CSV with status, department, position, name, gender and region
    /// columns.
    file: PathBuf,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = server_cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?
    .with_policy(server_cfg.policy());

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(&server_cfg, store).await,
    Command::ImportTeachers { file } => {
      let reader = File::open(&file)
        .with_context(|| format!("failed to open {file:?}"))?;
      let summary = import_teachers(&store, reader)
        .await
        .with_context(|| format!("failed to import {file:?}"))?;
      println!(
        "imported {} teachers, skipped {}",
        summary.imported, summary.skipped
      );
      Ok(())
    }
  }
}

async fn serve(server_cfg: &ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  tracing::info!(
    multi_fill_role = %server_cfg.multi_fill_role,
    "assignment policy loaded"
  );

  let app = rollbook_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
