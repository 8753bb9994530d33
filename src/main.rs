//! taskdesk - Spreadsheet-backed task tracker server
//!
//! Serves the JSON API the browser front end talks to. All state lives in
//! two flat table files under the data directory.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use taskdesk::api::{router, AppState};
use taskdesk::config::Config;

#[derive(Debug, Parser)]
#[command(name = "taskdesk", about = "Spreadsheet-backed task tracker for small teams")]
struct Cli {
    /// Directory holding taskdesk.toml and the table files
    #[arg(long, env = "TASKDESK_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> taskdesk::Result<()> {
    // Tracing is opt-in via RUST_LOG.
    // Keep startup robust in CI/robot envs: ignore invalid/huge filters.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load_from_dir(&cli.data_dir);
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let state = AppState::new(config);
    // The user file is provisioned externally; refusing to start beats
    // serving a login form nobody can pass.
    state.users.check_present()?;
    state.tasks.init()?;

    info!(
        variant = ?state.config.auth.variant,
        tasks = %state.tasks.path().display(),
        "starting"
    );

    let listener = tokio::net::TcpListener::bind(&state.config.bind).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(state))).await?;

    Ok(())
}
