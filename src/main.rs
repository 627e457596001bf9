//! Map server entry point.

use anyhow::{Context, Result};
use clap::Parser;
use mapserve::config::ServerConfig;
use mapserve::notify::{FsTokenStore, LogNotifier};
use mapserve::server::{self, AppState};
use mapserve::store::FsMapStore;
use mapserve::svg::gids::DEFAULT_RULES;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mapserve", version, about = "Venue floor-plan SVG map server")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory holding {id}.svg map documents.
    #[arg(long, default_value = "maps")]
    maps_dir: PathBuf,

    /// Override the notification token store file.
    #[arg(long)]
    token_store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mapserve=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::default();
    config.port = cli.port;
    config.maps_dir = cli.maps_dir;
    if let Some(path) = cli.token_store {
        config.token_store_path = path;
    }

    info!(
        "starting mapserve v{} (maps dir: {})",
        env!("CARGO_PKG_VERSION"),
        config.maps_dir.display()
    );

    let tokens = FsTokenStore::open(&config.token_store_path)
        .context("opening notification token store")?;

    let state = Arc::new(AppState {
        store: Box::new(FsMapStore::new(&config.maps_dir)),
        rules: &DEFAULT_RULES,
        tokens: Mutex::new(Box::new(tokens)),
        notifier: Box::new(LogNotifier),
        config,
    });

    server::serve(state).await
}
