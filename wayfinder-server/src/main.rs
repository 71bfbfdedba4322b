mod api;
mod config;
mod dto;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayfinder_core::{DirectoryLoader, Engine};

use crate::{
    api::{AppState, router},
    config::ServerConfig,
};

const DEFAULT_LOG_FILTER: &str = "wayfinder_server=info,wayfinder_core=info,tower_http=info";

/// Multi-floor indoor routing HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `server.bind`
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory with per-floor GeoJSON files, overrides `data.dir`
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn resolve(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(dir) = &self.data_dir {
            config.data.dir.clone_from(dir);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Cli::parse().resolve()?;
    info!(
        "Loading floors {:?} from {}",
        config.data.floors,
        config.data.dir.display()
    );

    let engine = Arc::new(Engine::new(config.routing.clone()));
    let report = {
        let engine = Arc::clone(&engine);
        let source = config.data.clone();
        tokio::task::spawn_blocking(move || {
            engine.load(&DirectoryLoader::new(source.clone()), &source.floors)
        })
        .await?
        .context("Initial floor load failed")?
    };
    info!(
        "Routing graph ready: {} nodes, {} edges, {} stairs, {} floors failed",
        report.node_count,
        report.edge_count,
        report.stair_count,
        report.failures.len()
    );

    let app = router(AppState::new(engine, config.data.clone()), &config.server);

    let listener = TcpListener::bind(config.server.bind)
        .await
        .with_context(|| format!("Cannot bind {}", config.server.bind))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
