use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use weekboard_core::{BoardConfig, Vault, VaultWatcher};
use weekboard_server::{AppState, app, singleton};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Ensure only one instance is running
    let _lock = singleton::acquire_lock()?;

    let config = BoardConfig::load().context("Failed to load configuration")?;

    let vault = Vault::new(config.vault_path());
    tokio::fs::create_dir_all(vault.root())
        .await
        .with_context(|| format!("Failed to create vault directory {}", vault.root().display()))?;

    let state = AppState::new(vault.clone());

    // Lives for the whole process; broadcasts external note edits to every
    // connected /events subscriber.
    let _watcher = VaultWatcher::spawn(vault, state.notifier.clone(), config.quiet_period())
        .context("Failed to watch vault directory")?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("weekboard-server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
