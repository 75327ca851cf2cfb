//! cfg_server — REST server for editing Fanvil phone config files.
//!
//! See `fanvil_cfg::settings` for the environment variables it reads.

use std::sync::Arc;

use anyhow::{Context, Result};
use fanvil_cfg::api::build_router;
use fanvil_cfg::{LocalConfigStore, Settings};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fanvil_cfg=debug,tower_http=debug".into()),
        )
        .init();

    let settings = Settings::from_env()?;

    let store = LocalConfigStore::new(&settings.config_dir).with_extension(&settings.extension);
    store
        .ensure_root()
        .await
        .with_context(|| format!("failed to create {}", settings.config_dir.display()))?;

    let app = build_router(Arc::new(store));

    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", settings.bind_addr))?;
    info!("cfg_server listening on {}", settings.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
