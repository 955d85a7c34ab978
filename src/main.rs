use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_tion::config::Config;
use git_tion::server::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "git_tion=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let port = config.port;
    let inspect_schema = config.inspect_schema_on_start;

    let state = AppState::from_config(config).context("failed to initialise clients")?;

    if inspect_schema {
        let notion = state.notion();
        info!(database_id = %notion.database_id(), "Inspecting Notion database schema");
        match notion.inspect_database().await {
            Ok(properties) => {
                for property in properties {
                    info!(name = %property.name, kind = %property.kind, "Notion database property");
                }
            }
            Err(e) => warn!(error = %e, "Could not inspect Notion database"),
        }
    }

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
