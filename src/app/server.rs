use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context as _;
use tokio::net::TcpListener;

use crate::app::routes::{AppState, router};

pub const DEFAULT_PORT: u16 = 8080;
pub const PORT_ENV: &str = "PORT";

/// An explicit address wins; otherwise listen on all interfaces at `port`
/// (typically `$PORT`), falling back to 8080 when it is unset or unparseable.
pub fn resolve_listen_addr(explicit: Option<SocketAddr>, port: Option<&str>) -> SocketAddr {
    if let Some(addr) = explicit {
        return addr;
    }

    let port = port
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr().context("read listener address")?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
