use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;

use metacrawler::app::routes::AppState;
use metacrawler::app::server::{PORT_ENV, resolve_listen_addr, serve};
use metacrawler::fetch::DEFAULT_MAX_BODY_BYTES;
use metacrawler::{Scraper, ScraperConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    /// Listen address (default: 0.0.0.0:$PORT, PORT defaults to 8080).
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Whole-request timeout for each scrape.
    #[arg(long, default_value_t = 20)]
    timeout_secs: u64,

    /// Response bytes read before the body is cut off.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    metacrawler::logging::init_with_default("info,tower_http=debug")?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting metacrawler-app");

    let port = std::env::var(PORT_ENV).ok();
    let addr = resolve_listen_addr(args.addr, port.as_deref());

    let scraper = Scraper::new(ScraperConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        max_body_bytes: args.max_body_bytes,
        ..ScraperConfig::default()
    })
    .context("build scraper")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {addr}: {err}"))?;
    serve(listener, AppState::new(scraper)).await
}
