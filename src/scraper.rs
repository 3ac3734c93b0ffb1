use std::io::Write as _;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::ScrapeArgs;
use crate::extract::{MAX_LINKS, extract_with_link_limit};
use crate::fetch::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, build_client, fetch};
use crate::formats::ScrapeResult;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub timeout: Duration,
    pub max_body_bytes: usize,
    pub max_links: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_links: MAX_LINKS,
        }
    }
}

/// Fetch-then-extract engine. Holds no per-request state, so one instance can
/// serve any number of concurrent scrapes.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl Scraper {
    pub fn new(config: ScraperConfig) -> anyhow::Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    pub async fn scrape(&self, url: &str) -> anyhow::Result<ScrapeResult> {
        tracing::debug!(url, "fetching page");
        let page = fetch(&self.client, url, self.config.max_body_bytes).await?;

        let result = extract_with_link_limit(url, &page.body, self.config.max_links);
        tracing::info!(
            url,
            status = page.status,
            bytes = page.body.len(),
            truncated = page.truncated,
            words = result.word_count,
            links = result.links.len(),
            "scraped page"
        );
        Ok(result)
    }
}

/// One-off scrape with the default configuration.
pub async fn scrape(url: &str) -> anyhow::Result<ScrapeResult> {
    Scraper::new(ScraperConfig::default())?.scrape(url).await
}

pub async fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    if args.url.trim().is_empty() {
        anyhow::bail!("url is required");
    }

    let scraper = Scraper::new(ScraperConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        max_body_bytes: args.max_body_bytes,
        ..ScraperConfig::default()
    })?;
    let result = scraper.scrape(&args.url).await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("serialize scrape result")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("write scrape result")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    const ARTICLE: &str = r#"<!doctype html>
<html>
  <head><title>
    Sample   Article
  </title></head>
  <body>
    <h1>Heading</h1>
    <p>First paragraph.</p>
    <a href="/one">One</a>
    <a href='https://example.org/two'>Two</a>
  </body>
</html>
"#;

    fn spawn_site_server() -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}", server.server_addr());
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let (status, body) = match request.url() {
                    "/article" => (200, ARTICLE.to_string()),
                    "/big" => (200, "<p>x</p>".repeat(5 * 1024 * 1024 / 8)),
                    _ => (
                        404,
                        "<html><title>Not Found</title><p>gone</p></html>".to_string(),
                    ),
                };

                let mut resp = tiny_http::Response::from_string(body).with_status_code(status);
                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..])
                        .expect("content-type header");
                resp.add_header(header);
                let _ = request.respond(resp);
            }
        });

        (base_url, shutdown_tx, handle)
    }

    #[tokio::test]
    async fn scrape_extracts_served_page() {
        let (base_url, shutdown_tx, handle) = spawn_site_server();
        let url = format!("{base_url}/article");

        let out = scrape(&url).await.unwrap();
        assert_eq!(out.url, url);
        assert_eq!(out.title, "Sample Article");
        assert_eq!(out.links, vec!["/one", "https://example.org/two"]);
        assert_eq!(
            out.text,
            "Sample Article Heading First paragraph. One Two"
        );
        assert_eq!(out.word_count, 7);

        let _ = shutdown_tx.send(());
        let _ = handle.join();
    }

    #[tokio::test]
    async fn scrape_extracts_error_pages() {
        let (base_url, shutdown_tx, handle) = spawn_site_server();

        let out = scrape(&format!("{base_url}/missing")).await.unwrap();
        assert_eq!(out.title, "Not Found");
        assert_eq!(out.text, "Not Found gone");

        let _ = shutdown_tx.send(());
        let _ = handle.join();
    }

    #[tokio::test]
    async fn scrape_only_sees_first_two_mebibytes() {
        let (base_url, shutdown_tx, handle) = spawn_site_server();

        let out = scrape(&format!("{base_url}/big")).await.unwrap();
        assert_eq!(out.word_count, DEFAULT_MAX_BODY_BYTES / "<p>x</p>".len());
        assert!(out.links.is_empty());

        let _ = shutdown_tx.send(());
        let _ = handle.join();
    }

    #[tokio::test]
    async fn scraper_honours_link_limit_from_config() {
        let (base_url, shutdown_tx, handle) = spawn_site_server();
        let scraper = Scraper::new(ScraperConfig {
            max_links: 1,
            ..ScraperConfig::default()
        })
        .unwrap();

        let out = scraper.scrape(&format!("{base_url}/article")).await.unwrap();
        assert_eq!(out.links, vec!["/one"]);

        let _ = shutdown_tx.send(());
        let _ = handle.join();
    }

    #[tokio::test]
    async fn run_rejects_blank_url_before_fetching() {
        let err = run(ScrapeArgs {
            url: "   ".to_owned(),
            timeout_secs: 20,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            pretty: false,
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "url is required");
    }
}
