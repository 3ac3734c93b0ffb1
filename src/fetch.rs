use std::time::Duration;

use anyhow::Context as _;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const USER_AGENT_VALUE: &str = "metacrawler/0.1";
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// Raw response as handed to extraction. The status is informational only.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
    pub truncated: bool,
}

pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("build scrape http client")
}

/// Performs a single GET and reads at most `max_body_bytes` of the body.
///
/// Any response counts as a page, whatever its status. Only transport
/// failures are errors.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    max_body_bytes: usize,
) -> anyhow::Result<FetchedPage> {
    let target = Url::parse(url).with_context(|| format!("parse url: {url}"))?;

    let resp = client
        .get(target)
        .header(USER_AGENT, USER_AGENT_VALUE)
        .header(ACCEPT, ACCEPT_VALUE)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        tracing::debug!(url, %status, "non-success status; extracting body anyway");
    }

    let (body, truncated) = read_body_limited(resp, max_body_bytes)
        .await
        .with_context(|| format!("GET {url}"))?;
    if truncated {
        tracing::debug!(url, limit = max_body_bytes, "response body truncated");
    }

    Ok(FetchedPage {
        status: status.as_u16(),
        body,
        truncated,
    })
}

async fn read_body_limited(
    mut resp: reqwest::Response,
    limit: usize,
) -> anyhow::Result<(Vec<u8>, bool)> {
    let mut out: Vec<u8> = Vec::new();
    let mut truncated = false;

    while let Some(chunk) = resp.chunk().await.context("read response chunk")? {
        if out.len() + chunk.len() > limit {
            let remaining = limit.saturating_sub(out.len());
            out.extend_from_slice(&chunk[..remaining]);
            truncated = true;
            break;
        }
        out.extend_from_slice(&chunk);
    }

    Ok((out, truncated))
}
