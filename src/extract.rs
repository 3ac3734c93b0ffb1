//! Pattern-based extraction of title, visible text and links from raw markup.
//!
//! Markup is never parsed into a tree. Tags are stripped textually, so the
//! contents of `<script>` and `<style>` end up in the visible text.

use std::sync::LazyLock;

use crate::formats::ScrapeResult;
use crate::scan::{Pattern, normalize};

pub const MAX_LINKS: usize = 20;

static TITLE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern"));

// `href` must start an attribute, so `data-href` is skipped.
static ANCHOR_HREF: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(r#"(?is)<a\s+(?:[^>]*?\s)?href\s*=\s*["']([^"']+)["']"#)
        .expect("anchor href pattern")
});

static TAG: LazyLock<Pattern> = LazyLock::new(|| Pattern::new(r"(?s)<.*?>").expect("tag pattern"));

pub fn extract(url: &str, raw: &[u8]) -> ScrapeResult {
    extract_with_link_limit(url, raw, MAX_LINKS)
}

pub fn extract_with_link_limit(url: &str, raw: &[u8], max_links: usize) -> ScrapeResult {
    let html = String::from_utf8_lossy(raw);

    let title = TITLE.find_first(&html).map(normalize).unwrap_or_default();

    let links = ANCHOR_HREF
        .find_all_bounded(&html, max_links)
        .into_iter()
        .map(|href| href.trim().to_owned())
        .collect::<Vec<_>>();

    let text = normalize(&TAG.replace_all(&html, " "));
    let word_count = text.split_whitespace().count();

    ScrapeResult {
        url: url.to_owned(),
        title,
        text,
        links,
        word_count,
    }
}
