//! Capture-oriented text scanning over raw markup.
//!
//! Extraction only ever needs two questions answered: "what does the first
//! match capture?" and "what do the first N matches capture?". [`Pattern`]
//! answers exactly those so the extractor never touches the regex API.

use std::borrow::Cow;

use anyhow::Context as _;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct Pattern {
    re: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> anyhow::Result<Self> {
        let re = Regex::new(pattern).with_context(|| format!("compile pattern: {pattern}"))?;
        Ok(Self { re })
    }

    /// First capture group of the first match.
    pub fn find_first<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        self.re
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// First capture group of each match, in document order, stopping after
    /// `limit` captures.
    pub fn find_all_bounded<'h>(&self, haystack: &'h str, limit: usize) -> Vec<&'h str> {
        self.re
            .captures_iter(haystack)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .take(limit)
            .collect()
    }

    pub fn replace_all<'h>(&self, haystack: &'h str, with: &str) -> Cow<'h, str> {
        self.re.replace_all(haystack, with)
    }
}

/// Collapses every whitespace run into a single ASCII space and trims both ends.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
