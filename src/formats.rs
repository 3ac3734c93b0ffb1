use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapeResult {
    pub url: String,
    pub title: String,
    pub text: String,
    pub links: Vec<String>,
    #[serde(rename = "wordCount")]
    pub word_count: usize,
}
