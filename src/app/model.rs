use serde::{Deserialize, Serialize};

/// Reported in the health payload. Existing clients match on this value.
pub const SERVICE_NAME: &str = "go-scraper";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ScrapeRequest {
    /// The requested URL, or `None` when it is missing or blank.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}
