#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod extract;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod scan;
pub mod scraper;

pub use formats::ScrapeResult;
pub use scraper::{Scraper, ScraperConfig, scrape};
