use clap::{Args, Parser, Subcommand};

use crate::fetch::DEFAULT_MAX_BODY_BYTES;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one page and print its summary as JSON.
    Scrape(ScrapeArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Page URL (passed through unmodified).
    #[arg(long)]
    pub url: String,

    /// Whole-request timeout (connect, TLS, headers and body).
    #[arg(long, default_value_t = 20)]
    pub timeout_secs: u64,

    /// Response bytes read before the body is cut off.
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}
