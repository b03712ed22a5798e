//! # helpdesk_dump
//!
//! Dumps every article of a Zendesk Help Center to Markdown files.
//!
//! ## Features
//!
//! - Walks the paginated `articles.json` listing, following `next_page`
//! - Anonymous, API token (Basic) or OAuth bearer authentication
//! - Converts article HTML bodies to Markdown, or keeps the raw HTML
//! - One file per article (`{id}.md` or `{id}-{title}.md`) or a single
//!   combined `articles.md`
//!
//! ## Usage
//!
//! ```sh
//! helpdesk_dump --subdomain acme -o ./articles
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: request one listing page at a time ([`api`])
//! 2. **Rendering**: convert each body to Markdown ([`convert`])
//! 3. **Output**: write per-article or combined files ([`outputs`])
//!
//! Any request or decode failure ends the run with exit code 1; a failed
//! per-article write is logged and skipped.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod convert;
mod error;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // Usage errors exit with 1 rather than clap's default 2.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };
    debug!(?args.output, args.combine, ?args.naming, "Parsed CLI arguments");

    match pipeline::run(&args).await {
        Ok(summary) => {
            info!(
                pages = summary.pages,
                articles = summary.articles,
                files_written = summary.files_written,
                skipped = summary.skipped,
                elapsed = ?summary.elapsed,
                "Article dump completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Article dump failed");
            Err(e.into())
        }
    }
}
