//! The dump run: walk the listing, render and persist every article.
//!
//! Per-article mode writes each page's articles as soon as the page
//! arrives; a failed write is logged and the article skipped. Combined mode
//! collects everything first and writes one file at the end, where any
//! failure (including an empty result) is fatal.

use crate::api::{HelpCenterClient, Pages, listing_url};
use crate::cli::Cli;
use crate::error::DumpError;
use crate::outputs::files::{COMBINED_FILENAME, write_article, write_combined};
use crate::utils::ensure_writable_dir;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: usize,
    pub articles: usize,
    /// Files written: one per article, or 1 in combined mode.
    pub files_written: usize,
    /// Articles whose file could not be written.
    pub skipped: usize,
    pub elapsed: Duration,
}

#[instrument(level = "info", skip_all, fields(subdomain = %cli.subdomain, output = %cli.output.display(), combine = cli.combine))]
pub async fn run(cli: &Cli) -> Result<RunSummary, DumpError> {
    let started = Instant::now();

    let auth = cli.auth()?;
    let base = cli.base_url()?;
    let start_url = listing_url(&base, cli.locale.as_deref(), cli.per_page)?;

    ensure_writable_dir(&cli.output).await?;

    let client = HelpCenterClient::new(auth)?;
    let format = cli.body_format();
    info!(
        url = %start_url,
        auth = client.auth_kind(),
        naming = ?cli.naming,
        ?format,
        "Starting article dump"
    );

    let mut summary = RunSummary::default();
    let mut collected = Vec::new();
    let mut pages = Pages::new(&client, start_url.as_str());

    while let Some(page) = pages.next().await? {
        summary.articles += page.articles.len();

        if cli.combine {
            collected.extend(page.articles);
            continue;
        }

        for article in &page.articles {
            match write_article(&cli.output, article, cli.naming, format).await {
                Ok(_) => summary.files_written += 1,
                Err(e) => {
                    error!(id = article.id, error = %e, "Error saving article; skipping");
                    summary.skipped += 1;
                }
            }
        }
    }
    summary.pages = pages.fetched();

    if cli.combine {
        let path = cli.output.join(COMBINED_FILENAME);
        write_combined(&path, &collected, format).await?;
        summary.files_written = 1;
    }

    summary.elapsed = started.elapsed();
    Ok(summary)
}
