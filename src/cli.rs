//! Command-line interface definitions for helpdesk_dump.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option that carries a value can also come from an environment
//! variable, so the tool runs unchanged from a shell profile or a CI job.

use crate::api::{Authenticate, BasicToken, BearerToken, NoAuth};
use crate::error::DumpError;
use crate::outputs::BodyFormat;
use crate::outputs::files::FileNaming;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments for helpdesk_dump.
///
/// # Examples
///
/// ```sh
/// # Public Help Center, one file per article
/// helpdesk_dump --subdomain acme
///
/// # Authenticated, titles in file names
/// ZENDESK_EMAIL=agent@acme.com ZENDESK_API_TOKEN=... \
///     helpdesk_dump -s acme --naming id-title
///
/// # Everything in one file
/// helpdesk_dump -s acme -o ./dump --combine
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Zendesk subdomain, as in https://{subdomain}.zendesk.com
    #[arg(short, long, env = "ZENDESK_SUBDOMAIN")]
    pub subdomain: String,

    /// Output directory for markdown files
    #[arg(short, long, env = "ZENDESK_OUTPUT_DIR", default_value = "articles")]
    pub output: PathBuf,

    /// Combine all articles into a single articles.md
    #[arg(short, long)]
    pub combine: bool,

    /// Agent email for API token authentication
    #[arg(long, env = "ZENDESK_EMAIL")]
    pub email: Option<String>,

    /// API token for API token authentication
    #[arg(long, env = "ZENDESK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// OAuth access token sent as a bearer token; takes precedence over email/token
    #[arg(long, env = "ZENDESK_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// File naming scheme for per-article files
    #[arg(long, value_enum, default_value_t = FileNaming::Id)]
    pub naming: FileNaming,

    /// Write article bodies as raw HTML instead of converting to Markdown
    #[arg(long)]
    pub raw_html: bool,

    /// Only list articles in this locale (e.g. en-us)
    #[arg(long, env = "ZENDESK_LOCALE")]
    pub locale: Option<String>,

    /// Page size to request from the API
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: Option<u32>,

    /// API origin override; defaults to https://{subdomain}.zendesk.com
    #[arg(long, env = "ZENDESK_BASE_URL", hide = true)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Resolve the authentication strategy from the supplied credentials.
    ///
    /// A bearer token wins. Otherwise email and API token must be given
    /// together; neither means anonymous access.
    pub fn auth(&self) -> Result<Box<dyn Authenticate>, DumpError> {
        let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string);

        if let Some(token) = non_empty(&self.bearer_token) {
            return Ok(Box::new(BearerToken { token }));
        }

        match (non_empty(&self.email), non_empty(&self.api_token)) {
            (Some(email), Some(token)) => Ok(Box::new(BasicToken { email, token })),
            (None, None) => Ok(Box::new(NoAuth)),
            (Some(_), None) => Err(DumpError::Config(
                "--email / ZENDESK_EMAIL given without --api-token / ZENDESK_API_TOKEN".to_string(),
            )),
            (None, Some(_)) => Err(DumpError::Config(
                "--api-token / ZENDESK_API_TOKEN given without --email / ZENDESK_EMAIL".to_string(),
            )),
        }
    }

    /// The API origin requests are made against.
    pub fn base_url(&self) -> Result<Url, DumpError> {
        if let Some(base) = self.base_url.as_deref() {
            return Url::parse(base)
                .map_err(|e| DumpError::Config(format!("invalid base URL {base:?}: {e}")));
        }

        let subdomain = self.subdomain.trim();
        let valid = !subdomain.is_empty()
            && subdomain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(DumpError::Config(format!(
                "invalid subdomain {:?}: expected letters, digits and '-'",
                self.subdomain
            )));
        }

        Url::parse(&format!("https://{subdomain}.zendesk.com"))
            .map_err(|e| DumpError::Config(format!("invalid subdomain {subdomain:?}: {e}")))
    }

    pub fn body_format(&self) -> BodyFormat {
        if self.raw_html {
            BodyFormat::RawHtml
        } else {
            BodyFormat::Markdown
        }
    }
}

/// Process exit code for a failed parse.
///
/// `--help` and `--version` surface as clap errors printed to stdout and
/// exit 0; every real usage error exits 1.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}
