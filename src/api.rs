//! Help Center API access: authentication, page fetching, pagination.
//!
//! # Architecture
//!
//! - [`Authenticate`]: pluggable request authentication ([`NoAuth`],
//!   [`BasicToken`], [`BearerToken`])
//! - [`FetchPage`]: fetch and decode one listing page by URL
//! - [`HelpCenterClient`]: the reqwest-backed [`FetchPage`]
//! - [`Pages`]: walks the `next_page` chain one request at a time
//!
//! There is no retry: any transport failure, non-2xx status or undecodable
//! body ends the walk with an error.

use crate::error::DumpError;
use crate::models::ArticlesPage;
use crate::utils::truncate_for_log;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use std::fmt;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Path of the article listing, relative to the Help Center origin.
const LISTING_PREFIX: &str = "api/v2/help_center/";
const LISTING_FILE: &str = "articles.json";

/// Build the first listing URL.
///
/// `base` is the API origin, e.g. `https://acme.zendesk.com`. With a
/// `locale` the listing is scoped to `/api/v2/help_center/{locale}/articles.json`.
pub fn listing_url(base: &Url, locale: Option<&str>, per_page: Option<u32>) -> Result<Url, DumpError> {
    let mut path = String::from(LISTING_PREFIX);
    if let Some(locale) = locale.map(str::trim).filter(|l| !l.is_empty()) {
        path.push_str(locale);
        path.push('/');
    }
    path.push_str(LISTING_FILE);

    let mut url = base
        .join(&path)
        .map_err(|e| DumpError::Config(format!("invalid listing URL for {base}: {e}")))?;
    if let Some(per_page) = per_page {
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());
    }
    Ok(url)
}

/// Request authentication strategy.
pub trait Authenticate: fmt::Debug {
    /// Short label for logs; never contains secrets.
    fn kind(&self) -> &'static str;

    /// Attach credentials to an outgoing request.
    fn apply(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Anonymous access; works for public Help Centers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Authenticate for NoAuth {
    fn kind(&self) -> &'static str {
        "none"
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }
}

/// API token authentication: HTTP Basic with `{email}/token` as user name.
#[derive(Clone)]
pub struct BasicToken {
    pub email: String,
    pub token: String,
}

impl BasicToken {
    pub fn username(&self) -> String {
        format!("{}/token", self.email)
    }
}

impl fmt::Debug for BasicToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicToken")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Authenticate for BasicToken {
    fn kind(&self) -> &'static str {
        "basic"
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(self.username(), Some(&self.token))
    }
}

/// OAuth access token obtained elsewhere, sent as `Authorization: Bearer`.
#[derive(Clone)]
pub struct BearerToken {
    pub token: String,
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Authenticate for BearerToken {
    fn kind(&self) -> &'static str {
        "bearer"
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// Fetch a single listing page.
pub trait FetchPage {
    /// GET `url` and decode it as an [`ArticlesPage`].
    async fn fetch_page(&self, url: &str) -> Result<ArticlesPage, DumpError>;
}

/// [`FetchPage`] over HTTP with a shared reqwest [`Client`].
pub struct HelpCenterClient {
    http: Client,
    auth: Box<dyn Authenticate>,
}

impl fmt::Debug for HelpCenterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelpCenterClient")
            .field("auth", &self.auth.kind())
            .finish()
    }
}

impl HelpCenterClient {
    pub fn new(auth: Box<dyn Authenticate>) -> Result<Self, DumpError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DumpError::Client)?;
        Ok(Self { http, auth })
    }

    pub fn auth_kind(&self) -> &'static str {
        self.auth.kind()
    }
}

impl FetchPage for HelpCenterClient {
    #[instrument(level = "info", skip(self), fields(auth = self.auth.kind()))]
    async fn fetch_page(&self, url: &str) -> Result<ArticlesPage, DumpError> {
        let transport = |source| DumpError::Transport {
            url: url.to_string(),
            source,
        };

        let request = self
            .auth
            .apply(self.http.get(url).header(ACCEPT, "application/json"));
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            error!(
                %status,
                body_preview = %truncate_for_log(&body, 300),
                "API request failed"
            );
            return Err(DumpError::Status {
                status,
                url: url.to_string(),
                body,
            });
        }

        debug!(%status, bytes = body.len(), "Received listing page");
        serde_json::from_str::<ArticlesPage>(&body).map_err(|source| {
            error!(
                error = %source,
                body_preview = %truncate_for_log(&body, 300),
                "Response is not a valid article listing"
            );
            DumpError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}

/// Sequential walk over the listing, following `next_page` links.
///
/// ```ignore
/// let mut pages = Pages::new(&client, start_url.as_str());
/// while let Some(page) = pages.next().await? {
///     // handle page.articles
/// }
/// ```
pub struct Pages<'a, S> {
    source: &'a S,
    next_url: Option<String>,
    fetched: usize,
}

impl<'a, S: FetchPage> Pages<'a, S> {
    pub fn new(source: &'a S, start_url: impl Into<String>) -> Self {
        Self {
            source,
            next_url: Some(start_url.into()),
            fetched: 0,
        }
    }

    /// Fetch the next page, or `Ok(None)` once the previous page had no
    /// `next_page` link.
    pub async fn next(&mut self) -> Result<Option<ArticlesPage>, DumpError> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let page = self.source.fetch_page(&url).await?;
        self.fetched += 1;
        self.next_url = page.next_link().map(str::to_string);
        debug!(
            previous = ?page.previous_page.as_deref(),
            next = ?self.next_url.as_deref(),
            "Page links"
        );

        info!(
            page = self.fetched,
            articles = page.articles.len(),
            total = ?page.count,
            has_next = self.next_url.is_some(),
            "Fetched article page"
        );
        Ok(Some(page))
    }

    /// Number of pages fetched so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }
}
