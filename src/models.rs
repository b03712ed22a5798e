//! Data models for Help Center articles and the paginated listing envelope.
//!
//! - [`Article`]: a single article record, taken verbatim from the API
//! - [`ArticlesPage`]: one page of the `articles.json` listing

use serde::{Deserialize, Deserializer};

/// A Help Center article as returned by the listing endpoint.
///
/// Timestamps are kept as the API's strings; they are only ever echoed
/// into the Markdown header, never interpreted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    /// Numeric article ID.
    pub id: i64,
    /// Article title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// The article body as an HTML fragment.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    /// Canonical public URL of the article.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locale: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
    /// Ordering position within the section.
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub section_id: Option<i64>,
}

/// One page of the article listing.
#[derive(Debug, Default, Deserialize)]
pub struct ArticlesPage {
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Absolute URL of the following page; `null` or `""` on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub previous_page: Option<String>,
    /// Total number of articles across all pages, when the API reports it.
    #[serde(default)]
    pub count: Option<u64>,
}

impl ArticlesPage {
    /// The link to follow next, if pagination is not exhausted.
    pub fn next_link(&self) -> Option<&str> {
        self.next_page
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
