//! Markdown rendering for single articles and combined dumps.
//!
//! Every article renders to the same block:
//!
//! ```text
//! # {title}
//!
//! - ID: {id}
//! - URL: {html_url}
//! - Created: {created_at}
//! - Updated: {updated_at}
//! - Locale: {locale}
//!
//! ---
//!
//! {body}
//! ```
//!
//! A combined dump joins these blocks with a 50-dash rule.

use super::BodyFormat;
use crate::convert::html_to_markdown;
use crate::models::Article;
use std::fmt::Write;

/// Width of the rule placed between articles in a combined dump.
pub const SEPARATOR_WIDTH: usize = 50;

/// Render the article body according to `format`.
pub fn render_body(article: &Article, format: BodyFormat) -> String {
    match format {
        BodyFormat::Markdown => html_to_markdown(&article.body),
        BodyFormat::RawHtml => article.body.clone(),
    }
}

/// Render the header block and body of one article, without a trailing newline.
pub fn article_to_markdown(article: &Article, format: BodyFormat) -> String {
    let mut md = String::new();

    writeln!(md, "# {}\n", article.title).unwrap();
    writeln!(md, "- ID: {}", article.id).unwrap();
    writeln!(md, "- URL: {}", article.html_url).unwrap();
    writeln!(md, "- Created: {}", article.created_at).unwrap();
    writeln!(md, "- Updated: {}", article.updated_at).unwrap();
    writeln!(md, "- Locale: {}\n", article.locale).unwrap();
    write!(md, "---\n\n{}", render_body(article, format)).unwrap();

    md
}

/// Full contents of a per-article file.
pub fn article_document(article: &Article, format: BodyFormat) -> String {
    let mut md = article_to_markdown(article, format);
    md.push('\n');
    md
}

/// Full contents of the combined file, articles in the order given.
pub fn combined_document(articles: &[Article], format: BodyFormat) -> String {
    let separator = format!("\n\n{}\n\n", "-".repeat(SEPARATOR_WIDTH));
    let mut md = articles
        .iter()
        .map(|article| article_to_markdown(article, format))
        .collect::<Vec<_>>()
        .join(&separator);
    md.push('\n');
    md
}
