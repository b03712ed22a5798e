//! Writing article documents to disk.
//!
//! Per-article files are named from the article ID, optionally followed by
//! the sanitised title. A combined dump always goes to [`COMBINED_FILENAME`].

use super::BodyFormat;
use super::markdown::{article_document, combined_document};
use crate::error::DumpError;
use crate::models::Article;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// File name used in combined mode.
pub const COMBINED_FILENAME: &str = "articles.md";

/// Longest sanitised name, in characters.
pub const MAX_FILENAME_CHARS: usize = 100;

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Naming scheme for per-article files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileNaming {
    /// `{id}.md`
    Id,
    /// `{id}-{sanitized-title}.md`
    IdTitle,
}

/// Make `name` safe to use as a file name component.
///
/// Replaces each of `<>:"/\|?*` (and control characters) with `_`, then
/// keeps at most [`MAX_FILENAME_CHARS`] characters.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_filename("What is A/B?"), "What is A_B_");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if FORBIDDEN_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

/// File name for a single article under the given scheme.
pub fn article_filename(article: &Article, naming: FileNaming) -> String {
    match naming {
        FileNaming::Id => format!("{}.md", article.id),
        FileNaming::IdTitle => format!("{}-{}.md", article.id, sanitize_filename(&article.title)),
    }
}

/// Write one article into `output_dir` and return the path written.
#[instrument(
    level = "info",
    skip_all,
    fields(id = article.id, section_id = ?article.section_id, position = article.position)
)]
pub async fn write_article(
    output_dir: &Path,
    article: &Article,
    naming: FileNaming,
    format: BodyFormat,
) -> Result<PathBuf, DumpError> {
    let path = output_dir.join(article_filename(article, naming));
    let content = article_document(article, format);

    fs::write(&path, content)
        .await
        .map_err(|source| DumpError::Write {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), "Wrote article");
    Ok(path)
}

/// Write every article into the single file at `path`.
///
/// Fails with [`DumpError::EmptyCombined`] before touching the filesystem
/// when `articles` is empty.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = articles.len()))]
pub async fn write_combined(
    path: &Path,
    articles: &[Article],
    format: BodyFormat,
) -> Result<PathBuf, DumpError> {
    if articles.is_empty() {
        return Err(DumpError::EmptyCombined);
    }

    let content = combined_document(articles, format);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| DumpError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(path, content)
        .await
        .map_err(|source| DumpError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Wrote combined file");
    Ok(path.to_path_buf())
}
