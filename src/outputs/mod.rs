//! Output generation for dumped articles.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders an [`Article`](crate::models::Article) to its Markdown document
//! - [`files`]: Names, sanitises and writes the `.md` files
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 360001234567.md                      # --naming id
//! ├── 360001234568-Resetting your password.md  # --naming id-title
//! └── articles.md                          # --combine
//! ```

pub mod files;
pub mod markdown;

/// How an article body is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// Run the body through [`html_to_markdown`](crate::convert::html_to_markdown).
    Markdown,
    /// Write the HTML body untouched.
    RawHtml,
}
