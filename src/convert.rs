//! HTML to Markdown conversion for article bodies.
//!
//! The conversion is a fixed sequence of regex rewrites applied once, in
//! order, to the whole body. There is no DOM: nesting is not tracked and
//! entities are left as they are, so malformed markup gives best-effort
//! output rather than an error.
//!
//! # Pipeline
//!
//! 1. Drop `<script>` blocks
//! 2. `<img>` to `![alt](src)`
//! 3. `<h6>` .. `<h1>` to `######` .. `#` lines
//! 4. `<pre>` to fenced code blocks
//! 5. `<a href>` to `[text](href)`
//! 6. `<ul>`/`<ol>`/`<li>` to `- item` lines
//! 7. `<br>` to newline
//! 8. `<p>`/`<div>`/`<span>` to content plus a blank line
//! 9. Strip every remaining tag
//! 10. Normalise whitespace

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex must compile")
}

static SCRIPT: Lazy<Regex> = Lazy::new(|| re(r"(?is)<script\b.*?</script\s*>"));

static IMG: Lazy<Regex> = Lazy::new(|| re(r"(?i)<img\s[^>]*>"));
static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)')"#));
static IMG_ALT: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)(?:^|\s)alt\s*=\s*(?:"([^"]*)"|'([^']*)')"#));

/// Heading patterns, deepest level first.
static HEADINGS: Lazy<Vec<(usize, Regex)>> = Lazy::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            (
                level,
                re(&format!(r"(?is)<h{level}(?:\s[^>]*)?>\s*(.*?)\s*</h{level}\s*>")),
            )
        })
        .collect()
});

static PRE: Lazy<Regex> = Lazy::new(|| re(r"(?is)<pre(?:\s[^>]*)?>(.*?)</pre\s*>"));

static LINK: Lazy<Regex> = Lazy::new(|| {
    re(r#"(?is)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a\s*>"#)
});

// Item text starts right after the marker and ends at the closing tag,
// whatever indentation the markup carries.
static LIST_ITEM_OPEN: Lazy<Regex> = Lazy::new(|| re(r"(?i)\s*<li(?:\s[^>]*)?>\s*"));
static LIST_ITEM_CLOSE: Lazy<Regex> = Lazy::new(|| re(r"(?i)\s*</li\s*>\s*"));
static LIST_WRAPPER: Lazy<Regex> = Lazy::new(|| re(r"(?i)</?[uo]l(?:\s[^>]*)?>"));

static BR: Lazy<Regex> = Lazy::new(|| re(r"(?i)<br(?:\s[^>]*)?/?>"));

static BLOCK: Lazy<Regex> = Lazy::new(|| {
    re(r"(?is)<(?:p|div|span)(?:\s[^>]*)?>(.*?)</(?:p|div|span)\s*>")
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| re(r"<[^>]+>"));

static LINE_ENDING: Lazy<Regex> = Lazy::new(|| re(r"\r\n?"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| re(r"[ \t]+"));
static TRAILING_BLANK: Lazy<Regex> = Lazy::new(|| re(r"[ \t]+\n"));
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| re(r"\n{3,}"));

/// Convert an HTML fragment into Markdown text.
///
/// Never fails; input that matches none of the rewrites only has its tags
/// stripped and its whitespace normalised.
pub fn html_to_markdown(html: &str) -> String {
    let content = SCRIPT.replace_all(html, "");
    let content = IMG.replace_all(&content, rewrite_image);

    let mut content = content.into_owned();
    for (level, pattern) in HEADINGS.iter() {
        let replacement = format!("\n{} ${{1}}\n", "#".repeat(*level));
        content = pattern.replace_all(&content, replacement.as_str()).into_owned();
    }

    let content = PRE.replace_all(&content, "\n```\n${1}\n```\n");
    let content = LINK.replace_all(&content, |caps: &Captures| {
        let href = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        format!("[{}]({})", &caps[3], href)
    });

    let content = rewrite_lists(&content);
    let content = BR.replace_all(&content, "\n");
    let content = BLOCK.replace_all(&content, "${1}\n\n");
    let content = ANY_TAG.replace_all(&content, "");

    normalize_whitespace(&content)
}

fn rewrite_image(caps: &Captures) -> String {
    let tag = &caps[0];
    match attr_value(&IMG_SRC, tag) {
        Some(src) => {
            let alt = attr_value(&IMG_ALT, tag).unwrap_or_default();
            format!("![{alt}]({src})")
        }
        // Without a source there is nothing to link; step 9 drops the tag.
        None => tag.to_string(),
    }
}

fn attr_value<'t>(pattern: &Regex, tag: &'t str) -> Option<&'t str> {
    let caps = pattern.captures(tag)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

fn rewrite_lists(content: &str) -> String {
    let content = LIST_ITEM_CLOSE.replace_all(content, "");
    let content = LIST_ITEM_OPEN.replace_all(&content, "\n- ");
    LIST_WRAPPER.replace_all(&content, "\n").into_owned()
}

fn normalize_whitespace(content: &str) -> String {
    let content = LINE_ENDING.replace_all(content, "\n");
    let content = BLANK_RUN.replace_all(&content, " ");
    let content = TRAILING_BLANK.replace_all(&content, "\n");
    let content = NEWLINE_RUN.replace_all(&content, "\n\n");
    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_get_matching_hashes() {
        for level in 1..=6 {
            let html = format!(r#"<h{level} id="x">Getting started</h{level}>"#);
            let md = html_to_markdown(&html);
            let hashes = "#".repeat(level);
            assert_eq!(md, format!("{hashes} Getting started"), "level {level}");
        }
    }

    #[test]
    fn test_headings_inside_document() {
        let md = html_to_markdown("<p>Intro</p><h2>Setup</h2><p>Body</p>");
        assert_eq!(md, "Intro\n\n## Setup\nBody");
    }

    #[test]
    fn test_script_blocks_removed() {
        let html = "<p>Keep</p><script type=\"text/javascript\">\nvar x = '<p>no</p>';\n</script>";
        assert_eq!(html_to_markdown(html), "Keep");
    }

    #[test]
    fn test_image_rewrite() {
        let html = r#"<img src="https://cdn.example.com/a.png" alt="Login screen" width="300">"#;
        assert_eq!(
            html_to_markdown(html),
            "![Login screen](https://cdn.example.com/a.png)"
        );
    }

    #[test]
    fn test_image_alt_before_src_and_missing_alt() {
        assert_eq!(
            html_to_markdown(r#"<img alt="Logo" src="/logo.png" />"#),
            "![Logo](/logo.png)"
        );
        assert_eq!(html_to_markdown(r#"<img src="/x.png">"#), "![](/x.png)");
        assert_eq!(html_to_markdown(r#"<img data-src="/lazy.png">"#), "");
    }

    #[test]
    fn test_pre_becomes_fenced_block() {
        let md = html_to_markdown("<pre class=\"code\">curl -X GET /api</pre>");
        assert_eq!(md, "```\ncurl -X GET /api\n```");
    }

    #[test]
    fn test_links() {
        let md = html_to_markdown(
            r#"<p>See <a class="ext" href="https://example.com/docs" target="_blank">the docs</a>.</p>"#,
        );
        assert_eq!(md, "See [the docs](https://example.com/docs).");
    }

    #[test]
    fn test_flat_list() {
        let html = "<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>";
        assert_eq!(html_to_markdown(html), "- One\n- Two");
    }

    #[test]
    fn test_nested_lists_every_item_is_a_dash_line() {
        let html = "<ul><li>A<ul><li>B</li><li>C</li></ul></li><li>D</li></ul><ol><li>E</li></ol>";
        let md = html_to_markdown(html);
        for item in ["A", "B", "C", "D", "E"] {
            assert!(
                md.lines().any(|line| line == format!("- {item}")),
                "missing item {item} in {md:?}"
            );
        }
    }

    #[test]
    fn test_indented_list_items_keep_text_on_marker_line() {
        let html = "<ul>\n  <li>\n    First item\n  </li>\n  <li>\n    Second item\n  </li>\n</ul>";
        let md = html_to_markdown(html);
        assert_eq!(md, "- First item\n- Second item");
        assert!(md.lines().all(|line| line.starts_with("- ")));
    }

    #[test]
    fn test_indented_nested_list() {
        let html = "<ol>\n  <li>\n    Parent\n    <ul>\n      <li>\n        Child\n      </li>\n    </ul>\n  </li>\n</ol>";
        let md = html_to_markdown(html);
        for item in ["Parent", "Child"] {
            assert!(
                md.lines().any(|line| line == format!("- {item}")),
                "missing item {item} in {md:?}"
            );
        }
    }

    #[test]
    fn test_indented_headings() {
        for level in 1..=6 {
            let html = format!("<h{level}>\n  Setup\n</h{level}>");
            assert_eq!(html_to_markdown(&html), format!("{} Setup", "#".repeat(level)));
        }
        let md = html_to_markdown("<h3 class=\"t\">\n    Install\n  </h3>\n<p>Run it</p>");
        assert_eq!(md, "### Install\n\nRun it");
    }

    #[test]
    fn test_link_tag_is_not_a_list_item() {
        let md = html_to_markdown(r#"<link rel="stylesheet" href="a.css"><p>Text</p>"#);
        assert_eq!(md, "Text");
    }

    #[test]
    fn test_br_variants() {
        assert_eq!(html_to_markdown("a<br>b<br/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_paragraph_and_div_blocks() {
        let md = html_to_markdown("<p>First</p><div class=\"note\">Second</div><p>Third</p>");
        assert_eq!(md, "First\n\nSecond\n\nThird");
    }

    #[test]
    fn test_remaining_tags_stripped() {
        assert_eq!(
            html_to_markdown("<strong>Bold</strong> and <em>italic</em>"),
            "Bold and italic"
        );
    }

    #[test]
    fn test_newline_runs_collapse_to_two() {
        let md = html_to_markdown("\n\n  alpha\n\n\n\n\nbeta\n\n\n   \n\ngamma  \n\n\n");
        assert_eq!(md, "alpha\n\nbeta\n\ngamma");
        assert!(!md.contains("\n\n\n"));
    }

    #[test]
    fn test_space_runs_collapse() {
        assert_eq!(html_to_markdown("a \t  b\t\tc"), "a b c");
    }

    #[test]
    fn test_entities_left_alone() {
        assert_eq!(html_to_markdown("<p>Tom &amp; Jerry</p>"), "Tom &amp; Jerry");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_markdown(""), "");
        assert_eq!(html_to_markdown("   \n\n "), "");
    }
}
