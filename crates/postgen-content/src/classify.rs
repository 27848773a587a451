//! Content-type detection.
//!
//! Stored posts are either HTML saved by the editor or markdown straight from
//! the generator. [`classify`] tells them apart with pattern heuristics so the
//! caller knows whether the content still needs rendering.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Kind of a raw content string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentKind {
    /// Already HTML; display as-is.
    Html,
    /// Markdown; render before display.
    Markdown,
}

impl ContentKind {
    /// Lowercase label (`"html"` or `"markdown"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line-anchored markdown signals. Any match means markdown, even when HTML
/// tags are present further down.
static MARKDOWN_SIGNALS: LazyLock<[Regex; 9]> = LazyLock::new(|| {
    [
        // Headings
        Regex::new(r"(?m)^#{1,6}\s+").unwrap(),
        // Bold/italic with asterisks
        Regex::new(r"(?m)^\*{1,2}[^*]+\*{1,2}").unwrap(),
        // Italic with underscores
        Regex::new(r"(?m)^_[^_]+_").unwrap(),
        // Links
        Regex::new(r"(?m)^\[([^\]]+)\]\(([^)]+)\)").unwrap(),
        // Fenced code blocks
        Regex::new(r"(?m)^```[\s\S]*?```").unwrap(),
        // Inline code
        Regex::new(r"(?m)^`[^`]+`").unwrap(),
        // Ordered lists
        Regex::new(r"(?m)^\d+\.\s+").unwrap(),
        // Unordered lists
        Regex::new(r"(?m)^[-*+]\s+").unwrap(),
        // Blockquotes
        Regex::new(r"(?m)^>\s+").unwrap(),
    ]
});

static HTML_SIGNALS: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)<p[^>]*>").unwrap(),
        Regex::new(r"(?i)<div[^>]*>").unwrap(),
        Regex::new(r"(?i)<h[1-6][^>]*>").unwrap(),
        Regex::new(r"(?i)<strong[^>]*>").unwrap(),
        Regex::new(r"(?i)<em[^>]*>").unwrap(),
        Regex::new(r"(?i)<a[^>]*href=").unwrap(),
    ]
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// More tag-like substrings than this means HTML regardless of which tags.
const TAG_COUNT_THRESHOLD: usize = 3;

/// Classify raw content as HTML or markdown.
///
/// Rules, first match wins:
/// 1. empty input is markdown
/// 2. trimmed input starting with `<` is HTML
/// 3. any line-anchored markdown signal means markdown
/// 4. more than three tag-like substrings means HTML
/// 5. otherwise HTML only if a common block or inline tag is present
///
/// # Examples
///
/// ```
/// use postgen_content::{ContentKind, classify};
///
/// assert_eq!(classify("<p>hi</p>"), ContentKind::Html);
/// assert_eq!(classify("# Title"), ContentKind::Markdown);
/// assert_eq!(classify(""), ContentKind::Markdown);
/// ```
pub fn classify(content: &str) -> ContentKind {
    if content.is_empty() {
        return ContentKind::Markdown;
    }

    let trimmed = content.trim();

    if trimmed.starts_with('<') {
        tracing::trace!(rule = "leading-tag", "Classified as HTML");
        return ContentKind::Html;
    }

    if MARKDOWN_SIGNALS.iter().any(|re| re.is_match(trimmed)) {
        tracing::trace!(rule = "markdown-signal", "Classified as markdown");
        return ContentKind::Markdown;
    }

    let tag_count = TAG.find_iter(trimmed).take(TAG_COUNT_THRESHOLD + 1).count();
    if tag_count > TAG_COUNT_THRESHOLD {
        tracing::trace!(rule = "tag-count", "Classified as HTML");
        return ContentKind::Html;
    }

    if HTML_SIGNALS.iter().any(|re| re.is_match(trimmed)) {
        tracing::trace!(rule = "html-signal", "Classified as HTML");
        ContentKind::Html
    } else {
        ContentKind::Markdown
    }
}

/// Shorthand for `classify(content) == ContentKind::Html`.
pub fn is_html(content: &str) -> bool {
    classify(content) == ContentKind::Html
}
