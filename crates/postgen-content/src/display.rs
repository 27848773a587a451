//! Stored content to display-ready HTML.
//!
//! Content saved by the editor is already HTML and is passed through. Fresh
//! generator output is markdown and is rendered with the selected engine.

use std::fmt;
use std::str::FromStr;

use crate::classify::{ContentKind, classify};
use crate::full::FullRenderer;
use crate::lite::{LiteRenderer, RenderOptions};

/// Renderer used for markdown content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderEngine {
    /// Line-oriented renderer ([`LiteRenderer`]).
    #[default]
    Lite,
    /// `pulldown-cmark` renderer ([`FullRenderer`]).
    Full,
}

impl RenderEngine {
    /// Lowercase name (`"lite"` or `"full"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lite => "lite",
            Self::Full => "full",
        }
    }

    /// Render markdown with this engine.
    #[must_use]
    pub fn render(self, content: &str, options: RenderOptions) -> String {
        match self {
            Self::Lite => LiteRenderer::new().with_options(options).render(content),
            Self::Full => FullRenderer::new().render(content).html,
        }
    }
}

impl fmt::Display for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown engine name.
#[derive(Debug, thiserror::Error)]
#[error("unknown render engine `{0}` (expected `lite` or `full`)")]
pub struct UnknownEngine(String);

impl FromStr for RenderEngine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lite" => Ok(Self::Lite),
            "full" => Ok(Self::Full),
            _ => Err(UnknownEngine(s.to_owned())),
        }
    }
}

/// Turn stored content into HTML ready for a sanitizer.
///
/// Empty content yields `""`. HTML is returned unchanged. Markdown is
/// rendered with `engine`.
///
/// # Examples
///
/// ```
/// use postgen_content::{RenderEngine, RenderOptions, to_display_html};
///
/// let options = RenderOptions::default();
/// assert_eq!(to_display_html("<p>x</p>", RenderEngine::Lite, options), "<p>x</p>");
/// assert_eq!(to_display_html("# x", RenderEngine::Lite, options), "<h1>x</h1>");
/// ```
pub fn to_display_html(content: &str, engine: RenderEngine, options: RenderOptions) -> String {
    if content.is_empty() {
        return String::new();
    }

    match classify(content) {
        ContentKind::Html => content.to_owned(),
        ContentKind::Markdown => engine.render(content, options),
    }
}

/// [`to_display_html`] with the line renderer and default options.
pub fn to_display_html_default(content: &str) -> String {
    to_display_html(content, RenderEngine::Lite, RenderOptions::default())
}
