//! Line-oriented markdown renderer.
//!
//! A small fallback for when the full renderer is unavailable or unwanted.
//! It understands headings, fenced code, single-line block quotes, flat
//! lists, paragraphs and a handful of inline spans. Nothing else.
//!
//! Each line is fed to [`LineState`], which tracks the open paragraph, the
//! pending list and any open code fence, and writes finished fragments to the
//! output buffer. Lists are only written when they are closed, so a change of
//! list kind always produces two separate lists.

use std::fmt::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::fence::OpenFence;
use crate::frontmatter::strip_frontmatter;
use crate::html::{self, Literal};
use crate::inline::render_inline;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static UNORDERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s+").unwrap());

static ORDERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());

/// Options for the line renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// HTML-escape code blocks, code spans and block quotes.
    ///
    /// Off by default: output is expected to pass through a sanitizer, and
    /// stored content has always been rendered this way.
    pub escape_literals: bool,
}

/// Error raised while writing the output buffer.
///
/// [`LiteRenderer::render`] never returns it; it falls back to the
/// preprocessed input instead.
#[derive(Debug, thiserror::Error)]
#[error("failed to write rendered HTML: {0}")]
pub struct RenderFault(#[from] fmt::Error);

/// Unwrap a render result, degrading to `fallback` on fault.
pub(crate) fn recover<T>(result: Result<T, RenderFault>, fallback: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Markdown rendering failed, returning source text");
        fallback()
    })
}

/// Kind of the list being accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// List items waiting for the list to close. Never empty.
#[derive(Debug)]
struct OpenList {
    kind: ListKind,
    items: Vec<String>,
}

/// Mutable state for one render call.
#[derive(Debug)]
struct LineState<'a> {
    literal: Literal,
    out: String,
    in_paragraph: bool,
    list: Option<OpenList>,
    fence: Option<OpenFence<'a>>,
}

impl<'a> LineState<'a> {
    fn new(literal: Literal, capacity: usize) -> Self {
        Self {
            literal,
            out: String::with_capacity(capacity),
            in_paragraph: false,
            list: None,
            fence: None,
        }
    }

    fn handle_line(&mut self, raw: &'a str) -> fmt::Result {
        if let Some(fence) = &mut self.fence {
            if fence.push(raw) {
                return self.close_fence();
            }
            return Ok(());
        }

        let line = raw.trim();

        // Blank lines end paragraphs but not lists.
        if line.is_empty() {
            self.close_paragraph();
            return Ok(());
        }

        if let Some(caps) = HEADING.captures(line) {
            self.close_paragraph();
            self.close_list()?;
            let level = caps.get(1).map_or(1, |m| m.len());
            let text = caps.get(2).map_or("", |m| m.as_str());
            #[allow(clippy::cast_possible_truncation)] // at most 6
            html::heading(level as u8, text, &mut self.out)?;
            self.out.push('\n');
            return Ok(());
        }

        if let Some(fence) = OpenFence::open(line) {
            self.close_paragraph();
            self.close_list()?;
            self.fence = Some(fence);
            return Ok(());
        }

        if let Some(quote) = line.strip_prefix('>') {
            self.close_paragraph();
            self.close_list()?;
            html::blockquote(quote.trim_start(), self.literal, &mut self.out)?;
            self.out.push('\n');
            return Ok(());
        }

        if let Some(marker) = UNORDERED_MARKER.find(line) {
            return self.list_item(ListKind::Unordered, &line[marker.end()..]);
        }

        if let Some(marker) = ORDERED_MARKER.find(line) {
            return self.list_item(ListKind::Ordered, &line[marker.end()..]);
        }

        self.paragraph_line(line)
    }

    fn list_item(&mut self, kind: ListKind, text: &str) -> fmt::Result {
        self.close_paragraph();
        if self.list.as_ref().is_some_and(|list| list.kind != kind) {
            self.close_list()?;
        }

        let item = format!("<li>{}</li>\n", render_inline(text, self.literal));
        match &mut self.list {
            Some(list) => list.items.push(item),
            None => {
                self.list = Some(OpenList {
                    kind,
                    items: vec![item],
                });
            }
        }
        Ok(())
    }

    fn paragraph_line(&mut self, line: &str) -> fmt::Result {
        self.close_list()?;
        if self.in_paragraph {
            self.out.push(' ');
        } else {
            self.out.push_str("<p>");
            self.in_paragraph = true;
        }
        self.out.push_str(&render_inline(line, self.literal));
        Ok(())
    }

    fn close_paragraph(&mut self) {
        if self.in_paragraph {
            self.out.push_str("</p>\n");
            self.in_paragraph = false;
        }
    }

    fn close_list(&mut self) -> fmt::Result {
        let Some(list) = self.list.take() else {
            return Ok(());
        };
        let tag = list.kind.tag();
        writeln!(self.out, "<{tag}>\n{}\n</{tag}>", list.items.concat())
    }

    fn close_fence(&mut self) -> fmt::Result {
        let Some(fence) = self.fence.take() else {
            return Ok(());
        };
        html::code_block(fence.lang(), &fence.code(), self.literal, &mut self.out)?;
        self.out.push('\n');
        Ok(())
    }

    /// Close everything still open and return the trimmed output.
    fn finish(mut self) -> Result<String, fmt::Error> {
        // An unterminated fence runs to the end of input.
        self.close_fence()?;
        self.close_paragraph();
        self.close_list()?;
        Ok(self.out.trim().to_owned())
    }
}

/// Line-oriented markdown to HTML renderer.
///
/// # Example
///
/// ```
/// use postgen_content::LiteRenderer;
///
/// let html = LiteRenderer::new().render("# Hello\n\n**Bold** text");
/// assert_eq!(html, "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteRenderer {
    options: RenderOptions,
}

impl LiteRenderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable escaping of code and quote text.
    #[must_use]
    pub fn with_escaped_literals(mut self, enabled: bool) -> Self {
        self.options.escape_literals = enabled;
        self
    }

    fn literal(self) -> Literal {
        if self.options.escape_literals {
            Literal::Escaped
        } else {
            Literal::Raw
        }
    }

    /// Render markdown, surfacing internal faults.
    pub fn try_render(&self, content: &str) -> Result<String, RenderFault> {
        self.render_clean(strip_frontmatter(content))
    }

    /// Render markdown to an HTML fragment.
    ///
    /// Never fails: if rendering faults, the input is returned with
    /// frontmatter and any outer fence stripped.
    pub fn render(&self, content: &str) -> String {
        let clean = strip_frontmatter(content);
        recover(self.render_clean(clean), || clean.to_owned())
    }

    fn render_clean(self, clean: &str) -> Result<String, RenderFault> {
        if clean.is_empty() {
            return Ok(String::new());
        }

        let mut state = LineState::new(self.literal(), clean.len() + clean.len() / 2);
        let mut lines = 0usize;
        for line in clean.lines() {
            state.handle_line(line)?;
            lines += 1;
        }
        let html = state.finish()?;

        tracing::debug!(lines, input_len = clean.len(), output_len = html.len(), "Rendered markdown");
        Ok(html)
    }
}

/// Render markdown with the line renderer and default options.
///
/// ```
/// assert_eq!(postgen_content::render_markdown("# Hello"), "<h1>Hello</h1>");
/// ```
pub fn render_markdown(content: &str) -> String {
    LiteRenderer::new().render(content)
}
