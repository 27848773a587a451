//! Library-backed markdown renderer.
//!
//! Parses with `pulldown-cmark` and writes an HTML fragment. Unlike the line
//! renderer it handles nesting, loose lists, indented code and raw HTML, and
//! escapes all text it emits.

use std::fmt::{self, Write};

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::frontmatter::strip_frontmatter;
use crate::html::{self, Literal, escape_html};
use crate::lite::{RenderFault, recover};
use crate::util::heading_level_to_num;

/// Result of rendering markdown with [`FullRenderer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FullRenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Plain text of the first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
}

/// Markdown renderer backed by `pulldown-cmark`.
///
/// # Example
///
/// ```
/// use postgen_content::FullRenderer;
///
/// let result = FullRenderer::new()
///     .with_title_extraction()
///     .render("# Hello\n\n**Bold** text");
/// assert_eq!(result.title.as_deref(), Some("Hello"));
/// assert!(result.html.contains("<strong>Bold</strong>"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FullRenderer {
    extract_title: bool,
}

impl FullRenderer {
    /// Create a renderer without title extraction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the text of the first H1 heading. The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Parser options: `CommonMark` plus strikethrough.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        Options::ENABLE_STRIKETHROUGH
    }

    /// Render markdown, surfacing internal faults.
    pub fn try_render(&self, content: &str) -> Result<FullRenderResult, RenderFault> {
        let clean = strip_frontmatter(content);
        let mut writer = EventWriter::new(self.extract_title, clean.len());
        for event in Parser::new_ext(clean, self.parser_options()) {
            writer.process_event(event)?;
        }
        Ok(writer.finish())
    }

    /// Render markdown to an HTML fragment.
    ///
    /// Falls back to the preprocessed input as `html` if rendering faults.
    pub fn render(&self, content: &str) -> FullRenderResult {
        recover(self.try_render(content), || FullRenderResult {
            html: strip_frontmatter(content).to_owned(),
            title: None,
        })
    }
}

/// Render markdown with [`FullRenderer`], extracting the title.
pub fn render_full(content: &str) -> FullRenderResult {
    FullRenderer::new().with_title_extraction().render(content)
}

/// Code block being collected.
struct CodeBuffer {
    lang: Option<String>,
    text: String,
}

/// Image waiting for its alt text.
struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

/// Streams parser events into HTML.
struct EventWriter {
    output: String,
    code: Option<CodeBuffer>,
    image: Option<PendingImage>,
    want_title: bool,
    title: Option<String>,
    in_title: bool,
}

impl EventWriter {
    fn new(want_title: bool, capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity * 2),
            code: None,
            image: None,
            want_title,
            title: None,
            in_title: false,
        }
    }

    fn finish(self) -> FullRenderResult {
        FullRenderResult {
            html: self.output.trim().to_owned(),
            title: self.title.map(|t| t.trim().to_owned()),
        }
    }

    fn process_event(&mut self, event: Event<'_>) -> fmt::Result {
        match event {
            Event::Start(tag) => self.start_tag(tag)?,
            Event::End(tag) => self.end_tag(tag)?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code)?,
            Event::Html(raw) | Event::InlineHtml(raw) => self.output.push_str(&raw),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.output.push_str("<br>\n"),
            Event::Rule => self.output.push_str("<hr>\n"),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Not supported
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) -> fmt::Result {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                if self.want_title && self.title.is_none() && level == HeadingLevel::H1 {
                    self.in_title = true;
                    self.title = Some(String::new());
                }
                write!(self.output, "<h{}>", heading_level_to_num(level))?;
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>\n"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBuffer {
                    lang,
                    text: String::new(),
                });
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>\n"),
                Some(n) => writeln!(self.output, r#"<ol start="{n}">"#)?,
                None => self.output.push_str("<ul>\n"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                if self.image.is_none() {
                    html::link_start(&dest_url, &title, &mut self.output)?;
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(PendingImage {
                    src: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            Tag::Superscript
            | Tag::Subscript
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell => {}
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) -> fmt::Result {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(level) => {
                self.in_title = false;
                writeln!(self.output, "</h{}>", heading_level_to_num(level))?;
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>\n"),
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    html::code_block(
                        code.lang.as_deref(),
                        &code.text,
                        Literal::Escaped,
                        &mut self.output,
                    )?;
                    self.output.push('\n');
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
            }
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    html::image(&image.src, &image.alt, &image.title, &mut self.output)?;
                }
            }
            TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell => {}
        }
        Ok(())
    }

    /// Push inline markup unless collecting image alt text, which is plain.
    fn push_inline(&mut self, markup: &str) {
        if self.image.is_none() {
            self.output.push_str(markup);
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = &mut self.code {
            code.text.push_str(text);
            return;
        }
        if let Some(image) = &mut self.image {
            image.alt.push_str(text);
            return;
        }
        self.capture_title(text);
        self.output.push_str(&escape_html(text));
    }

    fn inline_code(&mut self, code: &str) -> fmt::Result {
        if let Some(image) = &mut self.image {
            image.alt.push_str(code);
            return Ok(());
        }
        self.capture_title(code);
        write!(self.output, "<code>{}</code>", escape_html(code))
    }

    fn soft_break(&mut self) {
        if let Some(image) = &mut self.image {
            image.alt.push(' ');
            return;
        }
        self.capture_title(" ");
        self.output.push('\n');
    }

    fn capture_title(&mut self, text: &str) {
        if self.in_title
            && let Some(title) = &mut self.title
        {
            title.push_str(text);
        }
    }
}
