//! HTML fragment emitters shared by the lite and full renderers.
//!
//! Every emitter writes into a caller-owned buffer and returns
//! [`std::fmt::Result`] so a failed write surfaces as a render fault instead
//! of a panic.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text or attribute values.
///
/// Borrows the input when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use postgen_content::escape_html;
///
/// assert_eq!(escape_html("a < b"), "a &lt; b");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// How literal text (code and quotes) is written into the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Literal {
    /// Written verbatim; an external sanitizer owns escaping.
    #[default]
    Raw,
    /// HTML-escaped.
    Escaped,
}

impl Literal {
    pub(crate) fn apply(self, s: &str) -> Cow<'_, str> {
        match self {
            Self::Raw => Cow::Borrowed(s),
            Self::Escaped => escape_html(s),
        }
    }
}

/// `<hN>text</hN>`.
pub(crate) fn heading(level: u8, text: &str, out: &mut String) -> fmt::Result {
    write!(out, "<h{level}>{text}</h{level}>")
}

/// `<pre><code>`, with a `language-*` class when a language is known.
pub(crate) fn code_block(
    lang: Option<&str>,
    content: &str,
    literal: Literal,
    out: &mut String,
) -> fmt::Result {
    match lang {
        Some(lang) => write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            literal.apply(lang),
            literal.apply(content)
        ),
        None => write!(out, "<pre><code>{}</code></pre>", literal.apply(content)),
    }
}

/// Single-line `<blockquote>`.
pub(crate) fn blockquote(text: &str, literal: Literal, out: &mut String) -> fmt::Result {
    write!(out, "<blockquote>{}</blockquote>", literal.apply(text))
}

/// `<img>` with an optional title attribute. Attributes are always escaped.
pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) -> fmt::Result {
    if title.is_empty() {
        write!(
            out,
            r#"<img src="{}" alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
    } else {
        write!(
            out,
            r#"<img src="{}" title="{}" alt="{}">"#,
            escape_html(src),
            escape_html(title),
            escape_html(alt)
        )
    }
}

/// Opening `<a>` tag with an optional title attribute.
pub(crate) fn link_start(href: &str, title: &str, out: &mut String) -> fmt::Result {
    if title.is_empty() {
        write!(out, r#"<a href="{}">"#, escape_html(href))
    } else {
        write!(
            out,
            r#"<a href="{}" title="{}">"#,
            escape_html(href),
            escape_html(title)
        )
    }
}
