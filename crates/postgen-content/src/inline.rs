//! Inline span rewriting for the line renderer.
//!
//! Spans are resolved by an ordered list of regex passes over one line of
//! text. Order is significant: each pass must not re-match markup produced by
//! an earlier one.
//!
//! ```text
//! `code`         shielded first, restored last
//! ***x***        before ** and *, which would split it
//! **x**          before *, which would match its inner pair
//! *x*
//! ~~x~~
//! [text](url)    last, so emphasis inside link text is already resolved
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html::Literal;

/// Markers around a shielded span index. Private-use code points keep them
/// out of reach of the emphasis and link patterns.
const SHIELD_OPEN: char = '\u{E000}';
const SHIELD_CLOSE: char = '\u{E001}';

/// Code spans, plus any marker characters already present in the text. The
/// latter are shielded too, so every marker left in the line is ours.
static SHIELD_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{E000}\x{E001}]|`([^`]+)`").unwrap());

static SHIELDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap());

/// One rewrite step: every match of `pattern` becomes `replacement`.
struct InlinePass {
    pattern: Regex,
    replacement: &'static str,
}

impl InlinePass {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

static PASSES: LazyLock<[InlinePass; 5]> = LazyLock::new(|| {
    [
        // Bold + italic
        InlinePass::new(r"\*\*\*([^*]+)\*\*\*", "<strong><em>${1}</em></strong>"),
        // Bold
        InlinePass::new(r"\*\*([^*]+)\*\*", "<strong>${1}</strong>"),
        // Italic
        InlinePass::new(r"\*([^*]+)\*", "<em>${1}</em>"),
        // Strikethrough
        InlinePass::new(r"~~([^~]+)~~", "<del>${1}</del>"),
        // Links
        InlinePass::new(r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="${2}">${1}</a>"#),
    ]
});

/// Text taken out of the line before the rewrite passes run.
enum Shielded {
    Code(String),
    Marker(char),
}

/// Rewrite inline markdown spans in `text` to HTML.
pub(crate) fn render_inline(text: &str, literal: Literal) -> String {
    let mut spans: Vec<Shielded> = Vec::new();
    let mut line = SHIELD_SOURCE
        .replace_all(text, |caps: &Captures<'_>| {
            let index = spans.len();
            spans.push(match caps.get(1) {
                Some(code) => Shielded::Code(code.as_str().to_owned()),
                None => Shielded::Marker(caps[0].chars().next().unwrap_or(SHIELD_OPEN)),
            });
            format!("{SHIELD_OPEN}{index}{SHIELD_CLOSE}")
        })
        .into_owned();

    for pass in PASSES.iter() {
        let rewritten = pass.pattern.replace_all(&line, pass.replacement);
        if matches!(rewritten, Cow::Owned(_)) {
            line = rewritten.into_owned();
        }
    }

    if spans.is_empty() {
        return line;
    }

    SHIELDED
        .replace_all(&line, |caps: &Captures<'_>| {
            let span = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<usize>().ok())
                .and_then(|index| spans.get(index));
            match span {
                Some(Shielded::Code(code)) => format!("<code>{}</code>", literal.apply(code)),
                Some(Shielded::Marker(marker)) => marker.to_string(),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}
