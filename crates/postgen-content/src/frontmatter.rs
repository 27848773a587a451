//! Preprocessing shared by both renderers.
//!
//! Generated posts sometimes arrive with a YAML frontmatter header or wrapped
//! in an outer ```` ```md ```` fence. Both are removed before rendering.

use std::sync::LazyLock;

use regex::Regex;

static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---\s*\n([\s\S]*?)\n---\s*\n").unwrap());

static WRAPPER_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A```(?:md|mdx)?\s*\n").unwrap());

/// Split a leading `---` delimited frontmatter block from the body.
///
/// Returns the raw frontmatter (without delimiters) and the remaining text.
/// Content without frontmatter is returned whole as the body.
///
/// # Examples
///
/// ```
/// use postgen_content::split_frontmatter;
///
/// let (meta, body) = split_frontmatter("---\ntitle: x\n---\n# H");
/// assert_eq!(meta, Some("title: x"));
/// assert_eq!(body, "# H");
/// ```
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    match FRONTMATTER.captures(content) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let meta = caps.get(1).map(|m| m.as_str());
            (meta, &content[whole..])
        }
        None => (None, content),
    }
}

/// Remove frontmatter and an outer markdown fence, then trim.
///
/// The closing wrapper fence is only removed when the opening one was, and
/// only when it is left unpaired by the fences inside the body.
///
/// # Examples
///
/// ```
/// use postgen_content::strip_frontmatter;
///
/// assert_eq!(strip_frontmatter("---\ntitle: x\n---\n# H"), "# H");
/// assert_eq!(strip_frontmatter("```md\n# H\n```"), "# H");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    let (_, body) = split_frontmatter(content);

    let Some(fence) = WRAPPER_FENCE.find(body) else {
        return body.trim();
    };

    strip_closing_wrapper(&body[fence.end()..]).trim()
}

/// Drop a trailing bare ```` ``` ```` line when the fence lines in `body`
/// don't pair up on their own.
fn strip_closing_wrapper(body: &str) -> &str {
    let body = body.trim_end();
    let fence_lines = body
        .lines()
        .filter(|line| line.trim_start().starts_with("```"))
        .count();
    if fence_lines % 2 == 0 {
        return body;
    }

    let (head, last) = match body.rfind('\n') {
        Some(idx) => (&body[..idx], &body[idx + 1..]),
        None => ("", body),
    };
    if last.trim() == "```" { head } else { body }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_without_frontmatter() {
        assert_eq!(split_frontmatter("# Title"), (None, "# Title"));
    }

    #[test]
    fn test_split_multiline_frontmatter() {
        let (meta, body) = split_frontmatter("---\ntitle: x\ntags: [a, b]\n---\nBody");
        assert_eq!(meta, Some("title: x\ntags: [a, b]"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_frontmatter_must_be_at_start() {
        let content = "Intro\n---\ntitle: x\n---\nBody";
        assert_eq!(split_frontmatter(content), (None, content));
    }

    #[test]
    fn test_unterminated_frontmatter_is_kept() {
        let content = "---\ntitle: x\n# Body";
        assert_eq!(strip_frontmatter(content), content);
    }

    #[test]
    fn test_strip_frontmatter() {
        assert_eq!(strip_frontmatter("---\ntitle: x\n---\n# H"), "# H");
    }

    #[test]
    fn test_strip_trims() {
        assert_eq!(strip_frontmatter("\n\n  text  \n\n"), "text");
    }

    #[test]
    fn test_strip_md_wrapper() {
        assert_eq!(strip_frontmatter("```md\n# T\n```"), "# T");
        assert_eq!(strip_frontmatter("```mdx\n# T\n```\n"), "# T");
    }

    #[test]
    fn test_strip_bare_wrapper() {
        assert_eq!(strip_frontmatter("```\nHello\n```"), "Hello");
    }

    #[test]
    fn test_wrapper_with_unclosed_tail_keeps_body() {
        assert_eq!(strip_frontmatter("```md\n# T\nText"), "# T\nText");
    }

    #[test]
    fn test_wrapper_keeps_inner_fences() {
        let content = "```md\n# T\n```js\nx()\n```\n```";
        assert_eq!(strip_frontmatter(content), "# T\n```js\nx()\n```");
    }

    #[test]
    fn test_tagged_code_block_is_not_a_wrapper() {
        let content = "```js\nconsole.log(1)\n```";
        assert_eq!(strip_frontmatter(content), content);
    }

    #[test]
    fn test_frontmatter_then_wrapper() {
        assert_eq!(strip_frontmatter("---\na: b\n---\n```md\nText\n```"), "Text");
    }
}
