//! Code fence tracking for the line renderer.
//!
//! Only backtick fences are recognized. Any line whose trimmed form starts
//! with three backticks closes an open fence, whatever follows the backticks.

const FENCE: &str = "```";

/// A fenced code block being collected line by line.
#[derive(Debug)]
pub(crate) struct OpenFence<'a> {
    /// Language tag from the opening line, if any.
    lang: Option<&'a str>,
    /// Interior lines, untrimmed.
    lines: Vec<&'a str>,
}

impl<'a> OpenFence<'a> {
    /// Start a fence if `trimmed` is an opening fence line.
    pub(crate) fn open(trimmed: &'a str) -> Option<Self> {
        let info = trimmed.strip_prefix(FENCE)?.trim();
        Some(Self {
            lang: (!info.is_empty()).then_some(info),
            lines: Vec::new(),
        })
    }

    /// Feed the next raw line. Returns `true` if the line closed the fence.
    pub(crate) fn push(&mut self, line: &'a str) -> bool {
        if line.trim().starts_with(FENCE) {
            return true;
        }
        self.lines.push(line);
        false
    }

    pub(crate) fn lang(&self) -> Option<&'a str> {
        self.lang
    }

    /// Collected code with leading and trailing blank lines dropped.
    pub(crate) fn code(&self) -> String {
        let is_blank = |line: &&str| line.trim().is_empty();
        let start = self
            .lines
            .iter()
            .position(|l| !is_blank(l))
            .unwrap_or(self.lines.len());
        let end = self
            .lines
            .iter()
            .rposition(|l| !is_blank(l))
            .map_or(start, |i| i + 1);
        let body = self.lines[start..end].join("\n");
        body.trim_end().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_open_with_language() {
        let fence = OpenFence::open("```rust").unwrap();
        assert_eq!(fence.lang(), Some("rust"));
    }

    #[test]
    fn test_open_without_language() {
        let fence = OpenFence::open("```").unwrap();
        assert_eq!(fence.lang(), None);
    }

    #[test]
    fn test_open_trims_info() {
        let fence = OpenFence::open("```  python  ").unwrap();
        assert_eq!(fence.lang(), Some("python"));
    }

    #[test]
    fn test_regular_line_does_not_open() {
        assert!(OpenFence::open("plain text").is_none());
        assert!(OpenFence::open("``inline``").is_none());
    }

    #[test]
    fn test_collect_until_close() {
        let mut fence = OpenFence::open("```js").unwrap();
        assert!(!fence.push("let a = 1;"));
        assert!(!fence.push(""));
        assert!(!fence.push("  let b = 2;"));
        assert!(fence.push("```"));
        assert_eq!(fence.code(), "let a = 1;\n\n  let b = 2;");
    }

    #[test]
    fn test_indented_close() {
        let mut fence = OpenFence::open("```").unwrap();
        assert!(fence.push("   ```"));
    }

    #[test]
    fn test_any_fence_line_closes() {
        let mut fence = OpenFence::open("```").unwrap();
        assert!(fence.push("```python"));
    }

    #[test]
    fn test_code_drops_surrounding_blank_lines() {
        let mut fence = OpenFence::open("```").unwrap();
        for line in ["", "   ", "    indented", "", "next", "  ", ""] {
            fence.push(line);
        }
        assert_eq!(fence.code(), "    indented\n\nnext");
    }

    #[test]
    fn test_empty_code() {
        let mut fence = OpenFence::open("```").unwrap();
        fence.push("");
        assert_eq!(fence.code(), "");
    }
}
