//! Content-type detection and markdown rendering for generated posts.
//!
//! Posts are stored either as HTML (saved from the editor) or as markdown
//! (fresh from the generator). This crate decides which one a string is and
//! turns markdown into an HTML fragment.
//!
//! # Architecture
//!
//! - [`classify`]: pattern heuristics returning a [`ContentKind`]
//! - [`LiteRenderer`]: a line-oriented renderer for a small markdown subset
//! - [`FullRenderer`]: a `pulldown-cmark` backed renderer
//! - [`to_display_html`]: classify, then pass HTML through or render markdown
//!
//! Both renderers strip YAML frontmatter and an outer ```` ```md ```` fence
//! first (see [`strip_frontmatter`]) and never fail outward.
//!
//! Output is not sanitized. Callers must run it through an HTML sanitizer
//! before inserting it into a page.
//!
//! # Example
//!
//! ```
//! use postgen_content::{ContentKind, classify, render_markdown};
//!
//! let content = "# Hello\n\n**Bold** text";
//! assert_eq!(classify(content), ContentKind::Markdown);
//! assert_eq!(
//!     render_markdown(content),
//!     "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>"
//! );
//! ```

mod classify;
mod display;
mod fence;
mod frontmatter;
mod full;
mod html;
mod inline;
mod lite;
mod util;

pub use classify::{ContentKind, classify, is_html};
pub use display::{RenderEngine, UnknownEngine, to_display_html, to_display_html_default};
pub use frontmatter::{split_frontmatter, strip_frontmatter};
pub use full::{FullRenderResult, FullRenderer, render_full};
pub use html::escape_html;
pub use lite::{LiteRenderer, RenderFault, RenderOptions, render_markdown};
