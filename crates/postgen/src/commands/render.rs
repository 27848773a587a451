//! `postgen render` command implementation.

use std::path::PathBuf;

use clap::Args;
use postgen_config::{CliSettings, Config};
use postgen_content::{ContentKind, FullRenderer, RenderEngine, classify};

use super::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input file (default: stdin, also `-`).
    path: Option<PathBuf>,

    /// Markdown renderer: `lite` or `full` (overrides config).
    #[arg(long)]
    engine: Option<RenderEngine>,

    /// Escape code and quote text (lite engine).
    #[arg(long)]
    escape_literals: bool,

    /// Print the first H1 to stderr (implies `--engine full`).
    #[arg(long)]
    title: bool,

    /// Render as markdown without classifying.
    #[arg(long)]
    assume_markdown: bool,

    /// Path to configuration file (default: auto-discover postgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    fn cli_settings(&self) -> CliSettings {
        let engine = match (self.engine, self.title) {
            (None, true) => Some(RenderEngine::Full),
            (engine, _) => engine,
        };
        CliSettings {
            engine,
            escape_literals: self.escape_literals.then_some(true),
            extract_title: self.title.then_some(true),
        }
    }

    /// Execute the render command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let render = &config.render;
        let content = read_input(self.path.as_deref())?;

        let kind = if self.assume_markdown {
            ContentKind::Markdown
        } else {
            classify(&content)
        };
        tracing::info!(kind = %kind, engine = %render.engine, "Rendering content");

        let html = match kind {
            ContentKind::Html => content,
            ContentKind::Markdown if render.extract_title => {
                let result = FullRenderer::new().with_title_extraction().render(&content);
                match &result.title {
                    Some(title) => output.highlight(&format!("Title: {title}")),
                    None => output.warning("No title found"),
                }
                result.html
            }
            ContentKind::Markdown => render.engine.render(&content, render.options()),
        };

        output.result(&html)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RenderArgs,
    }

    fn parse(args: &[&str]) -> RenderArgs {
        let argv = std::iter::once("render").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_parse_engine() {
        let args = parse(&["post.md", "--engine", "full"]);

        assert_eq!(args.engine, Some(RenderEngine::Full));
        assert_eq!(args.path, Some(PathBuf::from("post.md")));
    }

    #[test]
    fn test_parse_config_path() {
        let args = parse(&["-c", "custom.toml", "post.md"]);

        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let post = dir.path().join("post.md");
        std::fs::write(&post, "# Title").unwrap();
        let config = dir.path().join("missing.toml");

        let args = parse(&[
            post.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]);
        let err = args.execute(&Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_unknown_engine_fails() {
        let argv = ["render", "--engine", "remark"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_settings_default_leave_config_alone() {
        let settings = parse(&[]).cli_settings();

        assert_eq!(settings.engine, None);
        assert_eq!(settings.escape_literals, None);
        assert_eq!(settings.extract_title, None);
    }

    #[test]
    fn test_settings_title_selects_full_engine() {
        let settings = parse(&["--title"]).cli_settings();

        assert_eq!(settings.engine, Some(RenderEngine::Full));
        assert_eq!(settings.extract_title, Some(true));
    }

    #[test]
    fn test_settings_explicit_engine_wins_over_title() {
        let settings = parse(&["--title", "--engine", "lite"]).cli_settings();

        assert_eq!(settings.engine, Some(RenderEngine::Lite));
    }

    #[test]
    fn test_settings_escape_literals() {
        let settings = parse(&["--escape-literals"]).cli_settings();

        assert_eq!(settings.escape_literals, Some(true));
    }
}
