//! Configuration management for postgen.
//!
//! Parses `postgen.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! engine = "full"          # "lite" (default) or "full"
//! escape_literals = false  # lite engine: escape code and quote text
//! extract_title = true     # full engine: report the first H1
//! ```

use std::path::{Path, PathBuf};

use postgen_content::{RenderEngine, RenderOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override render engine.
    pub engine: Option<RenderEngine>,
    /// Override literal escaping.
    pub escape_literals: Option<bool>,
    /// Override title extraction.
    pub extract_title: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "postgen.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Renderer used for markdown content.
    pub engine: RenderEngine,
    /// Escape code blocks, code spans and block quotes (lite engine).
    pub escape_literals: bool,
    /// Report the first H1 as the post title (full engine).
    pub extract_title: bool,
}

impl RenderConfig {
    /// Options for the line renderer.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            escape_literals: self.escape_literals,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `postgen.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(engine) = settings.engine {
            self.render.engine = engine;
        }
        if let Some(escape_literals) = settings.escape_literals {
            self.render.escape_literals = escape_literals;
        }
        if let Some(extract_title) = settings.extract_title {
            self.render.extract_title = extract_title;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.extract_title && self.render.engine != RenderEngine::Full {
            return Err(ConfigError::Validation(format!(
                "render.extract_title requires render.engine = \"full\" (got \"{}\")",
                self.render.engine
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.engine, RenderEngine::Lite);
        assert!(!config.render.escape_literals);
        assert!(!config.render.extract_title);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.engine, RenderEngine::Lite);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
engine = "full"
escape_literals = true
extract_title = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.engine, RenderEngine::Full);
        assert!(config.render.escape_literals);
        assert!(config.render.extract_title);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_unknown_engine_fails() {
        let toml = r#"
[render]
engine = "remark"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_parse_unknown_field_fails() {
        let toml = r"
[render]
escape = true
";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_render_options() {
        let config = RenderConfig {
            escape_literals: true,
            ..Default::default()
        };
        assert_eq!(
            config.options(),
            RenderOptions {
                escape_literals: true
            }
        );
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_title_requires_full_engine() {
        let mut config = Config::default();
        config.render.extract_title = true;
        assert_validation_error(&config, &["extract_title", "full", "lite"]);
    }

    #[test]
    fn test_apply_cli_settings_engine() {
        let mut config = Config::default();
        let overrides = CliSettings {
            engine: Some(RenderEngine::Full),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.engine, RenderEngine::Full);
        assert!(!config.render.escape_literals); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default();
        let overrides = CliSettings {
            engine: Some(RenderEngine::Full),
            escape_literals: Some(true),
            extract_title: Some(true),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.engine, RenderEngine::Full);
        assert!(config.render.escape_literals);
        assert!(config.render.extract_title);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.render.escape_literals = true;

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.render.engine, RenderEngine::Lite);
        assert!(config.render.escape_literals);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn test_load_explicit_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[render]\nengine = \"full\"\n").unwrap();

        let overrides = CliSettings {
            escape_literals: Some(true),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.render.engine, RenderEngine::Full);
        assert!(config.render.escape_literals);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postgen.toml");
        std::fs::write(&path, "[render]\nengine = \"full\"\nextract_title = true\n").unwrap();

        let overrides = CliSettings {
            engine: Some(RenderEngine::Lite),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postgen.toml");
        std::fs::write(&path, "[render\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("posts/2024");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("posts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(nested.join(CONFIG_FILENAME)));
    }
}
