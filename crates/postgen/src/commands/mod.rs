//! CLI command implementations.

mod classify;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

pub(crate) use classify::ClassifyArgs;
pub(crate) use render::RenderArgs;

use crate::error::CliError;

/// Read command input from `path`, or from stdin when `path` is `None` or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: PathBuf::from(path),
                source,
            })
        }
        _ => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# Title\n").unwrap();

        let content = read_input(Some(&path)).unwrap();

        assert_eq!(content, "# Title\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_input(Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::Input { .. }), "got {err:?}");
        assert!(err.to_string().contains("missing.md"));
    }
}
