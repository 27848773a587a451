//! `postgen classify` command implementation.

use std::path::PathBuf;

use clap::Args;
use postgen_content::classify;

use super::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the classify command.
#[derive(Args)]
pub(crate) struct ClassifyArgs {
    /// Input file (default: stdin, also `-`).
    path: Option<PathBuf>,
}

impl ClassifyArgs {
    /// Execute the classify command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let content = read_input(self.path.as_deref())?;
        let kind = classify(&content);
        tracing::info!(kind = %kind, bytes = content.len(), "Classified content");
        output.result(kind.as_str())?;
        Ok(())
    }
}
