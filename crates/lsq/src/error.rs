//! CLI error types.

use lsq_config::ConfigError;
use lsq_export::ExportError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Export(#[from] ExportError),
}
