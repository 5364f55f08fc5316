//! Export error types.

use std::path::PathBuf;

use lsq_page::RenderError;

/// Error raised while exporting pages.
///
/// Every variant carries the path it failed on.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Graph root does not exist or is not a directory.
    #[error("Graph directory not found: {}", .0.display())]
    GraphNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy asset {} to {}: {source}", from.display(), to.display())]
    CopyAsset {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}
