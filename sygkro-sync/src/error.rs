//! Error types for sygkro-sync.

use std::path::PathBuf;

use thiserror::Error;

use sygkro_core::ConfigError;
use sygkro_engine::RenderError;
use sygkro_vcs::VcsError;

/// All errors that can arise from merge and sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error reading or writing configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error resolving or rewinding the template repository.
    #[error("vcs error: {0}")]
    Vcs(#[from] VcsError),

    /// The external line merger failed outright (a conflict is not an error).
    #[error("merge tool failed for {path}: {detail}")]
    MergeTool { path: PathBuf, detail: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failure while collecting files.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
