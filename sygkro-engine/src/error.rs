//! Error types for sygkro-engine.

use std::path::PathBuf;

use thiserror::Error;

use sygkro_core::ConfigError;

/// All errors that can arise from template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A `{{` with no closing `}}` in a path or file content.
    #[error("unclosed placeholder near '{snippet}'")]
    UnclosedPlaceholder { snippet: String },

    /// The template manifest could not be read.
    #[error("template config error: {0}")]
    Config(#[from] ConfigError),

    /// The template has no renderable subdirectory.
    #[error("template directory {path} must contain a '{{{{ .slug }}}}' subdirectory")]
    MissingSlugDir { path: PathBuf },

    /// A `skip_render` glob failed to compile.
    #[error("invalid skip_render pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A source path is not valid UTF-8 and cannot be rendered.
    #[error("template path is not valid UTF-8: {path}")]
    NonUtf8Path { path: PathBuf },

    /// Filesystem error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failure under the template tree.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience constructor for [`RenderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
