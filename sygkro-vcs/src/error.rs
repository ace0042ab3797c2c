//! Error types for sygkro-vcs.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template-reference resolution.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The reference is neither a known remote form nor an existing path.
    #[error("unsupported template reference '{reference}'")]
    UnsupportedReference { reference: String },

    /// `git clone` failed.
    #[error("failed to clone repository {url}: {detail}")]
    Clone { url: String, detail: String },

    /// `git checkout` failed.
    #[error("failed to checkout {rev}: {detail}")]
    Checkout { rev: String, detail: String },

    /// Some other git invocation failed.
    #[error("git {args} failed: {detail}")]
    Command { args: String, detail: String },

    /// Filesystem error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
