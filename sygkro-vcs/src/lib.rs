//! # sygkro-vcs
//!
//! Maps a template reference (local path, SSH/HTTPS clone URL, or the
//! `gh:owner/repo` short form) to a local directory, cloning and checking out
//! as needed. Clones live in scoped temp directories that are removed when
//! the [`ResolvedTemplate`] is dropped.

pub mod error;
pub mod reference;
pub mod resolver;

pub use error::VcsError;
pub use reference::{classify, clone_url, split_ref_suffix, ReferenceKind};
pub use resolver::{
    checkout, classify_git_ref, resolve, resolve_for_sync, GitRefKind, ResolvedTemplate,
};
