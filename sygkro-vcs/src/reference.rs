//! Template-reference grammar.
//!
//! ```text
//! gh:OWNER/REPO | git@HOST:PATH.git | https://HOST/PATH.git | <local path>
//! ```
//!
//! Remote references accept an optional `@REF` suffix naming a branch, tag,
//! or commit.

use std::path::Path;

/// The recognized shapes of a template reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `git@HOST:PATH.git`
    Ssh,
    /// `https://HOST/PATH.git`
    Https,
    /// `gh:owner/repo`, rewritten to the SSH form for cloning.
    Short,
    /// An existing path on the local filesystem.
    LocalPath,
    /// Nothing recognizable.
    Unknown,
}

impl ReferenceKind {
    pub fn is_remote(self) -> bool {
        matches!(
            self,
            ReferenceKind::Ssh | ReferenceKind::Https | ReferenceKind::Short
        )
    }
}

/// Classify a template reference. Prefix-based for the remote forms, then
/// stat-based: a reference that exists on disk is a local path.
///
/// A local path that happens to start with `gh:` is unreachable by design.
pub fn classify(reference: &str) -> ReferenceKind {
    if reference.starts_with("git@") && reference.ends_with(".git") {
        ReferenceKind::Ssh
    } else if reference.starts_with("https://") && reference.ends_with(".git") {
        ReferenceKind::Https
    } else if reference.starts_with("gh:") {
        ReferenceKind::Short
    } else if Path::new(reference).exists() {
        ReferenceKind::LocalPath
    } else {
        ReferenceKind::Unknown
    }
}

/// Split an optional `@REF` suffix off a remote reference.
///
/// The split fires on the *last* `@`, and only when the candidate suffix
/// contains no `/` and the remainder still looks remote. SSH user names
/// (`git@host:…`) are therefore never mis-parsed as a ref suffix.
pub fn split_ref_suffix(reference: &str) -> (&str, Option<&str>) {
    if let Some((left, right)) = reference.rsplit_once('@') {
        if !right.is_empty()
            && !right.contains('/')
            && (left.ends_with(".git") || left.starts_with("gh:"))
        {
            return (left, Some(right));
        }
    }
    (reference, None)
}

/// The URL to clone for a remote reference. `None` for non-remote kinds.
pub fn clone_url(reference: &str) -> Option<String> {
    match classify(reference) {
        ReferenceKind::Ssh | ReferenceKind::Https => Some(reference.to_string()),
        ReferenceKind::Short => {
            let repo = reference.trim_start_matches("gh:");
            Some(format!("git@github.com:{repo}.git"))
        }
        ReferenceKind::LocalPath | ReferenceKind::Unknown => None,
    }
}
