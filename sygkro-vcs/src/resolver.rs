//! Template resolution — clone, checkout, and scoped cleanup.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::TempDir;

use crate::error::VcsError;
use crate::reference::{classify, clone_url, split_ref_suffix, ReferenceKind};

static COMMIT_SHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-fA-F]{7,40}$").expect("commit pattern is valid"));

/// How a requested git ref is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitRefKind {
    /// 7–40 hex characters: a commit id. Needs full history plus a
    /// post-clone checkout.
    Commit,
    /// Empty: whatever the remote's HEAD points at.
    DefaultBranch,
    /// Anything else: a branch or tag name.
    NamedRef,
}

/// Classify a requested git ref.
pub fn classify_git_ref(git_ref: &str) -> GitRefKind {
    if git_ref.is_empty() {
        GitRefKind::DefaultBranch
    } else if COMMIT_SHA.is_match(git_ref) {
        GitRefKind::Commit
    } else {
        GitRefKind::NamedRef
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloneDepth {
    /// Depth-1, single branch. Enough for a one-shot render.
    Shallow,
    /// Full history, so older commits can be checked out afterwards.
    Full,
}

// ---------------------------------------------------------------------------
// ResolvedTemplate
// ---------------------------------------------------------------------------

/// A template reference resolved to a local directory.
///
/// For remote references the directory is a scoped clone: dropping the value
/// removes it. Local-path resolutions point straight at the user's directory
/// and own no temp dir.
#[derive(Debug)]
pub struct ResolvedTemplate {
    /// Directory containing `sygkro.template.yaml` and the renderable subtree.
    pub path: PathBuf,
    /// HEAD commit after checkout; empty when resolved from a plain local path.
    pub commit_sha: String,
    /// Short name of the checked-out branch or tag; empty when detached or local.
    pub head_ref: String,
    tempdir: Option<TempDir>,
}

impl ResolvedTemplate {
    fn local(path: PathBuf) -> Self {
        ResolvedTemplate {
            path,
            commit_sha: String::new(),
            head_ref: String::new(),
            tempdir: None,
        }
    }

    /// Whether this resolution owns a scoped clone directory.
    pub fn is_scoped(&self) -> bool {
        self.tempdir.is_some()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Resolve a template reference for a one-shot render.
///
/// Local paths resolve in place. Remote references clone shallowly (or with
/// full history when `git_ref` is a commit id, which cannot be fetched at
/// depth 1 by name).
pub fn resolve(reference: &str, git_ref: &str) -> Result<ResolvedTemplate, VcsError> {
    resolve_at_depth(reference, git_ref, CloneDepth::Shallow)
}

/// Resolve a template reference for a sync.
///
/// Always clones with full history — the sync controller needs to check out
/// the previously synced commit to render the base tree. A local path that is
/// itself a git repository is cloned too, so the rewind never touches the
/// user's working copy.
pub fn resolve_for_sync(reference: &str, git_ref: &str) -> Result<ResolvedTemplate, VcsError> {
    resolve_at_depth(reference, git_ref, CloneDepth::Full)
}

fn resolve_at_depth(
    reference: &str,
    git_ref: &str,
    depth: CloneDepth,
) -> Result<ResolvedTemplate, VcsError> {
    let (base, suffix) = split_ref_suffix(reference);
    // An explicit ref argument overrides any @REF suffix on the reference.
    let git_ref = if git_ref.is_empty() {
        suffix.unwrap_or("")
    } else {
        git_ref
    };

    match classify(base) {
        ReferenceKind::LocalPath => {
            let path = PathBuf::from(base);
            if depth == CloneDepth::Full && path.join(".git").exists() {
                clone_into_tempdir(&path.to_string_lossy(), git_ref, depth)
            } else {
                Ok(ResolvedTemplate::local(path))
            }
        }
        ReferenceKind::Unknown => Err(VcsError::UnsupportedReference {
            reference: reference.to_string(),
        }),
        ReferenceKind::Ssh | ReferenceKind::Https | ReferenceKind::Short => {
            let url = clone_url(base).unwrap_or_else(|| base.to_string());
            clone_into_tempdir(&url, git_ref, depth)
        }
    }
}

fn clone_into_tempdir(
    url: &str,
    git_ref: &str,
    depth: CloneDepth,
) -> Result<ResolvedTemplate, VcsError> {
    let tempdir = tempfile::Builder::new()
        .prefix("sygkro-template-")
        .tempdir()
        .map_err(|source| VcsError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    let dir = tempdir.path().to_path_buf();
    let dir_str = dir.to_string_lossy().into_owned();
    let ref_kind = classify_git_ref(git_ref);

    let mut args: Vec<&str> = vec!["clone"];
    match (depth, ref_kind) {
        // Commits cannot be cloned by name; take full history and check out after.
        (_, GitRefKind::Commit) | (CloneDepth::Full, GitRefKind::DefaultBranch) => {}
        (CloneDepth::Full, GitRefKind::NamedRef) => {
            args.extend(["--branch", git_ref]);
        }
        (CloneDepth::Shallow, GitRefKind::DefaultBranch) => {
            args.extend(["--depth", "1"]);
        }
        (CloneDepth::Shallow, GitRefKind::NamedRef) => {
            args.extend(["--depth", "1", "--single-branch", "--branch", git_ref]);
        }
    }
    args.extend([url, dir_str.as_str()]);

    tracing::info!("cloning {url} into {dir_str}");
    git(&args, None).map_err(|detail| VcsError::Clone {
        url: url.to_string(),
        detail,
    })?;

    if ref_kind == GitRefKind::Commit {
        checkout(&dir, git_ref)?;
    }

    let commit_sha = git(&["rev-parse", "HEAD"], Some(&dir))
        .map_err(|detail| VcsError::Command {
            args: "rev-parse HEAD".to_string(),
            detail,
        })?
        .trim()
        .to_string();

    // A detached HEAD after a named-ref clone means the ref was a tag; report
    // the requested short name as what is being tracked.
    let head_ref = match git(&["symbolic-ref", "--short", "-q", "HEAD"], Some(&dir)) {
        Ok(name) => name.trim().to_string(),
        Err(_) if ref_kind == GitRefKind::NamedRef => git_ref.to_string(),
        Err(_) => String::new(),
    };

    tracing::debug!("resolved {url} to {commit_sha} ({head_ref})");
    Ok(ResolvedTemplate {
        path: dir,
        commit_sha,
        head_ref,
        tempdir: Some(tempdir),
    })
}

/// Check out `rev` (branch, tag, or commit) in an existing clone.
pub fn checkout(repo_dir: &Path, rev: &str) -> Result<(), VcsError> {
    git(&["checkout", rev], Some(repo_dir)).map_err(|detail| VcsError::Checkout {
        rev: rev.to_string(),
        detail,
    })?;
    Ok(())
}

/// Run a git subcommand, returning stdout on success and a one-line failure
/// description otherwise.
fn git(args: &[&str], workdir: Option<&Path>) -> Result<String, String> {
    let mut cmd = Command::new("git");
    if let Some(dir) = workdir {
        cmd.current_dir(dir);
    }
    let output = cmd
        .args(args)
        .output()
        .map_err(|e| format!("failed to run git: {e}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(stderr.trim().to_string());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
