//! Resolution against throwaway local git repositories.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use sygkro_vcs::{checkout, resolve_for_sync};

fn run(dir: &Path, program: &str, args: &[&str]) -> String {
    let output = Command::new(program)
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {program} {args:?}: {e}"));
    assert!(
        output.status.success(),
        "{program} {args:?} failed in {}:\n{}",
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn init_repo(dir: &Path) {
    run(dir, "git", &["init", "-b", "main"]);
    run(dir, "git", &["config", "user.email", "test@test.com"]);
    run(dir, "git", &["config", "user.name", "Test"]);
}

fn commit_all(dir: &Path, msg: &str) -> String {
    run(dir, "git", &["add", "-A"]);
    run(dir, "git", &["commit", "-m", msg, "--allow-empty"]);
    run(dir, "git", &["rev-parse", "HEAD"]).trim().to_string()
}

#[test]
fn sync_resolution_clones_a_local_repo() {
    let repo = TempDir::new().expect("repo");
    init_repo(repo.path());
    std::fs::write(repo.path().join("file.txt"), "v1\n").expect("write");
    let v1 = commit_all(repo.path(), "v1");
    std::fs::write(repo.path().join("file.txt"), "v2\n").expect("write");
    let v2 = commit_all(repo.path(), "v2");

    let resolved = resolve_for_sync(repo.path().to_str().unwrap(), "").expect("resolve");
    assert_ne!(
        resolved.path,
        repo.path(),
        "sync resolution must not point at the user's working copy"
    );
    assert!(resolved.is_scoped());
    assert_eq!(resolved.commit_sha, v2);
    assert_eq!(resolved.head_ref, "main");

    // Full history: the old commit is reachable and checkout-able.
    checkout(&resolved.path, &v1).expect("checkout old");
    let head = run(&resolved.path, "git", &["rev-parse", "HEAD"]);
    assert_eq!(head.trim(), v1);

    // The user's repository stays on the new commit.
    let user_head = run(repo.path(), "git", &["rev-parse", "HEAD"]);
    assert_eq!(user_head.trim(), v2);
}

#[test]
fn dropping_a_scoped_resolution_removes_the_clone() {
    let repo = TempDir::new().expect("repo");
    init_repo(repo.path());
    std::fs::write(repo.path().join("file.txt"), "content\n").expect("write");
    commit_all(repo.path(), "initial");

    let resolved = resolve_for_sync(repo.path().to_str().unwrap(), "").expect("resolve");
    let clone_path = resolved.path.clone();
    assert!(clone_path.exists());

    drop(resolved);
    assert!(
        !clone_path.exists(),
        "scoped clone should be removed on drop"
    );
}

#[test]
fn commit_ref_is_checked_out_after_full_clone() {
    let repo = TempDir::new().expect("repo");
    init_repo(repo.path());
    std::fs::write(repo.path().join("file.txt"), "old\n").expect("write");
    let old = commit_all(repo.path(), "old");
    std::fs::write(repo.path().join("file.txt"), "new\n").expect("write");
    commit_all(repo.path(), "new");

    let resolved = resolve_for_sync(repo.path().to_str().unwrap(), &old).expect("resolve");
    assert_eq!(resolved.commit_sha, old);
    let content = std::fs::read_to_string(resolved.path.join("file.txt")).expect("read");
    assert_eq!(content, "old\n");
}

#[test]
fn tag_ref_reports_the_tag_as_head_ref() {
    let repo = TempDir::new().expect("repo");
    init_repo(repo.path());
    std::fs::write(repo.path().join("file.txt"), "tagged\n").expect("write");
    commit_all(repo.path(), "tagged");
    run(repo.path(), "git", &["tag", "v1.0.0"]);
    std::fs::write(repo.path().join("file.txt"), "later\n").expect("write");
    commit_all(repo.path(), "later");

    let resolved = resolve_for_sync(repo.path().to_str().unwrap(), "v1.0.0").expect("resolve");
    assert_eq!(resolved.head_ref, "v1.0.0");
    let content = std::fs::read_to_string(resolved.path.join("file.txt")).expect("read");
    assert_eq!(content, "tagged\n");
}

#[test]
fn branch_ref_is_cloned_and_reported() {
    let repo = TempDir::new().expect("repo");
    init_repo(repo.path());
    std::fs::write(repo.path().join("file.txt"), "main\n").expect("write");
    commit_all(repo.path(), "main");
    run(repo.path(), "git", &["checkout", "-b", "develop"]);
    std::fs::write(repo.path().join("file.txt"), "develop\n").expect("write");
    commit_all(repo.path(), "develop");
    run(repo.path(), "git", &["checkout", "main"]);

    let resolved = resolve_for_sync(repo.path().to_str().unwrap(), "develop").expect("resolve");
    assert_eq!(resolved.head_ref, "develop");
    let content = std::fs::read_to_string(resolved.path.join("file.txt")).expect("read");
    assert_eq!(content, "develop\n");
}
