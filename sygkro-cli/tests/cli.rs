//! End-to-end tests for the sygkro binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

use sygkro_core::{
    read_sync_record, read_template_config, write_sync_record, write_template_config, Inputs,
    SyncRecord, SyncSource, TemplateConfig, TemplatingConfig, SLUG_DIR, SYNC_RECORD_FILE,
    TEMPLATE_CONFIG_FILE,
};

fn sygkro_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sygkro"));
    cmd.current_dir(dir);
    cmd
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {args:?}: {e}"));
    assert!(
        output.status.success(),
        "git {args:?} failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

/// A local (non-git) template directory with `name` and `slug` inputs.
fn make_local_template() -> TempDir {
    let tpl = TempDir::new().expect("template");
    let mut inputs = Inputs::new();
    inputs.insert("name".to_string(), "My App".to_string());
    inputs.insert("slug".to_string(), "my-app".to_string());
    write_template_config(
        &tpl.path().join(TEMPLATE_CONFIG_FILE),
        &TemplateConfig {
            name: "basic".to_string(),
            description: "A basic template".to_string(),
            templating: TemplatingConfig { inputs },
            ..TemplateConfig::default()
        },
    )
    .expect("write manifest");
    write_file(
        &tpl.path().join(SLUG_DIR).join("README.md"),
        "# {{ .name }}\n",
    );
    tpl
}

/// A template git repository with two commits; returns (repo, v1 sha).
fn make_template_repo() -> (TempDir, String) {
    let repo = make_local_template();
    run_git(repo.path(), &["init", "-b", "main"]);
    run_git(repo.path(), &["config", "user.email", "test@test.com"]);
    run_git(repo.path(), &["config", "user.name", "Test"]);

    write_file(
        &repo.path().join(SLUG_DIR).join("config.yaml"),
        "app: {{ .name }}\nport: 8080\n",
    );
    run_git(repo.path(), &["add", "-A"]);
    run_git(repo.path(), &["commit", "-m", "v1"]);
    let v1 = run_git(repo.path(), &["rev-parse", "HEAD"]).trim().to_string();

    write_file(
        &repo.path().join(SLUG_DIR).join("config.yaml"),
        "app: {{ .name }}\nport: 9090\n",
    );
    write_file(&repo.path().join(SLUG_DIR).join("Makefile"), "build:\n");
    run_git(repo.path(), &["add", "-A"]);
    run_git(repo.path(), &["commit", "-m", "v2"]);

    (repo, v1)
}

fn default_inputs() -> Inputs {
    let mut inputs = Inputs::new();
    inputs.insert("name".to_string(), "My App".to_string());
    inputs.insert("slug".to_string(), "my-app".to_string());
    inputs
}

#[test]
fn template_new_scaffolds_a_template() {
    let workdir = TempDir::new().expect("workdir");

    sygkro_cmd(workdir.path())
        .args(["template", "new", "mytpl"])
        .assert()
        .success()
        .stdout(contains("created successfully"));

    let template_dir = workdir.path().join("mytpl");
    assert!(template_dir.join(SLUG_DIR).is_dir());
    assert!(template_dir.join(SLUG_DIR).join("README.md").is_file());

    let config = read_template_config(&template_dir.join(TEMPLATE_CONFIG_FILE)).expect("manifest");
    assert_eq!(config.name, "mytpl");
    assert!(config.templating.inputs.contains_key("slug"));

    // Refuses to clobber an existing directory.
    sygkro_cmd(workdir.path())
        .args(["template", "new", "mytpl"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn project_link_quiet_writes_a_record() {
    let tpl = make_local_template();
    let project = TempDir::new().expect("project");

    sygkro_cmd(project.path())
        .args([
            "project",
            "link",
            "--template",
            tpl.path().to_str().unwrap(),
            "--target",
            project.path().to_str().unwrap(),
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(contains("linked to template"));

    let record = read_sync_record(&project.path().join(SYNC_RECORD_FILE)).expect("record");
    assert_eq!(record.source.template_name, "basic");
    assert_eq!(record.source.template_version, "");
    assert_eq!(record.inputs["slug"], "my-app");
}

#[test]
fn project_create_renders_with_prompted_defaults() {
    let tpl = make_local_template();
    let target = TempDir::new().expect("target");

    // Two declared inputs (name, slug): two empty lines accept both defaults.
    sygkro_cmd(target.path())
        .args([
            "project",
            "create",
            "--template",
            tpl.path().to_str().unwrap(),
            "--target",
            target.path().to_str().unwrap(),
        ])
        .write_stdin("\n\n")
        .assert()
        .success()
        .stdout(contains("Project created successfully"));

    let project_dir = target.path().join("my-app");
    assert_eq!(
        fs::read_to_string(project_dir.join("README.md")).expect("readme"),
        "# My App\n"
    );

    let record = read_sync_record(&project_dir.join(SYNC_RECORD_FILE)).expect("record");
    assert_eq!(record.source.template_path, tpl.path().to_str().unwrap());
    assert_eq!(record.inputs["name"], "My App");
}

#[test]
fn project_create_refuses_existing_destination() {
    let tpl = make_local_template();
    let target = TempDir::new().expect("target");
    fs::create_dir_all(target.path().join("my-app")).expect("mkdir");

    sygkro_cmd(target.path())
        .args([
            "project",
            "create",
            "--template",
            tpl.path().to_str().unwrap(),
            "--target",
            target.path().to_str().unwrap(),
        ])
        .write_stdin("\n\n")
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn project_sync_applies_template_updates() {
    let (repo, v1) = make_template_repo();

    // Render the v1 state as the project and record v1 as the synced version.
    run_git(repo.path(), &["checkout", &v1]);
    let project = TempDir::new().expect("project");
    sygkro_engine::render_template(repo.path(), project.path(), &default_inputs())
        .expect("render project");
    run_git(repo.path(), &["checkout", "main"]);

    write_sync_record(
        &project.path().join(SYNC_RECORD_FILE),
        &SyncRecord {
            source: SyncSource {
                template_path: repo.path().to_string_lossy().into_owned(),
                template_name: "basic".to_string(),
                template_version: v1,
                template_tracking_ref: "main".to_string(),
            },
            inputs: default_inputs(),
        },
    )
    .expect("write record");

    let config_arg = project.path().join(SYNC_RECORD_FILE);
    sygkro_cmd(project.path())
        .args(["project", "sync", "--config", config_arg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("  updated: config.yaml"))
        .stdout(contains("  added: Makefile"))
        .stdout(contains("Sync completed successfully."));

    assert_eq!(
        fs::read_to_string(project.path().join("config.yaml")).expect("config"),
        "app: My App\nport: 9090\n"
    );
    assert!(project.path().join("Makefile").is_file());

    // A second sync has nothing left to do.
    sygkro_cmd(project.path())
        .args(["project", "sync", "--config", config_arg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("No differences found."));
}

#[test]
fn project_diff_shows_the_upstream_delta() {
    let (repo, v1) = make_template_repo();
    let project = TempDir::new().expect("project");

    write_sync_record(
        &project.path().join(SYNC_RECORD_FILE),
        &SyncRecord {
            source: SyncSource {
                template_path: repo.path().to_string_lossy().into_owned(),
                template_name: "basic".to_string(),
                template_version: v1,
                template_tracking_ref: "main".to_string(),
            },
            inputs: default_inputs(),
        },
    )
    .expect("write record");

    let config_arg = project.path().join(SYNC_RECORD_FILE);
    sygkro_cmd(project.path())
        .args(["project", "diff", "--config", config_arg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("--- upstream-template-old/config.yaml"))
        .stdout(contains("+++ upstream-template-new/config.yaml"))
        .stdout(contains("+port: 9090"));
}

#[test]
fn unknown_template_reference_fails_with_the_raw_string() {
    let project = TempDir::new().expect("project");

    sygkro_cmd(project.path())
        .args([
            "project",
            "link",
            "--template",
            "not_a_repo",
            "--target",
            project.path().to_str().unwrap(),
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(contains("not_a_repo"));
}
