// tests/integration_test.rs
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use git2::Repository;
use tempfile::TempDir;

use git_semtag::cli::{Outcome, Workflow, WorkflowOptions, WorkflowSettings};
use git_semtag::git::{Git2TagRepository, TagRepository};
use git_semtag::ui::{BufferedLogger, FixedAnswer};

// Helper function to setup a temporary git repo with one commit
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let content_path = temp_dir.path().join("README.md");
    fs::write(&content_path, b"Initial content\n").expect("Could not write initial file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");

    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .expect("Could not create commit");

    // keep the binary away from any user-level configuration
    fs::write(temp_dir.path().join("semtag.toml"), b"").expect("Could not write config");

    temp_dir
}

fn add_tags(dir: &TempDir, tags: &[&str]) {
    let repo = Repository::open(dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    for tag in tags {
        repo.tag_lightweight(tag, head.as_object(), false).unwrap();
    }
}

fn sorted_tags(dir: &TempDir) -> Vec<String> {
    let repo = Repository::open(dir.path()).unwrap();
    let names = repo.tag_names(None).unwrap();
    let mut tags: Vec<String> = names.iter().flatten().map(String::from).collect();
    tags.sort();
    tags
}

fn run_semtag(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_git-semtag"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute git-semtag");

    if let Some(mut input) = child.stdin.take() {
        // the process may exit without reading, e.g. for --help
        let _ = input.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

#[test]
fn test_git2_adapter_create_list_delete() {
    let dir = setup_test_repo();
    let repo = Git2TagRepository::open(dir.path()).unwrap();

    assert!(repo.list_tags().unwrap().is_empty());

    repo.create_tag("1.0.0").unwrap();
    repo.create_tag("v1.1.0").unwrap();
    let mut tags = repo.list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["1.0.0", "v1.1.0"]);

    let err = repo.create_tag("1.0.0").unwrap_err();
    assert!(err.is_repository_error());

    repo.delete_tags(&["1.0.0".to_string()]).unwrap();
    assert_eq!(repo.list_tags().unwrap(), vec!["v1.1.0"]);
}

#[test]
fn test_git2_adapter_best_effort_delete() {
    let dir = setup_test_repo();
    add_tags(&dir, &["1.0.0"]);
    let repo = Git2TagRepository::open(dir.path()).unwrap();

    let err = repo
        .delete_tags(&["missing".to_string(), "1.0.0".to_string()])
        .unwrap_err();

    assert_eq!(err.failed_labels(), ["missing"]);
    assert!(repo.list_tags().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_git2_adapter_skips_non_utf8_tag_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = setup_test_repo();
    add_tags(&dir, &["1.0.0"]);

    // write a loose ref directly; git itself accepts arbitrary bytes in ref names
    let head = Repository::open(dir.path())
        .unwrap()
        .head()
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    let tags_dir = dir.path().join(".git").join("refs").join("tags");
    fs::write(
        tags_dir.join(OsStr::from_bytes(b"\xff2.0.0")),
        format!("{}\n", head),
    )
    .unwrap();

    let repo = Git2TagRepository::open(dir.path()).unwrap();
    assert_eq!(repo.list_tags().unwrap(), vec!["1.0.0"]);
}

#[test]
fn test_workflow_against_real_repository() {
    let dir = setup_test_repo();
    add_tags(&dir, &["0.9.0", "1.2.0", "v1.1.0", "garbage"]);
    let repo = Git2TagRepository::open(dir.path()).unwrap();
    let logger = BufferedLogger::new();
    let confirm = FixedAnswer(true);
    let settings = WorkflowSettings {
        location: dir.path().display().to_string(),
        ..Default::default()
    };
    let workflow = Workflow::new(&repo, &logger, &confirm, settings);

    let outcome = workflow.apply(WorkflowOptions::default()).unwrap();

    assert!(outcome.is_applied());
    assert_eq!(
        sorted_tags(&dir),
        vec!["0.9.0", "1.2.0", "1.2.1", "garbage", "v1.1.0"]
    );

    let outcome = workflow
        .purge(WorkflowOptions {
            dry_run: false,
            force: true,
        })
        .unwrap();
    assert!(outcome.is_applied());
    assert!(sorted_tags(&dir).is_empty());

    let outcome = workflow.purge(WorkflowOptions::default()).unwrap();
    assert_eq!(outcome, Outcome::NothingToDo);
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = run_semtag(dir.path(), &["--help"], "");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("apply"));
    assert!(stdout.contains("purge"));
}

#[test]
fn test_cli_apply_force_creates_initial_tag() {
    let dir = setup_test_repo();
    let output = run_semtag(dir.path(), &["apply", "--force"], "");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("none -> 1.0.0"));
    assert_eq!(sorted_tags(&dir), vec!["1.0.0"]);
}

#[test]
fn test_cli_apply_dry_run_does_not_tag() {
    let dir = setup_test_repo();
    add_tags(&dir, &["1.0.0"]);

    for _ in 0..2 {
        let output = run_semtag(dir.path(), &["apply", "--dry-run"], "");
        assert!(output.status.success());
        assert!(String::from_utf8(output.stdout)
            .unwrap()
            .contains("1.0.0 -> 1.0.1"));
    }
    assert_eq!(sorted_tags(&dir), vec!["1.0.0"]);
}

#[test]
fn test_cli_apply_bump_override() {
    let dir = setup_test_repo();
    add_tags(&dir, &["1.4.2"]);

    let output = run_semtag(dir.path(), &["apply", "-F", "--bump", "major"], "");

    assert!(output.status.success());
    assert_eq!(sorted_tags(&dir), vec!["1.4.2", "2.0.0"]);
}

#[test]
fn test_cli_apply_confirmation() {
    let dir = setup_test_repo();

    let declined = run_semtag(dir.path(), &["apply"], "n\n");
    assert!(declined.status.success());
    assert!(sorted_tags(&dir).is_empty());

    let accepted = run_semtag(dir.path(), &["apply"], "yes\n");
    assert!(accepted.status.success());
    assert_eq!(sorted_tags(&dir), vec!["1.0.0"]);
}

#[test]
fn test_cli_purge_confirmation() {
    let dir = setup_test_repo();
    add_tags(&dir, &["1.0.0", "1.1.0"]);

    let declined = run_semtag(dir.path(), &["purge"], "\n");
    assert!(declined.status.success());
    assert_eq!(sorted_tags(&dir), vec!["1.0.0", "1.1.0"]);

    let accepted = run_semtag(dir.path(), &["purge"], "y\n");
    assert!(accepted.status.success());
    assert!(sorted_tags(&dir).is_empty());
}

#[test]
fn test_cli_purge_without_tags() {
    let dir = setup_test_repo();
    let output = run_semtag(dir.path(), &["purge", "--force"], "");

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No tags available to purge"));
}

#[test]
fn test_cli_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("empty.toml");
    fs::write(&config, b"").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_git-semtag"))
        .args(["--config", config.to_str().unwrap(), "apply", "--dry-run"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute git-semtag");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Not in a git repository"));
}

#[test]
fn test_cli_debug_flag() {
    let dir = setup_test_repo();
    let output = run_semtag(dir.path(), &["--debug", "apply", "--dry-run"], "");

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Debugging messages enabled!"));
}
