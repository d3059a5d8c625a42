//! End-to-end `update` scenarios against a real git-backed template fixture:
//! user-edit preservation, skip-if-exists, migration gating, downgrade
//! refusal.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;

const V1_CONFIG: &str = "\
project_name:
  type: str
  default: demo
_skip_if_exists:
  - locked.txt
";

const V2_CONFIG: &str = "\
project_name:
  type: str
  default: demo
_skip_if_exists:
  - locked.txt
_migrations:
  - version: \"2.0.0\"
    after:
      - touch migrated.txt
";

fn git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git must be on PATH to build the test fixture");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Builds a two-tag template repo under `root/template.git`: `v1.0.0` renders
/// `README.md`/`locked.txt`; `v2.0.0` keeps `README.md` byte-identical, flips
/// `locked.txt`'s content, and adds a migration that touches `migrated.txt`.
fn build_template_repo(root: &Path) -> std::path::PathBuf {
    let tpl = root.join("template.git");
    std::fs::create_dir_all(&tpl).unwrap();
    git(&tpl, &["init", "--quiet"]);
    git(&tpl, &["config", "user.email", "fixture@example.com"]);
    git(&tpl, &["config", "user.name", "fixture"]);

    std::fs::write(tpl.join("copier.yml"), V1_CONFIG).unwrap();
    std::fs::write(tpl.join("README.md.tmpl"), "# {{ project_name }}\n").unwrap();
    std::fs::write(tpl.join("locked.txt"), "original\n").unwrap();
    git(&tpl, &["add", "-A"]);
    git(&tpl, &["commit", "--quiet", "-m", "v1"]);
    git(&tpl, &["tag", "v1.0.0"]);

    std::fs::write(tpl.join("copier.yml"), V2_CONFIG).unwrap();
    std::fs::write(tpl.join("locked.txt"), "updated-from-v2\n").unwrap();
    git(&tpl, &["add", "-A"]);
    git(&tpl, &["commit", "--quiet", "-m", "v2"]);
    git(&tpl, &["tag", "v2.0.0"]);

    tpl
}

/// Turns a freshly-copied destination into a clean git working tree, the
/// precondition `update` checks before it will touch anything.
fn commit_destination(dest: &Path) {
    git(dest, &["init", "--quiet"]);
    git(dest, &["config", "user.email", "fixture@example.com"]);
    git(dest, &["config", "user.name", "fixture"]);
    git(dest, &["add", "-A"]);
    git(dest, &["commit", "--quiet", "-m", "initial"]);
}

#[test]
fn update_preserves_edits_skips_existing_and_runs_migrations() {
    let root = tempfile::tempdir().unwrap();
    let tpl = build_template_repo(root.path());
    let dest = root.path().join("project");

    Command::cargo_bin("templex")
        .unwrap()
        .args([
            "copy",
            tpl.to_str().unwrap(),
            dest.to_str().unwrap(),
            "--vcs-ref",
            "v1.0.0",
            "--force",
        ])
        .assert()
        .success();

    let readme_path = dest.join("README.md");
    assert_eq!(std::fs::read_to_string(&readme_path).unwrap(), "# demo\n");
    assert_eq!(std::fs::read_to_string(dest.join("locked.txt")).unwrap(), "original\n");

    // S5: a user edit made after the initial render.
    let mut readme = std::fs::read_to_string(&readme_path).unwrap();
    readme.push_str("Custom notes.\n");
    std::fs::write(&readme_path, &readme).unwrap();

    commit_destination(&dest);

    Command::cargo_bin("templex")
        .unwrap()
        .args(["update", dest.to_str().unwrap(), "--vcs-ref", "v2.0.0", "--force"])
        .assert()
        .success();

    // S5: the hand-written line survived the update.
    let readme_after = std::fs::read_to_string(&readme_path).unwrap();
    assert!(readme_after.contains("Custom notes."));

    // S6: `locked.txt` is in `_skip_if_exists` and already existed, so the
    // update must not overwrite it with v2.0.0's content.
    assert_eq!(std::fs::read_to_string(dest.join("locked.txt")).unwrap(), "original\n");

    // invariant 9: the 2.0.0 migration's `after` task ran exactly once.
    assert!(dest.join("migrated.txt").is_file());

    let answers = std::fs::read_to_string(dest.join(".copier-answers.yml")).unwrap();
    assert!(answers.contains("v2.0.0"));
}

#[test]
fn update_refuses_to_downgrade_to_an_older_tagged_revision() {
    let root = tempfile::tempdir().unwrap();
    let tpl = build_template_repo(root.path());
    let dest = root.path().join("project");

    Command::cargo_bin("templex")
        .unwrap()
        .args([
            "copy",
            tpl.to_str().unwrap(),
            dest.to_str().unwrap(),
            "--vcs-ref",
            "v2.0.0",
            "--force",
        ])
        .assert()
        .success();

    commit_destination(&dest);

    // invariant 8: v1.0.0 is older than the recorded v2.0.0, so update must refuse.
    Command::cargo_bin("templex")
        .unwrap()
        .args(["update", dest.to_str().unwrap(), "--vcs-ref", "v1.0.0", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("downgrade"));
}
