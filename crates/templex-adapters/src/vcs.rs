//! `git`-subprocess-backed `VersionControl` adapter (§6).
//!
//! Every method shells out to the system `git` binary. No other adapter or
//! service invokes `git` directly.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use templex_core::application::ports::output::{ApplyHunkStatus, VersionControl};
use templex_core::application::ApplicationError;

#[derive(Debug, Clone, Copy, Default)]
pub struct GitVersionControl;

impl GitVersionControl {
    pub fn new() -> Self {
        Self
    }

    fn git(&self, cwd: &Path, args: &[&str]) -> Result<Output, ApplicationError> {
        Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| ApplicationError::VcsOperationFailed {
                operation: args.join(" "),
                reason: e.to_string(),
            })
    }

    fn run_ok(&self, cwd: &Path, args: &[&str]) -> Result<String, ApplicationError> {
        let output = self.git(cwd, args)?;
        if !output.status.success() {
            return Err(ApplicationError::VcsOperationFailed {
                operation: args.join(" "),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitVersionControl {
    fn is_repo_url(&self, url: &str) -> bool {
        url.starts_with("git+")
            || url.starts_with("git@")
            || url.ends_with(".git")
            || url.starts_with("https://github.com/")
            || url.starts_with("https://gitlab.com/")
            || url.starts_with("ssh://")
    }

    fn clone(&self, url: &str, vcs_ref: Option<&str>) -> Result<PathBuf, ApplicationError> {
        // `Engine::update` clones the same URL twice (old and new revision) in
        // one process, so pid alone isn't unique enough — one call's checkout
        // would clobber the other's still-in-use directory.
        let dest = tempfile::Builder::new()
            .prefix("templex-clone-")
            .tempdir()
            .map_err(|e| ApplicationError::VcsOperationFailed {
                operation: "clone".to_string(),
                reason: e.to_string(),
            })?
            .keep();
        let url = url.strip_prefix("git+").unwrap_or(url);
        let mut args = vec!["clone", "--quiet", url, dest.to_str().unwrap_or_default()];
        if vcs_ref.is_some() {
            args.insert(1, "--no-single-branch");
        }
        self.run_ok(&std::env::temp_dir(), &args)?;
        if let Some(vcs_ref) = vcs_ref {
            self.checkout(&dest, vcs_ref)?;
        }
        Ok(dest)
    }

    fn checkout(&self, path: &Path, vcs_ref: &str) -> Result<(), ApplicationError> {
        self.run_ok(path, &["checkout", "--quiet", vcs_ref])?;
        Ok(())
    }

    fn describe(&self, path: &Path) -> Result<String, ApplicationError> {
        self.run_ok(path, &["describe", "--tags", "--always"])
    }

    fn tags(&self, path: &Path) -> Result<Vec<String>, ApplicationError> {
        let out = self.run_ok(path, &["tag", "--list"])?;
        Ok(out.lines().map(str::to_string).collect())
    }

    fn is_clean(&self, path: &Path) -> Result<bool, ApplicationError> {
        let out = self.run_ok(path, &["status", "--porcelain"])?;
        Ok(out.is_empty())
    }

    fn init(&self, path: &Path) -> Result<(), ApplicationError> {
        self.run_ok(path, &["init", "--quiet"])?;
        Ok(())
    }

    fn add_all(&self, path: &Path) -> Result<(), ApplicationError> {
        self.run_ok(path, &["add", "--all"])?;
        Ok(())
    }

    fn commit(&self, path: &Path, message: &str, allow_empty: bool) -> Result<(), ApplicationError> {
        let mut args = vec!["commit", "--quiet", "--no-verify", "-m", message];
        if allow_empty {
            args.push("--allow-empty");
        }
        self.run_ok(path, &args)?;
        Ok(())
    }

    fn set_config(&self, path: &Path, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.run_ok(path, &["config", key, value])?;
        Ok(())
    }

    fn add_remote(&self, path: &Path, name: &str, url: &str) -> Result<(), ApplicationError> {
        self.run_ok(path, &["remote", "add", name, url])?;
        Ok(())
    }

    fn fetch(
        &self,
        path: &Path,
        remote: &str,
        refspec: &str,
        depth: u32,
    ) -> Result<(), ApplicationError> {
        self.run_ok(
            path,
            &["fetch", remote, refspec, "--depth", &depth.to_string(), "--quiet"],
        )?;
        Ok(())
    }

    fn diff(
        &self,
        path: &Path,
        range: &str,
        inter_hunk_context: Option<i64>,
    ) -> Result<String, ApplicationError> {
        let mut args = vec!["diff-tree".to_string(), "--unified=1".to_string()];
        if let Some(n) = inter_hunk_context {
            args.push(format!("--inter-hunk-context={n}"));
        }
        args.push(range.to_string());
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_ok(path, &refs)
    }

    fn apply(
        &self,
        path: &Path,
        diff: &str,
        excludes: &[String],
    ) -> Result<Vec<ApplyHunkStatus>, ApplicationError> {
        if diff.trim().is_empty() {
            return Ok(Vec::new());
        }
        let patch_path = path.join(".templex-update.patch");
        std::fs::write(&patch_path, diff).map_err(|e| ApplicationError::FilesystemError {
            path: patch_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut args: Vec<String> = vec![
            "apply".to_string(),
            "--reject".to_string(),
            "--whitespace=nowarn".to_string(),
        ];
        for pattern in excludes {
            args.push(format!("--exclude={pattern}"));
        }
        args.push(patch_path.display().to_string());
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self.git(path, &refs)?;
        let _ = std::fs::remove_file(&patch_path);

        let mut statuses = Vec::new();
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            if let Some(file) = line.strip_prefix("Applied patch ").and_then(|s| s.split(' ').next()) {
                statuses.push(ApplyHunkStatus::Applied { file: file.to_string() });
            } else if let Some(rest) = line.strip_prefix("error: patch failed: ") {
                let file = rest.split(':').next().unwrap_or(rest).to_string();
                statuses.push(ApplyHunkStatus::Rejected {
                    reject_path: format!("{file}.rej"),
                    file,
                });
            }
        }
        Ok(statuses)
    }
}
