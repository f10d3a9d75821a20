#![allow(clippy::missing_errors_doc)]
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Git client interface for branch and history operations
pub trait GitClient {
    /// Absolute path of the repository toplevel
    fn repo_root(&self) -> Result<PathBuf>;

    /// Name of the currently checked out branch
    fn current_branch(&self) -> Result<String>;

    /// Create and check out a new branch from the current HEAD
    fn checkout_new_branch(&self, name: &str) -> Result<()>;

    /// Push a branch and set its upstream to origin
    fn push_upstream(&self, branch: &str) -> Result<()>;

    /// Full commit messages on HEAD that are not on `base`, newest first
    fn commit_messages(&self, base: &str) -> Result<Vec<String>>;

    /// Diff of HEAD against the merge base with `base`
    fn diff(&self, base: &str) -> Result<String>;
}

/// Real git implementation shelling out to the `git` binary
#[derive(Debug, Default)]
pub struct RealGitClient;

impl GitClient for RealGitClient {
    fn repo_root(&self) -> Result<PathBuf> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .context("Failed to execute git rev-parse")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git rev-parse --show-toplevel failed: {stderr}");
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(PathBuf::from(root))
    }

    fn current_branch(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["branch", "--show-current"])
            .output()
            .context("Failed to execute git branch --show-current")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git branch --show-current failed: {stderr}");
        }

        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if branch.is_empty() {
            anyhow::bail!("not on a branch (detached HEAD?)");
        }
        Ok(branch)
    }

    fn checkout_new_branch(&self, name: &str) -> Result<()> {
        let output = Command::new("git")
            .args(["checkout", "-b", name])
            .output()
            .context("Failed to execute git checkout -b")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git checkout -b {name} failed: {stderr}");
        }

        Ok(())
    }

    fn push_upstream(&self, branch: &str) -> Result<()> {
        let output = Command::new("git")
            .args(["push", "--set-upstream", "origin", branch])
            .output()
            .context("Failed to execute git push")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git push --set-upstream origin {branch} failed: {stderr}");
        }

        Ok(())
    }

    fn commit_messages(&self, base: &str) -> Result<Vec<String>> {
        // NUL-separated full messages so multi-line bodies survive intact
        let output = Command::new("git")
            .args(["log", "--format=%B%x00", &format!("{base}..HEAD")])
            .output()
            .context("Failed to execute git log")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git log {base}..HEAD failed: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        Ok(stdout
            .split('\0')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    fn diff(&self, base: &str) -> Result<String> {
        let output = Command::new("git")
            .args(["diff", &format!("{base}...HEAD")])
            .output()
            .context("Failed to execute git diff")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git diff {base}...HEAD failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
