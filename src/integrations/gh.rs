#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use anyhow::{Context, Result};
use std::process::Command;

/// Options forwarded to `gh pr create`
#[derive(Debug, Clone, Default)]
pub struct PrOptions {
    pub title: String,
    pub body: String,
    pub base: Option<String>,
    pub head: Option<String>,
    pub draft: bool,
    pub web: bool,
    pub labels: Vec<String>,
    pub reviewers: Vec<String>,
    pub assignees: Vec<String>,
    pub projects: Vec<String>,
    pub milestone: Option<String>,
    pub no_maintainer_edit: bool,
    pub recover: bool,
    /// Extra flags forwarded verbatim
    pub extra: Vec<String>,
}

impl PrOptions {
    /// Argument vector equivalent to this option set, without the leading
    /// `pr create`
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--title".to_string(),
            self.title.clone(),
            "--body".to_string(),
            self.body.clone(),
        ];
        if let Some(base) = &self.base {
            args.push("--base".to_string());
            args.push(base.clone());
        }
        if let Some(head) = &self.head {
            args.push("--head".to_string());
            args.push(head.clone());
        }
        if self.draft {
            args.push("--draft".to_string());
        }
        if self.web {
            args.push("--web".to_string());
        }
        for label in &self.labels {
            args.push("--label".to_string());
            args.push(label.clone());
        }
        for reviewer in &self.reviewers {
            args.push("--reviewer".to_string());
            args.push(reviewer.clone());
        }
        for assignee in &self.assignees {
            args.push("--assignee".to_string());
            args.push(assignee.clone());
        }
        for project in &self.projects {
            args.push("--project".to_string());
            args.push(project.clone());
        }
        if let Some(milestone) = &self.milestone {
            args.push("--milestone".to_string());
            args.push(milestone.clone());
        }
        if self.no_maintainer_edit {
            args.push("--no-maintainer-edit".to_string());
        }
        if self.recover {
            args.push("--recover".to_string());
        }
        args.extend(self.extra.iter().cloned());
        args
    }
}

/// GitHub CLI interface
pub trait GhClient {
    /// Default branch of the current repository
    fn default_branch(&self) -> Result<String>;

    /// Create a label, tolerating labels that already exist
    fn create_label(&self, name: &str) -> Result<()>;

    /// Open a pull request, returning whatever `gh pr create` prints
    /// (usually the PR URL)
    fn create_pr(&self, options: &PrOptions) -> Result<String>;

    /// JSON for a single issue: number, title, and labels
    fn issue_view(&self, number: &str) -> Result<String>;

    /// JSON list of issues, filtered by the given `gh issue list` flags
    fn issue_list(&self, flags: &[String]) -> Result<String>;
}

/// Real implementation shelling out to the `gh` binary
#[derive(Debug, Default)]
pub struct RealGhClient;

impl GhClient for RealGhClient {
    fn default_branch(&self) -> Result<String> {
        let output = Command::new("gh")
            .args([
                "repo",
                "view",
                "--json",
                "defaultBranchRef",
                "--jq",
                ".defaultBranchRef.name",
            ])
            .output()
            .context("Failed to execute gh repo view")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh repo view failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn create_label(&self, name: &str) -> Result<()> {
        let output = Command::new("gh")
            .args(["label", "create", name])
            .output()
            .context("Failed to execute gh label create")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.contains("already exists") {
                anyhow::bail!("gh label create {name} failed: {stderr}");
            }
        }

        Ok(())
    }

    fn create_pr(&self, options: &PrOptions) -> Result<String> {
        let output = Command::new("gh")
            .args(["pr", "create"])
            .args(options.to_args())
            .output()
            .context("Failed to execute gh pr create")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh pr create failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn issue_view(&self, number: &str) -> Result<String> {
        let output = Command::new("gh")
            .args(["issue", "view", number, "--json", "number,title,labels"])
            .output()
            .context("Failed to execute gh issue view")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh issue view {number} failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn issue_list(&self, flags: &[String]) -> Result<String> {
        let output = Command::new("gh")
            .args(["issue", "list", "--json", "number,title,labels"])
            .args(flags)
            .output()
            .context("Failed to execute gh issue list")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("gh issue list failed: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_options_minimal_args() {
        let options = PrOptions {
            title: "fix(1): thing".to_string(),
            body: "body".to_string(),
            ..PrOptions::default()
        };
        assert_eq!(
            options.to_args(),
            vec!["--title", "fix(1): thing", "--body", "body"]
        );
    }

    #[test]
    fn test_pr_options_full_args() {
        let options = PrOptions {
            title: "t".to_string(),
            body: "b".to_string(),
            base: Some("main".to_string()),
            head: Some("fix/1".to_string()),
            draft: true,
            web: false,
            labels: vec!["bug".to_string()],
            reviewers: vec!["alice".to_string(), "bob".to_string()],
            assignees: vec!["@me".to_string()],
            projects: vec!["Roadmap".to_string()],
            milestone: Some("v1".to_string()),
            no_maintainer_edit: true,
            recover: false,
            extra: vec!["--template".to_string(), "release.md".to_string()],
        };
        let args = options.to_args();
        assert!(args.windows(2).any(|w| w == ["--base", "main"]));
        assert!(args.windows(2).any(|w| w == ["--reviewer", "bob"]));
        assert!(args.contains(&"--draft".to_string()));
        assert!(args.contains(&"--no-maintainer-edit".to_string()));
        assert!(!args.contains(&"--web".to_string()));
        assert!(args.windows(2).any(|w| w == ["--template", "release.md"]));
    }
}
