use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::Issue;
use crate::integrations::gh::GhClient;
use crate::providers::IssueProvider;

#[derive(Debug, Deserialize)]
struct GhIssue {
    number: u64,
    title: String,
    #[serde(default)]
    labels: Vec<GhLabel>,
}

#[derive(Debug, Deserialize)]
struct GhLabel {
    name: String,
}

fn label_to_type(label: &str) -> Option<&'static str> {
    match label {
        "bug" | "fix" => Some("fix"),
        "enhancement" | "feature" | "feat" => Some("feat"),
        "documentation" => Some("docs"),
        "chore" => Some("chore"),
        "refactor" => Some("refactor"),
        "test" => Some("test"),
        "ci" => Some("ci"),
        "perf" => Some("perf"),
        "build" => Some("build"),
        "revert" => Some("revert"),
        "style" => Some("style"),
        _ => None,
    }
}

impl GhIssue {
    fn into_issue(self) -> Issue {
        let issue_type = self
            .labels
            .iter()
            .find_map(|l| label_to_type(&l.name))
            .unwrap_or_default()
            .to_string();
        Issue {
            key: self.number.to_string(),
            title: self.title,
            issue_type,
            suggested_branch_name: String::new(),
        }
    }
}

/// Issues fetched through the `gh` CLI
pub struct GitHubProvider<'a> {
    gh: &'a dyn GhClient,
    issue_list_flags: Vec<String>,
}

impl<'a> GitHubProvider<'a> {
    pub fn new(gh: &'a dyn GhClient, issue_list_flags: Vec<String>) -> Self {
        Self {
            gh,
            issue_list_flags,
        }
    }
}

impl IssueProvider for GitHubProvider<'_> {
    fn get(&self, key: &str) -> Result<Issue> {
        let key = key.trim_start_matches('#');
        let json = self.gh.issue_view(key)?;
        let issue: GhIssue =
            serde_json::from_str(&json).context("Failed to parse gh issue view output")?;
        Ok(issue.into_issue())
    }

    fn list(&self) -> Result<Vec<Issue>> {
        let json = self.gh.issue_list(&self.issue_list_flags)?;
        let issues: Vec<GhIssue> =
            serde_json::from_str(&json).context("Failed to parse gh issue list output")?;
        Ok(issues.into_iter().map(GhIssue::into_issue).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubGh {
        view: String,
        list: String,
    }

    impl GhClient for StubGh {
        fn default_branch(&self) -> Result<String> {
            Ok("main".to_string())
        }

        fn create_label(&self, _name: &str) -> Result<()> {
            Ok(())
        }

        fn create_pr(&self, _options: &crate::integrations::gh::PrOptions) -> Result<String> {
            Ok(String::new())
        }

        fn issue_view(&self, _number: &str) -> Result<String> {
            Ok(self.view.clone())
        }

        fn issue_list(&self, _flags: &[String]) -> Result<String> {
            Ok(self.list.clone())
        }
    }

    #[test]
    fn test_get_maps_labels_to_branch_type() {
        let gh = StubGh {
            view: r#"{"number": 42, "title": "Crash on startup", "labels": [{"name": "p1"}, {"name": "bug"}]}"#
                .to_string(),
            list: String::new(),
        };
        let provider = GitHubProvider::new(&gh, Vec::new());
        let issue = provider.get("#42").unwrap();
        assert_eq!(issue.key, "42");
        assert_eq!(issue.issue_type, "fix");
        assert_eq!(issue.title, "Crash on startup");
    }

    #[test]
    fn test_get_maps_conventional_labels_directly() {
        let gh = StubGh {
            view: r#"{"number": 9, "title": "Tidy CI", "labels": [{"name": "chore"}]}"#.to_string(),
            list: String::new(),
        };
        let provider = GitHubProvider::new(&gh, Vec::new());
        assert_eq!(provider.get("9").unwrap().issue_type, "chore");
    }

    #[test]
    fn test_get_without_known_labels_leaves_type_empty() {
        let gh = StubGh {
            view: r#"{"number": 7, "title": "Something", "labels": []}"#.to_string(),
            list: String::new(),
        };
        let provider = GitHubProvider::new(&gh, Vec::new());
        assert_eq!(provider.get("7").unwrap().issue_type, "");
    }

    #[test]
    fn test_list_parses_all_issues() {
        let gh = StubGh {
            view: String::new(),
            list: r#"[{"number": 1, "title": "A", "labels": [{"name": "enhancement"}]},
                      {"number": 2, "title": "B", "labels": []}]"#
                .to_string(),
        };
        let provider = GitHubProvider::new(&gh, Vec::new());
        let issues = provider.list().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].issue_type, "feat");
    }
}
