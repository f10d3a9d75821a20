use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::JiraConfig;
use crate::domain::Issue;
use crate::providers::IssueProvider;

#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraFields,
}

#[derive(Debug, Deserialize)]
struct JiraFields {
    summary: String,
    issuetype: JiraIssueType,
}

#[derive(Debug, Deserialize)]
struct JiraIssueType {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JiraSearchResponse {
    issues: Vec<JiraIssue>,
}

// Unmapped issue types leave the branch type empty so the caller can ask
// the user instead
fn issuetype_to_branch_type(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "bug" => "fix",
        "story" => "feat",
        "task" => "chore",
        _ => "",
    }
}

impl JiraIssue {
    fn into_issue(self) -> Issue {
        Issue {
            key: self.key,
            title: self.fields.summary,
            issue_type: issuetype_to_branch_type(&self.fields.issuetype.name).to_string(),
            suggested_branch_name: String::new(),
        }
    }
}

/// Issues fetched from the Jira REST API
pub struct JiraProvider {
    config: JiraConfig,
    jql: String,
    client: reqwest::blocking::Client,
}

impl JiraProvider {
    pub fn new(config: JiraConfig, jql: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            config,
            jql,
            client,
        })
    }

    fn get_json(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.user, Some(&self.config.token))
            .header("Accept", "application/json")
            .send()
            .with_context(|| format!("Jira request to {url} failed"))?;

        let status = response.status();
        let body = response.text().context("Failed to read Jira response")?;
        if !status.is_success() {
            anyhow::bail!("Jira returned {status}: {body}");
        }
        Ok(body)
    }
}

impl IssueProvider for JiraProvider {
    fn get(&self, key: &str) -> Result<Issue> {
        let url = format!(
            "{}/rest/api/2/issue/{key}?fields=summary,issuetype",
            self.config.endpoint.trim_end_matches('/')
        );
        let body = self.get_json(&url)?;
        let issue: JiraIssue =
            serde_json::from_str(&body).context("Failed to parse Jira issue response")?;
        Ok(issue.into_issue())
    }

    fn list(&self) -> Result<Vec<Issue>> {
        let url = format!(
            "{}/rest/api/2/search?jql={}&fields=summary,issuetype",
            self.config.endpoint.trim_end_matches('/'),
            self.jql
        );
        let body = self.get_json(&url)?;
        let response: JiraSearchResponse =
            serde_json::from_str(&body).context("Failed to parse Jira search response")?;
        Ok(response
            .issues
            .into_iter()
            .map(JiraIssue::into_issue)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issuetype_mapping() {
        assert_eq!(issuetype_to_branch_type("Bug"), "fix");
        assert_eq!(issuetype_to_branch_type("STORY"), "feat");
        assert_eq!(issuetype_to_branch_type("Task"), "chore");
    }

    #[test]
    fn test_unknown_issuetype_leaves_type_empty() {
        assert_eq!(issuetype_to_branch_type("Spike"), "");
        assert_eq!(issuetype_to_branch_type("Epic"), "");
    }

    #[test]
    fn test_parse_issue_response() {
        let body = r#"{
            "key": "ABC-42",
            "fields": {"summary": "Fix the widget", "issuetype": {"name": "Bug"}}
        }"#;
        let issue: JiraIssue = serde_json::from_str(body).unwrap();
        let issue = issue.into_issue();
        assert_eq!(issue.key, "ABC-42");
        assert_eq!(issue.issue_type, "fix");
        assert_eq!(issue.title, "Fix the widget");
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{"issues": [
            {"key": "ABC-1", "fields": {"summary": "A", "issuetype": {"name": "Story"}}},
            {"key": "ABC-2", "fields": {"summary": "B", "issuetype": {"name": "Task"}}}
        ]}"#;
        let response: JiraSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.issues.len(), 2);
        assert_eq!(response.issues[1].fields.issuetype.name, "Task");
    }
}
