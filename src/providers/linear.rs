use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::config::LinearConfig;
use crate::domain::Issue;
use crate::providers::IssueProvider;

const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

const ISSUE_QUERY: &str =
    "query IssueById($id: String!) { issue(id: $id) { identifier title branchName } }";

#[derive(Debug, Deserialize)]
struct LinearIssue {
    identifier: String,
    title: String,
    #[serde(default, rename = "branchName")]
    branch_name: String,
}

#[derive(Debug, Deserialize)]
struct IssueData {
    issue: LinearIssue,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    #[serde(rename = "assignedIssues")]
    assigned_issues: IssueNodes,
}

#[derive(Debug, Deserialize)]
struct IssueNodes {
    nodes: Vec<LinearIssue>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl LinearIssue {
    fn into_issue(self) -> Issue {
        Issue {
            key: self.identifier,
            title: self.title,
            issue_type: String::new(),
            // Linear computes a branch name per issue; reuse it
            suggested_branch_name: self.branch_name,
        }
    }
}

/// Issues fetched from the Linear GraphQL API
pub struct LinearProvider {
    config: LinearConfig,
    client: reqwest::blocking::Client,
}

impl LinearProvider {
    pub fn new(config: LinearConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    fn query<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(LINEAR_API_URL)
            .header("Authorization", &self.config.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .context("Linear request failed")?;

        let status = response.status();
        let body = response.text().context("Failed to read Linear response")?;
        if !status.is_success() {
            anyhow::bail!("Linear returned {status}: {body}");
        }

        let parsed: GraphQlResponse<T> =
            serde_json::from_str(&body).context("Failed to parse Linear response")?;
        if let Some(error) = parsed.errors.first() {
            anyhow::bail!("Linear query failed: {}", error.message);
        }
        parsed
            .data
            .ok_or_else(|| anyhow::anyhow!("Linear response has no data"))
    }
}

impl IssueProvider for LinearProvider {
    fn get(&self, key: &str) -> Result<Issue> {
        let data: IssueData = self.query(ISSUE_QUERY, json!({ "id": key }))?;
        Ok(data.issue.into_issue())
    }

    fn list(&self) -> Result<Vec<Issue>> {
        let query = r#"query {
            viewer {
                assignedIssues(filter: { state: { type: { neq: "completed" } } }) {
                    nodes { identifier title branchName }
                }
            }
        }"#;
        let data: ViewerData = self.query(query, json!({}))?;
        Ok(data
            .viewer
            .assigned_issues
            .nodes
            .into_iter()
            .map(LinearIssue::into_issue)
            .collect())
    }
}
