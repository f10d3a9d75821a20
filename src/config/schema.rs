//! Configuration schema and type definitions

use std::collections::BTreeMap;
use std::env;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_TITLE_TEMPLATE: &str =
    "{{Type}}{{#if Issue}}({{Issue}}){{/if}}: {{humanize Description}}";

pub const DEFAULT_BODY_TEMPLATE: &str = "{{#if Issue}}Closes #{{Issue}}.

{{/if}}## Description

{{#if AISummary}}{{AISummary}}{{else}}{{humanize Description}}

Change(s) in this PR:

{{#each Commits}}* {{this}}
{{/each}}{{/if}}

## PR Checklist

- [ ] Tests are included
- [ ] Documentation is changed or added
";

pub const DEFAULT_BRANCH_TEMPLATE: &str = "{{Type}}/{{#if Issue}}{{Issue}}-{{/if}}{{Description}}";

/// Parse-direction counterpart of [`DEFAULT_BRANCH_TEMPLATE`]. Raw regex
/// syntax is allowed outside the placeholders.
pub const DEFAULT_BRANCH_PATTERN: &str = r"{{.Type}}\/({{.Issue}}-)?{{.Description}}";

pub const PROVIDERS: &[&str] = &["github", "jira", "linear"];

/// Per-repository configuration (`.prx.toml` at the repo root)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub branch: BranchConfig,
    #[serde(default)]
    pub pr: PullRequestConfig,
    #[serde(default)]
    pub issue: IssueConfig,
    #[serde(default)]
    pub checkout_new: CheckoutNewConfig,
    /// Markdown file used as the PR body template when it exists
    #[serde(default = "default_pr_template_path")]
    pub pull_request_template_path: String,
}

fn default_pr_template_path() -> String {
    ".github/pull_request_template.md".to_string()
}

impl RepositoryConfig {
    /// Validate all sections
    ///
    /// # Errors
    /// Returns a `Config` error naming the offending section/value
    pub fn validate(&self) -> Result<(), Error> {
        self.branch.validate()?;
        self.issue.validate()?;
        Ok(())
    }
}

/// Branch naming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Render-direction template for new branch names.
    /// Variables: `Type`, `Issue`, `Description`
    #[serde(default = "default_branch_template")]
    pub template: String,

    /// Parse-direction pattern used to validate a branch name and extract
    /// its fields. Placeholders (`{{.Type}}`, ...) are expanded with the
    /// fragments from `variable_patterns`.
    #[serde(default = "default_branch_pattern")]
    pub pattern: String,

    /// Regex fragment substituted for each placeholder during pattern
    /// compilation
    #[serde(default = "default_variable_patterns")]
    pub variable_patterns: BTreeMap<String, String>,

    /// Single-character word separators; `/` is always treated as one
    #[serde(default = "default_token_separators")]
    pub token_separators: Vec<String>,

    /// Longest acceptable generated branch name before offering manual edit
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            template: default_branch_template(),
            pattern: default_branch_pattern(),
            variable_patterns: default_variable_patterns(),
            token_separators: default_token_separators(),
            max_length: default_max_length(),
        }
    }
}

fn default_branch_template() -> String {
    DEFAULT_BRANCH_TEMPLATE.to_string()
}

fn default_branch_pattern() -> String {
    DEFAULT_BRANCH_PATTERN.to_string()
}

fn default_variable_patterns() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "Type".to_string(),
            "fix|feat|chore|docs|refactor|test|style|build|ci|perf|revert".to_string(),
        ),
        ("Issue".to_string(), "([a-zA-Z]+-)*[0-9]+".to_string()),
        ("Author".to_string(), "[a-zA-Z0-9]+".to_string()),
        ("Description".to_string(), ".*".to_string()),
    ])
}

fn default_token_separators() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

const fn default_max_length() -> usize {
    60
}

impl BranchConfig {
    /// Validate separator lengths
    ///
    /// # Errors
    /// Returns a `Config` error when a separator is not exactly one character
    pub fn validate(&self) -> Result<(), Error> {
        for separator in &self.token_separators {
            if separator.chars().count() != 1 {
                return Err(Error::Config(format!(
                    "token_separators: invalid token separator '{separator}': must be exactly 1 character"
                )));
            }
        }
        Ok(())
    }

    /// Configured separators as characters, with `/` implicitly appended
    ///
    /// # Errors
    /// Returns a `Config` error when a separator is not exactly one character
    pub fn separator_chars(&self) -> Result<Vec<char>, Error> {
        self.validate()?;
        let mut chars: Vec<char> = self
            .token_separators
            .iter()
            .filter_map(|s| s.chars().next())
            .collect();
        if !chars.contains(&'/') {
            chars.push('/');
        }
        Ok(chars)
    }
}

/// Pull request templating configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestConfig {
    /// Title template, rendered strictly against the parsed branch fields
    #[serde(default = "default_title_template")]
    pub title: String,

    /// Body template, rendered leniently; `Commits` and `AISummary` are
    /// only assembled when the template references them
    #[serde(default = "default_body_template")]
    pub body: String,

    /// Commit sub-parts matching any of these regexes are dropped from the
    /// rendered commit list
    #[serde(default = "default_ignore_commits_patterns")]
    pub ignore_commits_patterns: Vec<String>,

    /// Walk the body's markdown checklist after rendering
    #[serde(default = "default_true")]
    pub answer_checklist: bool,

    /// Push the current branch to origin before creating the PR
    #[serde(default = "default_true")]
    pub push_to_remote: bool,
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            title: default_title_template(),
            body: default_body_template(),
            ignore_commits_patterns: default_ignore_commits_patterns(),
            answer_checklist: true,
            push_to_remote: true,
        }
    }
}

fn default_title_template() -> String {
    DEFAULT_TITLE_TEMPLATE.to_string()
}

fn default_body_template() -> String {
    DEFAULT_BODY_TEMPLATE.to_string()
}

fn default_ignore_commits_patterns() -> Vec<String> {
    vec!["^wip".to_string()]
}

const fn default_true() -> bool {
    true
}

/// Issue tracker selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueConfig {
    /// One of `github`, `jira`, `linear`
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Issue type vocabulary offered when the type cannot be resolved from
    /// tracker metadata
    #[serde(default = "default_issue_types")]
    pub types: Vec<String>,
}

impl Default for IssueConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            types: default_issue_types(),
        }
    }
}

fn default_provider() -> String {
    "github".to_string()
}

fn default_issue_types() -> Vec<String> {
    [
        "fix", "feat", "chore", "docs", "refactor", "test", "style", "build", "ci", "perf",
        "revert",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl IssueConfig {
    /// Validate the provider name
    ///
    /// # Errors
    /// Returns a `Config` error for an unknown provider
    pub fn validate(&self) -> Result<(), Error> {
        if !PROVIDERS.contains(&self.provider.as_str()) {
            return Err(Error::Config(format!(
                "issue.provider: '{}' is not one of {}",
                self.provider,
                PROVIDERS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Issue listing behavior for `checkout-new` without an argument
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckoutNewConfig {
    #[serde(default)]
    pub jira: CheckoutNewJiraConfig,
    #[serde(default)]
    pub github: CheckoutNewGitHubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckoutNewJiraConfig {
    /// JQL used to list candidate issues; built from `project` when unset
    #[serde(default)]
    pub issue_jql: String,
    #[serde(default)]
    pub project: String,
}

impl CheckoutNewJiraConfig {
    /// The JQL to use, falling back to "my open issues" scoped to `project`
    #[must_use]
    pub fn jql(&self) -> String {
        if !self.issue_jql.is_empty() {
            return self.issue_jql.clone();
        }

        let mut jql = String::new();
        if !self.project.is_empty() {
            jql.push_str(&format!("project={}+AND+", self.project));
        }
        jql.push_str("assignee=currentUser()+AND+statusCategory!=Done+ORDER+BY+updated+DESC");
        jql
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutNewGitHubConfig {
    /// Extra flags passed to `gh issue list`
    #[serde(default = "default_issue_list_flags")]
    pub issue_list_flags: Vec<String>,
}

impl Default for CheckoutNewGitHubConfig {
    fn default() -> Self {
        Self {
            issue_list_flags: default_issue_list_flags(),
        }
    }
}

fn default_issue_list_flags() -> Vec<String> {
    ["--state", "open", "--assignee", "@me"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Machine-global configuration (`~/.config/prx/config.toml`): provider
/// credentials plus an optional repository-config fallback
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalConfig {
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub linear: LinearConfig,
    /// Used when the repository has no `.prx.toml`
    #[serde(default)]
    pub repository: Option<RepositoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JiraConfig {
    #[serde(default)]
    pub endpoint: String,
    /// Jira account email
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub token: String,
}

impl JiraConfig {
    /// Fill unset fields from `JIRA_ENDPOINT` / `JIRA_USER` / `JIRA_TOKEN`
    pub fn apply_env_fallback(&mut self) {
        if self.endpoint.is_empty() {
            self.endpoint = env::var("JIRA_ENDPOINT").unwrap_or_default();
        }
        if self.user.is_empty() {
            self.user = env::var("JIRA_USER").unwrap_or_default();
        }
        if self.token.is_empty() {
            self.token = env::var("JIRA_TOKEN").unwrap_or_default();
        }
    }

    /// Validate that all Jira fields are present
    ///
    /// # Errors
    /// Returns a `Config` error listing every missing field
    pub fn validate(&self) -> Result<(), Error> {
        let mut missing = Vec::new();
        if self.endpoint.is_empty() {
            missing.push("endpoint");
        }
        if self.user.is_empty() {
            missing.push("user");
        }
        if self.token.is_empty() {
            missing.push("token");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "jira: missing {}; run 'prx setup jira'",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinearConfig {
    #[serde(default)]
    pub api_key: String,
}

impl LinearConfig {
    /// Fill an unset API key from `LINEAR_API_KEY`
    pub fn apply_env_fallback(&mut self) {
        if self.api_key.is_empty() {
            self.api_key = env::var("LINEAR_API_KEY").unwrap_or_default();
        }
    }

    /// Validate that the API key is present
    ///
    /// # Errors
    /// Returns a `Config` error when the key is missing
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::Config(
                "linear: missing api_key; run 'prx setup linear'".to_string(),
            ));
        }
        Ok(())
    }
}
