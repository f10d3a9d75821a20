//! Issue tracker providers

pub mod github;
pub mod jira;
pub mod linear;

use anyhow::Result;

use crate::config::{GlobalConfig, RepositoryConfig};
use crate::domain::Issue;
use crate::integrations::gh::GhClient;

pub use github::GitHubProvider;
pub use jira::JiraProvider;
pub use linear::LinearProvider;

/// A source of issues to branch from
pub trait IssueProvider {
    /// Fetch a single issue by its tracker key
    fn get(&self, key: &str) -> Result<Issue>;

    /// List the issues offered for interactive selection
    fn list(&self) -> Result<Vec<Issue>>;
}

/// Build the provider selected in the repository config, validating its
/// credentials
///
/// # Errors
/// Fails when the provider is unknown or its credentials are incomplete
pub fn build<'a>(
    repo: &RepositoryConfig,
    global: &GlobalConfig,
    gh: &'a dyn GhClient,
) -> Result<Box<dyn IssueProvider + 'a>> {
    match repo.issue.provider.as_str() {
        "github" => Ok(Box::new(GitHubProvider::new(
            gh,
            repo.checkout_new.github.issue_list_flags.clone(),
        ))),
        "jira" => {
            global.jira.validate()?;
            Ok(Box::new(JiraProvider::new(
                global.jira.clone(),
                repo.checkout_new.jira.jql(),
            )?))
        }
        "linear" => {
            global.linear.validate()?;
            Ok(Box::new(LinearProvider::new(global.linear.clone())?))
        }
        other => anyhow::bail!("unsupported issue provider: {other}"),
    }
}
