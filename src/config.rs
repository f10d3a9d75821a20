//! Configuration module
//!
//! Loading and managing prx configuration from TOML files.

pub mod loader;
pub mod schema;
pub mod template_generator;

// Re-export public types and functions
#[allow(unused_imports)]
pub use schema::{
    BranchConfig, CheckoutNewConfig, CheckoutNewGitHubConfig, CheckoutNewJiraConfig, GlobalConfig,
    IssueConfig, JiraConfig, LinearConfig, PullRequestConfig, RepositoryConfig,
    DEFAULT_BODY_TEMPLATE, DEFAULT_BRANCH_PATTERN, DEFAULT_BRANCH_TEMPLATE,
    DEFAULT_TITLE_TEMPLATE, PROVIDERS,
};
