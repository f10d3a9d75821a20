//! Core branch and PR templating logic, independent of any external process

pub mod branch;
pub mod issue;
pub mod pattern;
pub mod pr;
pub mod template;

pub use branch::{normalize_branch_name, template_branch_name};
pub use issue::Issue;
pub use pattern::{compile_pattern, parse_branch};
pub use pr::{template_pr, PullRequestContent};
pub use template::TemplateEngine;
