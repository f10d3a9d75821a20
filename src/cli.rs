use clap::{Parser, Subcommand};

/// Branch and pull request automation for the GitHub CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a pull request from the current branch
    Create {
        /// Answer yes to every checklist item and confirmation
        #[arg(short = 'y', long)]
        confirm: bool,
        /// Create the pull request as a draft
        #[arg(short = 'd', long)]
        draft: bool,
        /// Base branch for the pull request (defaults to the repository default branch)
        #[arg(short = 'B', long)]
        base: Option<String>,
        /// Head branch for the pull request (defaults to the current branch)
        #[arg(short = 'H', long)]
        head: Option<String>,
        /// Continue in the browser after preparing the pull request
        #[arg(short = 'w', long)]
        web: bool,
        /// Request reviews from people or teams
        #[arg(short = 'r', long = "reviewer", value_name = "HANDLE")]
        reviewers: Vec<String>,
        /// Assign people by login, or "@me" for yourself
        #[arg(short = 'a', long = "assignee", value_name = "LOGIN")]
        assignees: Vec<String>,
        /// Add labels on top of the ones derived from the branch type
        #[arg(short = 'l', long = "label", value_name = "NAME")]
        labels: Vec<String>,
        /// Add the pull request to projects
        #[arg(short = 'p', long = "project", value_name = "NAME")]
        projects: Vec<String>,
        /// Add the pull request to a milestone
        #[arg(short = 'm', long)]
        milestone: Option<String>,
        /// Disable maintainer's ability to modify the pull request
        #[arg(long)]
        no_maintainer_edit: bool,
        /// Recover input from a previously failed run of pr create
        #[arg(long)]
        recover: bool,
        /// Skip the AI-generated summary even when an API key is configured
        #[arg(long)]
        no_ai_summary: bool,
        /// Do not push the branch before creating the pull request
        #[arg(long)]
        no_push: bool,
        /// Print the prepared pull request instead of creating it
        #[arg(long)]
        dry_run: bool,
        /// Extra flags forwarded verbatim to `gh pr create` (after `--`)
        #[arg(last = true, value_name = "GH_FLAGS")]
        gh_args: Vec<String>,
    },
    /// Check out a new branch named after an issue
    CheckoutNew {
        /// Issue key to branch from; when omitted, pick from your open issues
        issue: Option<String>,
    },
    /// Write starter configuration files
    Init {
        /// Only write the global config
        #[arg(long, conflicts_with = "local")]
        global: bool,
        /// Only write the repository config (.prx.toml)
        #[arg(long, conflicts_with = "global")]
        local: bool,
        /// Overwrite existing config files
        #[arg(long)]
        force: bool,
    },
    /// Store issue tracker credentials in the global config
    Setup {
        /// Provider to configure (jira or linear); prompted when omitted
        provider: Option<String>,
    },
}
