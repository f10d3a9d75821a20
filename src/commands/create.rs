//! Create command - open a pull request templated from the current branch

use anyhow::Result;

use crate::ai::Summarizer;
use crate::color;
use crate::config::RepositoryConfig;
use crate::domain::{compile_pattern, parse_branch, template_pr, TemplateEngine};
use crate::error::Error;
use crate::integrations::gh::{GhClient, PrOptions, RealGhClient};
use crate::integrations::git::{GitClient, RealGitClient};
use crate::integrations::prompt::{InquirePrompter, Prompter};
use crate::progress;

/// Everything `prx create` accepts on the command line
#[derive(Debug, Default)]
pub struct CreateOptions {
    pub confirm: bool,
    pub draft: bool,
    pub base: Option<String>,
    pub head: Option<String>,
    pub web: bool,
    pub reviewers: Vec<String>,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub projects: Vec<String>,
    pub milestone: Option<String>,
    pub no_maintainer_edit: bool,
    pub recover: bool,
    pub no_ai_summary: bool,
    pub no_push: bool,
    pub dry_run: bool,
    pub gh_args: Vec<String>,
}

/// Template and open a pull request for the current branch
///
/// # Errors
/// Returns an error if:
/// - Not in a git repository, or the branch does not match the pattern
/// - Templating fails or a prompt is aborted
/// - Pushing the branch or creating the pull request fails
pub fn cmd_create(options: &CreateOptions, color_mode: color::ColorMode) -> Result<()> {
    let git = RealGitClient;
    let gh = RealGhClient;
    let prompter = InquirePrompter;
    run_create(options, &git, &gh, &prompter, color_mode)
}

pub fn run_create(
    options: &CreateOptions,
    git: &dyn GitClient,
    gh: &dyn GhClient,
    prompter: &dyn Prompter,
    color_mode: color::ColorMode,
) -> Result<()> {
    let repo_root = git.repo_root()?;
    let config = RepositoryConfig::load_from_repo_root(&repo_root)?;
    let branch = git.current_branch()?;

    let pattern = compile_pattern(&config.branch.pattern, &config.branch.variable_patterns)?;
    let fields = parse_branch(&branch, &pattern)?;

    let separators = config.branch.separator_chars()?;
    let engine = TemplateEngine::new(&separators)?;

    let base = match &options.base {
        Some(base) => base.clone(),
        None => {
            let spinner = progress::start(color_mode, "Resolving base branch...");
            let base = gh.default_branch();
            progress::finish(spinner);
            base?
        }
    };

    // An on-disk PR template takes precedence over the configured body
    let mut pr_config = config.pr.clone();
    let template_path = repo_root.join(&config.pull_request_template_path);
    if template_path.exists() {
        pr_config.body = std::fs::read_to_string(&template_path)?;
    }

    let fetch_commits = || {
        git.commit_messages(&format!("origin/{base}"))
            .or_else(|_| git.commit_messages(&base))
            .map_err(|err| Error::external_call("listing commits", err))
    };
    let fetch_summary = || {
        if options.no_ai_summary {
            return Ok(String::new());
        }
        let Some(summarizer) = Summarizer::from_env() else {
            return Ok(String::new());
        };
        let diff = git
            .diff(&format!("origin/{base}"))
            .or_else(|_| git.diff(&base))
            .unwrap_or_default();
        let commits = git
            .commit_messages(&format!("origin/{base}"))
            .or_else(|_| git.commit_messages(&base))
            .unwrap_or_default();
        summarizer
            .summarize(&diff, &commits)
            .map_err(|err| Error::external_call("AI summary", err))
    };

    let content = template_pr(
        &pr_config,
        &fields,
        &engine,
        prompter,
        options.confirm,
        fetch_commits,
        fetch_summary,
    )?;

    let mut labels = content.labels;
    for label in &options.labels {
        if !labels.contains(label) {
            labels.push(label.clone());
        }
    }

    let pr_options = PrOptions {
        title: content.title,
        body: content.body,
        base: Some(base),
        head: options.head.clone(),
        draft: options.draft,
        web: options.web,
        labels: labels.clone(),
        reviewers: options.reviewers.clone(),
        assignees: options.assignees.clone(),
        projects: options.projects.clone(),
        milestone: options.milestone.clone(),
        no_maintainer_edit: options.no_maintainer_edit,
        recover: options.recover,
        extra: options.gh_args.clone(),
    };

    if options.dry_run {
        eprintln!(
            "{}",
            color::info(color_mode, "Dry run; the pull request was not created")
        );
        println!("{}", pr_options.title);
        println!("---");
        println!("{}", pr_options.body);
        if !labels.is_empty() {
            println!("Labels: {}", labels.join(", "));
        }
        return Ok(());
    }

    if pr_config.push_to_remote && !options.no_push {
        let spinner = progress::start(color_mode, format!("Pushing {branch}..."));
        let pushed = git.push_upstream(&branch);
        progress::finish(spinner);
        pushed?;
    }

    for label in &labels {
        gh.create_label(label)?;
    }

    let spinner = progress::start(color_mode, "Creating pull request...");
    let url = gh.create_pr(&pr_options);
    progress::finish(spinner);
    let url = url?;

    eprintln!(
        "{}",
        color::success(color_mode, format!("Created pull request: {url}"))
    );
    Ok(())
}
