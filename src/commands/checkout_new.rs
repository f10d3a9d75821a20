//! Checkout-new command - branch off an issue from the configured tracker

use anyhow::Result;

use crate::color;
use crate::config::{GlobalConfig, RepositoryConfig};
use crate::domain::{template_branch_name, Issue, TemplateEngine};
use crate::integrations::editor::{Editor, InquireEditor};
use crate::integrations::gh::RealGhClient;
use crate::integrations::git::{GitClient, RealGitClient};
use crate::integrations::prompt::{InquirePrompter, Prompter};
use crate::progress;
use crate::providers::IssueProvider;

/// Check out a new branch named after an issue
///
/// # Errors
/// Returns an error if:
/// - Not in a git repository
/// - The issue cannot be fetched, or the provider is misconfigured
/// - Branch creation fails
pub fn cmd_checkout_new(issue_key: Option<&str>, color_mode: color::ColorMode) -> Result<()> {
    let git = RealGitClient;
    let gh = RealGhClient;
    let prompter = InquirePrompter;
    let editor = InquireEditor;

    let repo_root = git.repo_root()?;
    let config = RepositoryConfig::load_from_repo_root(&repo_root)?;
    let global = GlobalConfig::load()?;
    let provider = crate::providers::build(&config, &global, &gh)?;

    run_checkout_new(
        issue_key,
        &config,
        provider.as_ref(),
        &git,
        &prompter,
        &editor,
        color_mode,
    )
}

pub fn run_checkout_new(
    issue_key: Option<&str>,
    config: &RepositoryConfig,
    provider: &dyn IssueProvider,
    git: &dyn GitClient,
    prompter: &dyn Prompter,
    editor: &dyn Editor,
    color_mode: color::ColorMode,
) -> Result<()> {
    let issue = match issue_key {
        Some(key) => {
            let spinner = progress::start(color_mode, format!("Fetching issue {key}..."));
            let issue = provider.get(key);
            progress::finish(spinner);
            issue?
        }
        None => {
            let spinner = progress::start(color_mode, "Listing your issues...");
            let issues = provider.list();
            progress::finish(spinner);
            pick_issue(issues?, prompter)?
        }
    };

    let separators = config.branch.separator_chars()?;
    let engine = TemplateEngine::new(&separators)?;
    let name = template_branch_name(
        &config.branch,
        &config.issue.types,
        &issue,
        &engine,
        prompter,
        editor,
    )?;

    git.checkout_new_branch(&name)?;
    eprintln!(
        "{}",
        color::success(color_mode, format!("Checked out new branch: {name}"))
    );
    Ok(())
}

fn pick_issue(issues: Vec<Issue>, prompter: &dyn Prompter) -> Result<Issue> {
    if issues.is_empty() {
        anyhow::bail!("no open issues assigned to you");
    }

    let options: Vec<String> = issues
        .iter()
        .map(|issue| format!("{}: {}", issue.key, issue.title))
        .collect();
    let selected = prompter.select("Choose an issue", &options)?;

    let index = options
        .iter()
        .position(|o| o == &selected)
        .unwrap_or_default();
    Ok(issues
        .into_iter()
        .nth(index)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result as PrxResult};
    use crate::integrations::git::tests::MockGitClient;
    use std::cell::RefCell;

    struct StubProvider {
        issue: Issue,
        listed: Vec<Issue>,
    }

    impl IssueProvider for StubProvider {
        fn get(&self, _key: &str) -> Result<Issue> {
            Ok(self.issue.clone())
        }

        fn list(&self) -> Result<Vec<Issue>> {
            Ok(self.listed.clone())
        }
    }

    struct SelectFirst;

    impl Prompter for SelectFirst {
        fn select(&self, _message: &str, options: &[String]) -> PrxResult<String> {
            options
                .first()
                .cloned()
                .ok_or_else(|| Error::Interaction("no options".to_string()))
        }

        fn confirm(&self, _message: &str, _default: bool) -> PrxResult<bool> {
            Ok(true)
        }

        fn input(&self, _message: &str) -> PrxResult<String> {
            Ok(String::new())
        }
    }

    struct NoEditor;

    impl Editor for NoEditor {
        fn edit(&self, _message: &str, initial: &str) -> PrxResult<String> {
            Ok(initial.to_string())
        }
    }

    struct CheckoutRecorder {
        inner: MockGitClient,
        branches: RefCell<Vec<String>>,
    }

    impl GitClient for CheckoutRecorder {
        fn repo_root(&self) -> Result<std::path::PathBuf> {
            self.inner.repo_root()
        }

        fn current_branch(&self) -> Result<String> {
            self.inner.current_branch()
        }

        fn checkout_new_branch(&self, name: &str) -> Result<()> {
            self.branches.borrow_mut().push(name.to_string());
            Ok(())
        }

        fn push_upstream(&self, branch: &str) -> Result<()> {
            self.inner.push_upstream(branch)
        }

        fn commit_messages(&self, base: &str) -> Result<Vec<String>> {
            self.inner.commit_messages(base)
        }

        fn diff(&self, base: &str) -> Result<String> {
            self.inner.diff(base)
        }
    }

    fn recorder() -> CheckoutRecorder {
        CheckoutRecorder {
            inner: MockGitClient::new("main"),
            branches: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_checkout_new_with_explicit_issue() {
        let provider = StubProvider {
            issue: Issue {
                key: "42".to_string(),
                title: "Crash on startup".to_string(),
                issue_type: "fix".to_string(),
                ..Issue::default()
            },
            listed: Vec::new(),
        };
        let git = recorder();
        let prompter = SelectFirst;

        run_checkout_new(
            Some("42"),
            &RepositoryConfig::default(),
            &provider,
            &git,
            &prompter,
            &NoEditor,
            color::ColorMode::Never,
        )
        .unwrap();
        assert_eq!(*git.branches.borrow(), vec!["fix/42-crash-on-startup"]);
    }

    #[test]
    fn test_checkout_new_picks_from_list() {
        let provider = StubProvider {
            issue: Issue::default(),
            listed: vec![
                Issue {
                    key: "ENG-1".to_string(),
                    title: "First".to_string(),
                    issue_type: "feat".to_string(),
                    suggested_branch_name: "eng-1-first".to_string(),
                },
                Issue {
                    key: "ENG-2".to_string(),
                    title: "Second".to_string(),
                    ..Issue::default()
                },
            ],
        };
        let git = recorder();
        let prompter = SelectFirst;

        run_checkout_new(
            None,
            &RepositoryConfig::default(),
            &provider,
            &git,
            &prompter,
            &NoEditor,
            color::ColorMode::Never,
        )
        .unwrap();
        assert_eq!(*git.branches.borrow(), vec!["feat/ENG-1-first"]);
    }

    #[test]
    fn test_checkout_new_empty_issue_list() {
        let provider = StubProvider {
            issue: Issue::default(),
            listed: Vec::new(),
        };
        let git = recorder();
        let prompter = SelectFirst;

        let err = run_checkout_new(
            None,
            &RepositoryConfig::default(),
            &provider,
            &git,
            &prompter,
            &NoEditor,
            color::ColorMode::Never,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no open issues"));
    }
}
