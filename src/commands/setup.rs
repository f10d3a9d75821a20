//! Setup command - store issue tracker credentials in the global config

use anyhow::Result;

use crate::color;
use crate::config::GlobalConfig;
use crate::integrations::prompt::{InquirePrompter, Prompter};

/// Prompt for and persist provider credentials
///
/// # Errors
/// Returns an error if:
/// - An unknown provider is given
/// - A prompt is aborted
/// - The global config cannot be written
pub fn cmd_setup(provider: Option<&str>, color_mode: color::ColorMode) -> Result<()> {
    let prompter = InquirePrompter;
    run_setup(provider, &prompter, color_mode)
}

pub fn run_setup(
    provider: Option<&str>,
    prompter: &dyn Prompter,
    color_mode: color::ColorMode,
) -> Result<()> {
    let provider = match provider {
        Some(name) => name.to_string(),
        None => prompter.select(
            "Which provider do you want to configure?",
            &["jira".to_string(), "linear".to_string()],
        )?,
    };

    let mut config = GlobalConfig::load()?;
    match provider.as_str() {
        "jira" => {
            config.jira.endpoint =
                prompter.input("Jira endpoint (e.g. https://acme.atlassian.net)")?;
            config.jira.user = prompter.input("Jira account email")?;
            config.jira.token = prompter.input("Jira API token")?;
            config.jira.validate()?;
        }
        "linear" => {
            config.linear.api_key = prompter.input("Linear API key")?;
            config.linear.validate()?;
        }
        other => anyhow::bail!("unsupported provider '{other}'; expected jira or linear"),
    }

    let path = config.save()?;
    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!("Saved {provider} credentials to {}", path.display())
        )
    );
    Ok(())
}
