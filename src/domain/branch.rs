//! Branch name templating and normalization

use serde_json::json;

use crate::config::BranchConfig;
use crate::domain::issue::Issue;
use crate::domain::template::TemplateEngine;
use crate::error::Result;
use crate::integrations::editor::Editor;
use crate::integrations::prompt::Prompter;

/// Collapse runs of the same separator character and trim stray dashes and
/// newlines from both ends
pub fn normalize_branch_name(name: &str, separators: &[char]) -> String {
    let mut out = name.to_string();
    for &sep in separators {
        let doubled: String = [sep, sep].iter().collect();
        let single = sep.to_string();
        while out.contains(&doubled) {
            out = out.replace(&doubled, &single);
        }
    }
    out.trim_matches(|c| c == '-' || c == '\n').to_string()
}

/// Render a branch name for an issue
///
/// The issue type is taken from the issue when it carries one, and chosen
/// interactively otherwise. When the result exceeds the configured maximum
/// length the user is asked whether to shorten it in their editor.
///
/// # Errors
/// Fails when the template cannot be rendered or an interaction is aborted
pub fn template_branch_name(
    branch: &BranchConfig,
    issue_types: &[String],
    issue: &Issue,
    engine: &TemplateEngine,
    prompter: &dyn Prompter,
    editor: &dyn Editor,
) -> Result<String> {
    let issue_type = if issue.issue_type.is_empty() {
        prompter.select("Choose an issue type", issue_types)?
    } else {
        issue.issue_type.clone()
    };
    let rendered = engine.render_lenient(
        &branch.template,
        &json!({
            "Type": issue_type,
            "Issue": issue.key,
            "Description": issue.normalized_title(),
        }),
    )?;

    let separators = branch.separator_chars()?;
    let mut name = normalize_branch_name(&rendered, &separators);

    if branch.max_length > 0 && name.chars().count() > branch.max_length {
        let shorten = prompter.confirm(
            &format!("Branch name is too long, do you want to change it?\n>> {name}"),
            false,
        )?;
        if shorten {
            let edited = editor.edit("Shorten the branch name", &name)?;
            name = normalize_branch_name(&edited, &separators);
        }
    }

    Ok(name)
}
