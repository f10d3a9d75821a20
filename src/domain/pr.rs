//! Pull request templating
//!
//! Turns the fields parsed from a branch name into a PR title, body, and
//! label set. The title is rendered strictly and missing fields are
//! collected interactively; the body is rendered leniently so optional
//! sections simply disappear. Commit lists and AI summaries are only
//! fetched when the body template actually references them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::config::PullRequestConfig;
use crate::domain::template::TemplateEngine;
use crate::error::{Error, Result};
use crate::integrations::prompt::Prompter;

/// Everything needed to open the PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContent {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

// Guards against a title template and prompt answers that can never converge
const MAX_TITLE_PROMPTS: usize = 10;

static COMMIT_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\*\-]").expect("commit split regex"));
static CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*]\s*\[(?:x| )\](?P<rest>.*)$").expect("checkbox regex"));

/// Render the PR title, body, and labels for a set of branch fields
///
/// `commits` and `ai_summary` are called at most once each, and only when
/// the body template references `Commits` or `AISummary` respectively.
///
/// # Errors
/// Fails on template errors, aborted prompts, or failures in the lazily
/// invoked fetchers
pub fn template_pr(
    pr: &PullRequestConfig,
    fields: &Map<String, Value>,
    engine: &TemplateEngine,
    prompter: &dyn Prompter,
    confirm: bool,
    commits: impl FnOnce() -> Result<Vec<String>>,
    ai_summary: impl FnOnce() -> Result<String>,
) -> Result<PullRequestContent> {
    let mut data = fields.clone();
    let title = template_title(pr, &mut data, engine, prompter)?;
    let labels = labels_for_type(&data);

    let mut body_data = data;
    if pr.body.contains("Commits") {
        let filtered = filter_commits(&commits()?, &pr.ignore_commits_patterns)?;
        body_data.insert("Commits".to_string(), Value::from(filtered));
    }
    if pr.body.contains("AISummary") {
        let summary = ai_summary()?;
        if !summary.is_empty() {
            body_data.insert("AISummary".to_string(), Value::from(summary));
        }
    }

    let mut body = engine.render_lenient(&pr.body, &Value::Object(body_data))?;
    if pr.answer_checklist {
        body = answer_checklist(&body, prompter, confirm)?;
    }

    Ok(PullRequestContent { title, body, labels })
}

fn template_title(
    pr: &PullRequestConfig,
    data: &mut Map<String, Value>,
    engine: &TemplateEngine,
    prompter: &dyn Prompter,
) -> Result<String> {
    for _ in 0..=MAX_TITLE_PROMPTS {
        match engine.render_strict(&pr.title, &Value::Object(data.clone())) {
            Ok(title) => return Ok(title.trim().to_string()),
            Err(Error::MissingField(key)) => {
                let value = prompter.input(&format!("Enter a value for {key}"))?;
                data.insert(key, Value::from(value));
            }
            Err(err) => return Err(err),
        }
    }
    Err(Error::Template(format!(
        "title template still has missing fields after {MAX_TITLE_PROMPTS} prompts"
    )))
}

/// Split commit messages into bullet items, drop ignored ones, and reverse
/// the newest-first git order into reading order
///
/// # Errors
/// Returns a `Config` error when an ignore pattern is not a valid regex
pub fn filter_commits(commits: &[String], ignore_patterns: &[String]) -> Result<Vec<String>> {
    let ignores = ignore_patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|err| {
                Error::Config(format!("ignore_commits_patterns: invalid pattern '{p}': {err}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut items = Vec::new();
    for message in commits {
        for part in COMMIT_SPLIT.split(message) {
            let part = part.trim();
            if part.is_empty() || ignores.iter().any(|re| re.is_match(part)) {
                continue;
            }
            items.push(part.to_string());
        }
    }
    items.reverse();
    Ok(items)
}

/// Walk the rendered body and resolve every markdown checkbox line.
/// Answering yes checks the box, no leaves it unchecked, and skip removes
/// the line entirely. With `confirm` set every box is checked without
/// prompting.
///
/// # Errors
/// Fails when a prompt is aborted
pub fn answer_checklist(body: &str, prompter: &dyn Prompter, confirm: bool) -> Result<String> {
    let options: Vec<String> = ["Yes", "No", "Skip"].iter().map(ToString::to_string).collect();

    let mut lines = Vec::new();
    for line in body.lines() {
        let Some(captures) = CHECKBOX.captures(line) else {
            lines.push(line.to_string());
            continue;
        };
        let rest = &captures["rest"];

        let answer = if confirm {
            "Yes".to_string()
        } else {
            prompter.select(&format!("{}?", rest.trim()), &options)?
        };
        match answer.as_str() {
            "Yes" => lines.push(format!("- [x]{rest}")),
            "No" => lines.push(format!("- [ ]{rest}")),
            _ => {}
        }
    }

    let mut out = lines.join("\n");
    if body.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Map the lowercased branch type to the matching GitHub label, falling
/// back to the type itself
pub fn labels_for_type(fields: &Map<String, Value>) -> Vec<String> {
    let Some(branch_type) = fields
        .get("Type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
    else {
        return Vec::new();
    };
    let branch_type = branch_type.to_lowercase();
    let label = match branch_type.as_str() {
        "fix" => "bug",
        "feat" => "enhancement",
        "docs" => "documentation",
        other => other,
    };
    vec![label.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct ScriptedPrompter {
        inputs: RefCell<VecDeque<String>>,
        selections: RefCell<VecDeque<String>>,
    }

    impl ScriptedPrompter {
        fn new(inputs: &[&str], selections: &[&str]) -> Self {
            Self {
                inputs: RefCell::new(inputs.iter().map(ToString::to_string).collect()),
                selections: RefCell::new(selections.iter().map(ToString::to_string).collect()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&self, message: &str, _options: &[String]) -> Result<String> {
            self.selections
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| Error::Interaction(format!("unexpected select: {message}")))
        }

        fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
            Err(Error::Interaction(format!("unexpected confirm: {message}")))
        }

        fn input(&self, message: &str) -> Result<String> {
            self.inputs
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| Error::Interaction(format!("unexpected input: {message}")))
        }
    }

    fn engine() -> TemplateEngine {
        TemplateEngine::new(&['-', '_', '/']).unwrap()
    }

    fn fields(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
            .collect()
    }

    fn no_commits() -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn no_summary() -> Result<String> {
        Ok(String::new())
    }

    #[test]
    fn test_title_from_default_template() {
        let pr = PullRequestConfig {
            body: "body".to_string(),
            answer_checklist: false,
            ..PullRequestConfig::default()
        };
        let fields = fields(&[("Type", "fix"), ("Issue", "123"), ("Description", "add-thing")]);
        let prompter = ScriptedPrompter::new(&[], &[]);

        let content =
            template_pr(&pr, &fields, &engine(), &prompter, true, no_commits, no_summary).unwrap();
        assert_eq!(content.title, "fix(123): add thing");
        assert_eq!(content.labels, vec!["bug".to_string()]);
    }

    #[test]
    fn test_title_prompts_for_missing_fields() {
        let pr = PullRequestConfig {
            title: "{{Type}}: {{Summary}}".to_string(),
            body: "body".to_string(),
            answer_checklist: false,
            ..PullRequestConfig::default()
        };
        let fields = fields(&[("Type", "feat")]);
        let prompter = ScriptedPrompter::new(&["do the thing"], &[]);

        let content =
            template_pr(&pr, &fields, &engine(), &prompter, true, no_commits, no_summary).unwrap();
        assert_eq!(content.title, "feat: do the thing");
    }

    #[test]
    fn test_title_prompt_loop_is_bounded() {
        // Twelve distinct missing fields can never converge within the cap
        let title: String = ('A'..='L').map(|c| format!("{{{{{c}}}}}")).collect();
        let pr = PullRequestConfig {
            title,
            body: "body".to_string(),
            answer_checklist: false,
            ..PullRequestConfig::default()
        };
        let answers = vec!["x"; 11];
        let prompter = ScriptedPrompter::new(&answers, &[]);

        let err = template_pr(&pr, &Map::new(), &engine(), &prompter, true, no_commits, no_summary)
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_commits_fetched_only_when_referenced() {
        let pr = PullRequestConfig {
            title: "{{Type}}".to_string(),
            body: "static body".to_string(),
            answer_checklist: false,
            ..PullRequestConfig::default()
        };
        let fields = fields(&[("Type", "fix")]);
        let prompter = ScriptedPrompter::new(&[], &[]);

        let content = template_pr(
            &pr,
            &fields,
            &engine(),
            &prompter,
            true,
            || panic!("commits must not be fetched"),
            no_summary,
        )
        .unwrap();
        assert_eq!(content.body, "static body");
    }

    #[test]
    fn test_body_lists_commits_in_chronological_order() {
        let pr = PullRequestConfig {
            title: "{{Type}}".to_string(),
            body: "{{#each Commits}}* {{this}}\n{{/each}}".to_string(),
            answer_checklist: false,
            ..PullRequestConfig::default()
        };
        let fields = fields(&[("Type", "fix")]);
        let prompter = ScriptedPrompter::new(&[], &[]);

        let content = template_pr(
            &pr,
            &fields,
            &engine(),
            &prompter,
            true,
            || Ok(vec!["newest change".to_string(), "wip stuff".to_string(), "oldest change".to_string()]),
            no_summary,
        )
        .unwrap();
        assert_eq!(content.body, "* oldest change\n* newest change\n");
    }

    #[test]
    fn test_ai_summary_replaces_commit_list() {
        let pr = PullRequestConfig {
            title: "{{Type}}".to_string(),
            body: "{{#if AISummary}}{{AISummary}}{{else}}{{#each Commits}}* {{this}}{{/each}}{{/if}}"
                .to_string(),
            answer_checklist: false,
            ..PullRequestConfig::default()
        };
        let fields = fields(&[("Type", "feat")]);
        let prompter = ScriptedPrompter::new(&[], &[]);

        let content = template_pr(
            &pr,
            &fields,
            &engine(),
            &prompter,
            true,
            || Ok(vec!["a change".to_string()]),
            || Ok("A concise summary.".to_string()),
        )
        .unwrap();
        assert_eq!(content.body, "A concise summary.");
    }

    #[test]
    fn test_filter_commits_splits_and_ignores() {
        let commits = vec![
            "feat: latest * second bullet".to_string(),
            "wip broken".to_string(),
            "fix: earliest".to_string(),
        ];
        let items =
            filter_commits(&commits, &["^wip".to_string()]).unwrap();
        assert_eq!(
            items,
            vec![
                "fix: earliest".to_string(),
                "second bullet".to_string(),
                "feat: latest".to_string(),
            ]
        );
    }

    #[test]
    fn test_filter_commits_empty_patterns_keep_everything() {
        let commits = vec!["wip thing".to_string()];
        assert_eq!(filter_commits(&commits, &[]).unwrap(), vec!["wip thing".to_string()]);
    }

    #[test]
    fn test_checklist_confirm_ticks_every_box() {
        let body = "## Checklist\n- [ ] Tests added\n- [ ] Docs updated\n";
        let prompter = ScriptedPrompter::new(&[], &[]);
        let answered = answer_checklist(body, &prompter, true).unwrap();
        assert_eq!(answered, "## Checklist\n- [x] Tests added\n- [x] Docs updated\n");
    }

    #[test]
    fn test_checklist_answers_yes_no_skip() {
        let body = "- [ ] One\n- [ ] Two\n- [ ] Three\ntail";
        let prompter = ScriptedPrompter::new(&[], &["Yes", "No", "Skip"]);
        let answered = answer_checklist(body, &prompter, false).unwrap();
        assert_eq!(answered, "- [x] One\n- [ ] Two\ntail");
    }

    #[test]
    fn test_checklist_keeps_no_lines_and_drops_skipped() {
        let body = "- [ ] Tests are included\n- [ ] Docs updated\n";
        let prompter = ScriptedPrompter::new(&[], &["No", "Skip"]);
        let answered = answer_checklist(body, &prompter, false).unwrap();
        assert_eq!(answered, "- [ ] Tests are included\n");
    }

    #[test]
    fn test_checklist_no_resets_checked_boxes() {
        let body = "- [x] Done already\n";
        let prompter = ScriptedPrompter::new(&[], &["No"]);
        let answered = answer_checklist(body, &prompter, false).unwrap();
        assert_eq!(answered, "- [ ] Done already\n");
    }

    #[test]
    fn test_checklist_tolerates_loose_checkbox_markers() {
        let body = "-[ ] Tight spacing\n*  [ ] Star bullet\n";
        let prompter = ScriptedPrompter::new(&[], &[]);
        let answered = answer_checklist(body, &prompter, true).unwrap();
        assert_eq!(answered, "- [x] Tight spacing\n- [x] Star bullet\n");
    }

    #[test]
    fn test_labels_fall_back_to_type() {
        assert_eq!(
            labels_for_type(&fields(&[("Type", "chore")])),
            vec!["chore".to_string()]
        );
        assert_eq!(labels_for_type(&Map::new()), Vec::<String>::new());
    }

    #[test]
    fn test_labels_lowercase_type_before_mapping() {
        assert_eq!(
            labels_for_type(&fields(&[("Type", "Fix")])),
            vec!["bug".to_string()]
        );
    }
}
