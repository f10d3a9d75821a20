//! Commented configuration templates written by `prx init`

/// Generate the local (per-repository) config template
#[must_use]
pub fn generate_local() -> String {
    r##"# prx repository configuration
# Settings here apply to this repository only and take precedence over the
# [repository] section of the global config.

[branch]
# Render-direction template for new branch names created by `prx checkout-new`.
# Variables: {{Type}}, {{Issue}}, {{Description}}
# template = "{{Type}}/{{#if Issue}}{{Issue}}-{{/if}}{{Description}}"

# Parse-direction pattern used by `prx create` to validate the current branch
# name and extract fields. Placeholders expand to the regexes defined in
# variable_patterns; raw regex syntax is allowed between them.
# pattern = '{{.Type}}\/({{.Issue}}-)?{{.Description}}'

# Regex fragment for each placeholder.
# [branch.variable_patterns]
# Type = "fix|feat|chore|docs|refactor|test|style|build|ci|perf|revert"
# Issue = "([a-zA-Z]+-)*[0-9]+"
# Description = ".*"

# Word separators used for humanizing and de-duplication ("/" is implied).
# token_separators = ["-", "_"]

# Branch names longer than this prompt for a manual edit.
# max_length = 60

[pr]
# Title template, rendered against the parsed branch fields. Referencing a
# field the branch name doesn't carry prompts for a value interactively.
# title = "{{Type}}{{#if Issue}}({{Issue}}){{/if}}: {{humanize Description}}"

# Commit lines matching any of these regexes are dropped from the body.
# ignore_commits_patterns = ["^wip"]

# Walk the body's markdown checklist after rendering (answer per item, or
# check everything when --confirm is given).
# answer_checklist = true

# Push the current branch to origin before creating the PR.
# push_to_remote = true

[issue]
# Issue tracker backing `prx checkout-new`: "github", "jira" or "linear".
# provider = "github"

# [checkout_new.github]
# issue_list_flags = ["--state", "open", "--assignee", "@me"]

# [checkout_new.jira]
# project = "PROJ"
# issue_jql = "assignee=currentUser()+ORDER+BY+updated+DESC"
"##
    .to_string()
}

/// Generate the global config template
#[must_use]
pub fn generate_global() -> String {
    r#"# prx global configuration
# Provider credentials live here; repository settings under [repository] act
# as defaults for repositories without a .prx.toml.
# Credentials can also come from JIRA_ENDPOINT / JIRA_USER / JIRA_TOKEN and
# LINEAR_API_KEY environment variables.

[jira]
# endpoint = "https://your-company.atlassian.net"
# user = "you@example.com"
# token = ""

[linear]
# api_key = ""

# [repository.issue]
# provider = "github"
"#
    .to_string()
}
