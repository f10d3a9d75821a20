//! Branch pattern compilation and parsing
//!
//! A branch pattern is a regular expression with `{{Field}}` placeholders
//! (the legacy `{{.Field}}` spelling is accepted too). Each placeholder is
//! replaced by a named capture group whose body comes from the configured
//! per-field variable patterns, and the result is anchored and compiled.
//! Parsing a branch name against the compiled pattern yields the full set
//! of captured fields.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::Error;

static LEFTOVER_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\.?[A-Za-z_][A-Za-z0-9_]*\}\}").expect("leftover placeholder regex")
});

/// Compile a branch pattern into an anchored regex with one named capture
/// group per placeholder
///
/// # Errors
/// Returns a `Pattern` error when a placeholder has no entry in
/// `variable_patterns` or the substituted expression fails to compile
pub fn compile_pattern(
    pattern: &str,
    variable_patterns: &BTreeMap<String, String>,
) -> Result<Regex, Error> {
    let mut expanded = pattern.to_string();
    for (name, fragment) in variable_patterns {
        let group = format!("(?P<{name}>{fragment})");
        expanded = expanded
            .replace(&format!("{{{{.{name}}}}}"), &group)
            .replace(&format!("{{{{{name}}}}}"), &group);
    }

    if let Some(leftover) = LEFTOVER_PLACEHOLDER.find(&expanded) {
        return Err(Error::Pattern {
            pattern: pattern.to_string(),
            reason: format!(
                "placeholder {} has no variable pattern configured",
                leftover.as_str()
            ),
        });
    }

    Regex::new(&format!("^{expanded}$")).map_err(|err| Error::Pattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}

/// Parse a branch name against a compiled pattern, returning every named
/// group. Optional groups that did not participate in the match come back
/// as empty strings, so templates can test them with `{{#if ...}}`.
///
/// # Errors
/// Returns a `NoMatch` error when the branch name does not match
pub fn parse_branch(name: &str, pattern: &Regex) -> Result<Map<String, Value>, Error> {
    let captures = pattern.captures(name).ok_or_else(|| Error::NoMatch {
        name: name.to_string(),
        pattern: pattern.as_str().to_string(),
    })?;

    let mut fields = Map::new();
    for group in pattern.capture_names().flatten() {
        let matched = captures.name(group).map_or("", |m| m.as_str());
        fields.insert(group.to_string(), Value::from(matched));
    }
    Ok(fields)
}
