//! Tracker-agnostic issue representation

use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_TITLE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.a-zA-Z0-9]").expect("static regex is valid"));

/// An issue fetched from any of the configured trackers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    /// Tracker-native identifier, e.g. `1234` or `PROJ-42`
    pub key: String,
    pub title: String,
    /// Inferred issue category (one of the configured issue types), or
    /// empty when the tracker metadata doesn't map cleanly
    pub issue_type: String,
    /// Tracker-supplied branch name hint (populated for Linear issues)
    pub suggested_branch_name: String,
}

impl Issue {
    /// Title lowered and slugged for use as a branch `Description`
    ///
    /// Characters outside `[.a-zA-Z0-9]` become `-`; leading/trailing `-`
    /// are trimmed.
    #[must_use]
    pub fn normalized_title(&self) -> String {
        INVALID_TITLE_CHARS
            .replace_all(&self.title, "-")
            .to_lowercase()
            .trim_matches('-')
            .to_string()
    }
}
