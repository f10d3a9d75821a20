//! Error taxonomy for branch parsing and PR templating

use thiserror::Error;

/// Errors produced by the branch/PR templating core.
///
/// Command handlers wrap these into `anyhow` at the CLI boundary; the
/// variants exist so the title-rendering retry loop (and tests) can match
/// on the kind of failure instead of scraping message text.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed configuration value (bad separator, unknown provider, ...)
    #[error("invalid config: {0}")]
    Config(String),

    /// The substituted branch pattern is not a valid regular expression,
    /// or contains a placeholder with no matching variable pattern
    #[error("invalid branch pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// The branch name does not satisfy the configured pattern
    #[error("branch '{name}' does not match pattern '{pattern}'")]
    NoMatch { name: String, pattern: String },

    /// A strict-mode template referenced a field absent from the data
    #[error("template references missing field '{0}'")]
    MissingField(String),

    /// Template syntax error or non-missing-key runtime error
    #[error("template error: {0}")]
    Template(String),

    /// A commits-fetch or AI-summary callback failed
    #[error("{what} failed: {source}")]
    ExternalCall {
        what: String,
        #[source]
        source: anyhow::Error,
    },

    /// The user cancelled a prompt, or prompt I/O failed
    #[error("prompt failed: {0}")]
    Interaction(String),
}

impl Error {
    pub fn external_call(what: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ExternalCall {
            what: what.into(),
            source,
        }
    }
}

impl From<inquire::InquireError> for Error {
    fn from(err: inquire::InquireError) -> Self {
        Self::Interaction(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
