use crate::error::Result;

/// Interactive prompt interface, kept behind a trait so templating logic
/// can be tested with scripted answers
pub trait Prompter {
    /// Choose one of `options`
    fn select(&self, message: &str, options: &[String]) -> Result<String>;

    /// Yes/no question with a default
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Free-form text input; implementations must not return an empty
    /// answer
    fn input(&self, message: &str) -> Result<String>;
}

/// Terminal prompts backed by inquire
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(&self, message: &str, options: &[String]) -> Result<String> {
        Ok(inquire::Select::new(message, options.to_vec()).prompt()?)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(inquire::Confirm::new(message).with_default(default).prompt()?)
    }

    fn input(&self, message: &str) -> Result<String> {
        Ok(inquire::Text::new(message)
            .with_validator(inquire::validator::ValueRequiredValidator::default())
            .prompt()?)
    }
}
