use crate::error::Result;

/// Editor interface for reworking generated text (over-long branch names)
pub trait Editor {
    /// Open `initial` in an editor and return the edited text
    fn edit(&self, message: &str, initial: &str) -> Result<String>;
}

/// Editor prompt backed by inquire, honoring `$VISUAL`/`$EDITOR`
#[derive(Debug, Default)]
pub struct InquireEditor;

impl Editor for InquireEditor {
    fn edit(&self, message: &str, initial: &str) -> Result<String> {
        Ok(inquire::Editor::new(message)
            .with_predefined_text(initial)
            .prompt()?)
    }
}
