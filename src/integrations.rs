//! External process and terminal integrations

pub mod editor;
pub mod gh;
pub mod git;
pub mod prompt;

pub use editor::{Editor, InquireEditor};
pub use gh::{GhClient, PrOptions, RealGhClient};
pub use git::{GitClient, RealGitClient};
pub use prompt::{InquirePrompter, Prompter};
