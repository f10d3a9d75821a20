//! Spinner helpers for long-running child processes and HTTP calls

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::color::ColorMode;

/// Start a spinner with a message if the terminal supports it
///
/// Returns `None` on non-TTY output so plain logs stay clean; callers must
/// hold the returned guard for the duration of the work.
pub fn start(color_mode: ColorMode, message: impl Into<String>) -> Option<ProgressBar> {
    if !color_mode.should_colorize() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template is valid"),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Clear a spinner started with [`start`]
pub fn finish(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}
