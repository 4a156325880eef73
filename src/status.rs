//! Status text shown to the user for each stage of an analyze click.

use std::fmt;

pub const ANALYZING_MESSAGE: &str = "Analyzing video, please wait... ⚙️";
pub const DONE_MESSAGE: &str = "✅ Analysis complete! Video is now showing in a new window.";
pub const ERROR_PREFIX: &str = "❌ Error: ";
pub const NO_VIDEO_ALERT: &str = "Please upload a video first!";

/// `Idle -> Analyzing -> {Done, Failed}`. A new click starts over from
/// `Analyzing` and overwrites whatever was shown before.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Analyzing,
    Done,
    Failed(String),
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Idle => String::new(),
            Status::Analyzing => ANALYZING_MESSAGE.to_string(),
            Status::Done => DONE_MESSAGE.to_string(),
            Status::Failed(message) => format!("{ERROR_PREFIX}{message}"),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Status::Done | Status::Failed(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
