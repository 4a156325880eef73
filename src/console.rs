//! Terminal stand-ins for the page: a queue of file picks, a status line on
//! stdout, and alerts on stderr.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use crate::contract::{FileSelector, Notifier, SelectedFile, StatusDisplay};

/// Picks handed to the controller one per click, in the order they were made.
///
/// A `None` pick, or a path that cannot be read, counts as "nothing selected".
#[derive(Default)]
pub struct ConsoleSelector {
    picks: Mutex<VecDeque<Option<PathBuf>>>,
}

impl ConsoleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(&self, path: Option<PathBuf>) {
        self.picks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(path);
    }
}

#[async_trait]
impl FileSelector for ConsoleSelector {
    async fn selected(&self) -> Option<SelectedFile> {
        let path = self
            .picks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .flatten()?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(SelectedFile::from_path(path, meta.len())),
            Ok(_) => {
                warn!(path = %path.display(), "Selected path is not a file");
                None
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Could not read selected video");
                None
            }
        }
    }
}

/// Prints every status change as its own line and remembers the last one.
#[derive(Default)]
pub struct ConsoleStatus {
    last: Mutex<String>,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whatever the label shows right now.
    pub fn text(&self) -> String {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StatusDisplay for ConsoleStatus {
    fn set_text(&self, text: &str) {
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        println!("{text}");
        *last = text.to_string();
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
