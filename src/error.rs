//! Error types for a single analyze click.

use std::error::Error as StdError;

use thiserror::Error;

pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// Boxed error returned by transports and other ports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Clicked with nothing selected. Handled locally, never reaches the network.
    #[error("no video selected")]
    UserInputMissing,

    /// The endpoint answered with a non-2xx status. The status is kept for
    /// diagnostics only; users see the fixed message.
    #[error("Failed to process video")]
    Rejected { status: u16 },

    /// The request never produced a response. Holds the whole cause chain,
    /// outermost first, joined with `": "`.
    #[error("{0}")]
    Transport(String),
}

impl AnalyzeError {
    /// True for the failures that come back from the request itself, as
    /// opposed to the local "nothing selected" check.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            AnalyzeError::Rejected { .. } | AnalyzeError::Transport(_)
        )
    }
}

impl From<BoxError> for AnalyzeError {
    fn from(e: BoxError) -> Self {
        AnalyzeError::Transport(chain_message(&*e))
    }
}

/// Display of an error followed by each of its sources. Causes whose text the
/// message already contains are skipped.
fn chain_message(e: &(dyn StdError + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_hides_the_status_code() {
        let err = AnalyzeError::Rejected { status: 500 };
        assert_eq!(err.to_string(), "Failed to process video");
        assert!(err.is_request_failure());
    }

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] std::io::Error);

    #[test]
    fn transport_message_includes_the_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let boxed: BoxError = Box::new(SendFailed(io));
        let err = AnalyzeError::from(boxed);
        assert_eq!(err.to_string(), "error sending request: connection refused");
    }

    #[test]
    fn transport_keeps_the_underlying_message() {
        let boxed: BoxError = "connection refused".into();
        let err = AnalyzeError::from(boxed);
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.is_request_failure());
        assert!(!AnalyzeError::UserInputMissing.is_request_failure());
    }
}
