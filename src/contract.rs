//! # contract: the collaborators an analyze click talks to
//!
//! The upload controller never looks anything up globally. Every surface it
//! touches is passed in as one of the traits below:
//!
//! - [`FileSelector`]: the file picker (what is currently selected, if anything)
//! - [`StatusDisplay`]: the single status label
//! - [`Notifier`]: the blocking alert used when nothing is selected
//! - [`AnalyzeTransport`]: the `POST /analyze` call
//!
//! ## Mocking & Testing
//! Each trait is annotated for `mockall`, so tests can build `MockFileSelector`,
//! `MockStatusDisplay`, `MockNotifier` and `MockAnalyzeTransport` directly.
//! The mocks are exported outside `cfg(test)` through the `test-export-mocks`
//! feature so integration tests can use them too.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BoxError;

/// Multipart field name the endpoint reads the upload from.
pub const VIDEO_FIELD: &str = "video";

/// Relative path of the analysis endpoint.
pub const ANALYZE_ENDPOINT: &str = "/analyze";

/// Where the bytes of a selection live.
///
/// A path is only opened when the upload is sent, and is streamed from disk
/// rather than read into memory first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// A file picked by the user: name, size, content type and a handle on its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    pub content: FileContent,
}

impl SelectedFile {
    /// An in-memory selection, with the content type derived from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        SelectedFile {
            mime_type: mime_for(&file_name).to_string(),
            size: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
            file_name,
        }
    }

    /// A selection backed by a file on disk of the given size.
    pub fn from_path(path: PathBuf, size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        SelectedFile {
            mime_type: mime_for(&file_name).to_string(),
            size,
            content: FileContent::Path(path),
            file_name,
        }
    }
}

/// Content type for common video containers; anything else is sent as
/// opaque bytes.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// One outbound upload: exactly one file under [`VIDEO_FIELD`].
///
/// Built fresh for every click and dropped once the request settles. The
/// `request_id` only exists to tell concurrent requests apart in logs.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub request_id: Uuid,
    pub field_name: &'static str,
    pub file: SelectedFile,
}

impl UploadRequest {
    pub fn new(file: SelectedFile) -> Self {
        UploadRequest {
            request_id: Uuid::new_v4(),
            field_name: VIDEO_FIELD,
            file,
        }
    }
}

/// What the controller needs to know about a response: its status code.
/// The body is never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: u16,
}

impl UploadResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The file picker.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait FileSelector: Send + Sync {
    /// The currently selected file, or `None` when nothing is picked.
    async fn selected(&self) -> Option<SelectedFile>;
}

/// The status label.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait StatusDisplay: Send + Sync {
    /// Replace the visible text.
    fn set_text(&self, text: &str);
}

/// Blocking user-facing notification.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Sends an [`UploadRequest`] to the analysis endpoint.
///
/// Implementors return `Ok` for every response they receive, whatever its
/// status; `Err` is reserved for requests that never got an answer.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait AnalyzeTransport: Send + Sync {
    async fn analyze(&self, request: UploadRequest) -> Result<UploadResponse, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(SelectedFile::new("match.MP4", vec![]).mime_type, "video/mp4");
        assert_eq!(mime_for("clip.mov"), "video/quicktime");
        assert_eq!(mime_for("notes"), "application/octet-stream");
    }

    #[test]
    fn path_selection_takes_its_name_from_the_path() {
        let file = SelectedFile::from_path(PathBuf::from("/videos/final.webm"), 42);
        assert_eq!(file.file_name, "final.webm");
        assert_eq!(file.mime_type, "video/webm");
        assert_eq!(file.size, 42);
        assert_eq!(file.content, FileContent::Path(PathBuf::from("/videos/final.webm")));
    }

    #[test]
    fn every_request_gets_its_own_id() {
        let file = SelectedFile::new("a.mp4", b"abc".to_vec());
        let first = UploadRequest::new(file.clone());
        let second = UploadRequest::new(file);
        assert_ne!(first.request_id, second.request_id);
        assert_eq!(first.field_name, "video");
    }

    #[test]
    fn only_2xx_is_success() {
        assert!(UploadResponse { status: 200 }.is_success());
        assert!(UploadResponse { status: 204 }.is_success());
        assert!(!UploadResponse { status: 302 }.is_success());
        assert!(!UploadResponse { status: 500 }.is_success());
    }
}
