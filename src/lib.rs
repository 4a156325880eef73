#![doc = "analyze-upload: send a video to an analysis endpoint and show how it went."]

//! One click, one upload. The [`controller::UploadController`] reads the
//! selected file, posts it as `multipart/form-data` under the field `video` to
//! `/analyze`, and writes one of three messages to the status label:
//! in progress, complete, or `❌ Error: <message>`.
//!
//! Every surface the controller touches is injected through the traits in
//! [`contract`]; [`upload`] provides the HTTP transport and [`console`] the
//! terminal versions of the page used by the CLI.

pub mod cli;
pub mod config;
pub mod console;
pub mod contract;
pub mod controller;
pub mod error;
pub mod load_config;
pub mod status;
pub mod upload;

pub use cli::{run, Cli, Commands};
pub use controller::{Click, UploadController};
pub use error::{AnalyzeError, AnalyzeResult};
pub use status::Status;
