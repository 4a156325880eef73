#![doc = "HTTP transport for the analysis endpoint: sends the selected video as multipart/form-data."]
//
//! # Analyze client
//!
//! [`AnalyzeClient`] implements [`AnalyzeTransport`] on top of `reqwest`. It
//! posts a form with a single part named `video` holding the file bytes, file
//! name and content type, and reports the response status back to the
//! controller. The body of the response is not read.
//!
//! Files selected from disk are streamed into the request body. In-memory
//! selections are sent as-is.
//!
//! Failures are returned, not logged at error level here; the controller
//! writes the one diagnostic entry per failed click.
//!
//! No headers, retries or cancellation are configured. A request timeout is
//! only applied when the configuration asks for one.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};

use crate::config::Config;
use crate::contract::{AnalyzeTransport, FileContent, UploadRequest, UploadResponse};
use crate::error::BoxError;

pub struct AnalyzeClient {
    http: Client,
    url: String,
}

impl AnalyzeClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let url = config.endpoint_url();
        tracing::info!(
            url = %url,
            timeout_secs = ?config.upload.timeout_secs,
            "Initialized AnalyzeClient"
        );
        Ok(AnalyzeClient { http, url })
    }
}

#[async_trait]
impl AnalyzeTransport for AnalyzeClient {
    async fn analyze(&self, request: UploadRequest) -> Result<UploadResponse, BoxError> {
        let UploadRequest {
            request_id,
            field_name,
            file,
        } = request;

        tracing::info!(
            %request_id,
            url = %self.url,
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            "Uploading video for analysis"
        );

        let part = match file.content {
            FileContent::Bytes(bytes) => Part::bytes(bytes),
            FileContent::Path(path) => {
                let handle = tokio::fs::File::open(&path).await?;
                Part::stream_with_length(Body::from(handle), file.size)
            }
        }
        .file_name(file.file_name)
        .mime_str(&file.mime_type)?;
        let form = Form::new().part(field_name, part);

        let response = match self.http.post(&self.url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%request_id, error = ?e, "Upload never reached the analysis endpoint");
                return Err(Box::new(e));
            }
        };

        let status = response.status().as_u16();
        tracing::info!(%request_id, status, "Analysis endpoint responded");
        Ok(UploadResponse { status })
    }
}
