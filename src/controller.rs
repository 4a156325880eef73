//! Turns a click into one upload and reflects the outcome as status text.
//!
//! A click runs in two halves:
//!
//! 1. [`UploadController::prepare`] reads the selection, alerts when it is
//!    empty, and shows the in-progress message. Nothing here waits on the
//!    network, so clicks are prepared in the order they arrive.
//! 2. [`UploadController::submit`] sends the request and writes the outcome.
//!
//! [`UploadController::on_analyze_click`] runs both halves back to back.
//! [`UploadController::on_ready`] registers the handler for a stream of clicks
//! and runs each submit in its own task. Clicks are not queued or
//! de-duplicated: when two requests are in flight, whichever settles last owns
//! the status label.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info, info_span, warn, Instrument};

use crate::contract::{AnalyzeTransport, FileSelector, Notifier, StatusDisplay, UploadRequest};
use crate::error::{AnalyzeError, AnalyzeResult};
use crate::status::{Status, NO_VIDEO_ALERT};

/// A press of the analyze button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Click;

pub struct UploadController {
    selector: Arc<dyn FileSelector>,
    status: Arc<dyn StatusDisplay>,
    notifier: Arc<dyn Notifier>,
    transport: Arc<dyn AnalyzeTransport>,
}

impl UploadController {
    pub fn new(
        selector: Arc<dyn FileSelector>,
        status: Arc<dyn StatusDisplay>,
        notifier: Arc<dyn Notifier>,
        transport: Arc<dyn AnalyzeTransport>,
    ) -> Self {
        UploadController {
            selector,
            status,
            notifier,
            transport,
        }
    }

    /// Registers the click handler and returns the dispatch task.
    ///
    /// The task ends once `clicks` is closed and every request it started has
    /// settled, yielding the number of clicks it handled.
    pub fn on_ready(self: Arc<Self>, mut clicks: mpsc::Receiver<Click>) -> JoinHandle<usize> {
        info!("Analyze handler registered");
        tokio::spawn(async move {
            let mut in_flight = JoinSet::new();
            let mut handled = 0usize;

            while let Some(Click) = clicks.recv().await {
                handled += 1;
                let request = match self.prepare().await {
                    Ok(request) => request,
                    Err(_) => continue,
                };
                let controller = Arc::clone(&self);
                in_flight.spawn(async move {
                    // Outcome is already on the status label and in the log.
                    let _ = controller.submit(request).await;
                });
            }

            while let Some(joined) = in_flight.join_next().await {
                if let Err(e) = joined {
                    error!(error = %e, "Analyze task did not finish cleanly");
                }
            }
            info!(clicks = handled, "Click stream closed");
            handled
        })
    }

    /// Handles a single click from start to finish.
    pub async fn on_analyze_click(&self) -> AnalyzeResult<Status> {
        let request = self.prepare().await?;
        self.submit(request).await
    }

    /// Synchronous half of a click: selection check, alert, progress text.
    pub async fn prepare(&self) -> AnalyzeResult<UploadRequest> {
        let Some(file) = self.selector.selected().await else {
            warn!("Analyze clicked with no video selected");
            self.notifier.alert(NO_VIDEO_ALERT);
            return Err(AnalyzeError::UserInputMissing);
        };

        let request = UploadRequest::new(file);
        info!(
            request_id = %request.request_id,
            file_name = %request.file.file_name,
            bytes = request.file.size,
            "Prepared upload request"
        );
        self.show(&Status::Analyzing);
        Ok(request)
    }

    /// Network half of a click: send, then write the outcome.
    pub async fn submit(&self, request: UploadRequest) -> AnalyzeResult<Status> {
        let span = info_span!("analyze", request_id = %request.request_id);
        async move {
            match self.send(request).await {
                Ok(()) => {
                    info!("Video analysis request succeeded");
                    let status = Status::Done;
                    self.show(&status);
                    Ok(status)
                }
                Err(e) => {
                    error!(error = ?e, "Video analysis request failed");
                    self.show(&Status::Failed(e.to_string()));
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn send(&self, request: UploadRequest) -> AnalyzeResult<()> {
        let response = self.transport.analyze(request).await?;
        if !response.is_success() {
            return Err(AnalyzeError::Rejected {
                status: response.status,
            });
        }
        Ok(())
    }

    fn show(&self, status: &Status) {
        self.status.set_text(&status.text());
    }
}
