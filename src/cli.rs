//! Command-line front end for analyze-upload.
//!
//! The terminal plays the part of the page: a file path stands in for the
//! file picker, stdout is the status label and stderr carries alerts.
//!
//! - `analyze --video <PATH>` presses the analyze button once.
//! - `watch` presses it once per line read from stdin, with that line's path
//!   selected. Clicks are not serialised, so the last request to settle decides
//!   the final status, exactly as on the page.
//!
//! Call [`run`] with a constructed [`Cli`] for programmatic or test use.
use crate::config::Config;
use crate::console::{ConsoleNotifier, ConsoleSelector, ConsoleStatus};
use crate::controller::{Click, UploadController};
use crate::load_config::load_config;
use crate::status::DONE_MESSAGE;
use crate::upload::AnalyzeClient;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// CLI for analyze-upload: send a video to the analysis endpoint.
#[derive(Parser)]
#[clap(
    name = "analyze-upload",
    version,
    about = "Upload a video to an analysis endpoint and report the outcome"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload one video and wait for the outcome
    Analyze {
        /// Video file to upload; leaving it out is the same as selecting nothing
        #[clap(long)]
        video: Option<PathBuf>,
        #[clap(flatten)]
        connection: ConnectionArgs,
    },
    /// Treat every stdin line as a click with that path selected (empty line = nothing selected)
    Watch {
        #[clap(flatten)]
        connection: ConnectionArgs,
    },
}

#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// Path to the YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Base URL of the analysis server, overriding config and environment
    #[clap(long)]
    pub base_url: Option<String>,
}

impl ConnectionArgs {
    pub fn resolve(&self) -> Result<Config> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            tracing::info!(base_url = %base_url, "Base URL overridden from command line");
            config.server.base_url = base_url.clone();
        }
        Ok(config)
    }
}

struct Page {
    selector: Arc<ConsoleSelector>,
    status: Arc<ConsoleStatus>,
    controller: Arc<UploadController>,
}

impl Page {
    fn new(config: &Config) -> Result<Self> {
        let client = AnalyzeClient::new(config).context("Failed to build HTTP client")?;
        let selector = Arc::new(ConsoleSelector::new());
        let status = Arc::new(ConsoleStatus::new());
        let controller = Arc::new(UploadController::new(
            selector.clone(),
            status.clone(),
            Arc::new(ConsoleNotifier),
            Arc::new(client),
        ));
        Ok(Page {
            selector,
            status,
            controller,
        })
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Analyze { video, connection } => {
            let config = connection.resolve()?;
            tracing::info!(command = "analyze", video = ?video, "Starting analysis");
            let page = Page::new(&config)?;
            page.selector.pick(video);
            match page.controller.on_analyze_click().await {
                Ok(status) => {
                    tracing::info!(command = "analyze", %status, "Analysis complete");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "analyze", error = %e, "Analysis failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::Watch { connection } => {
            let config = connection.resolve()?;
            tracing::info!(command = "watch", "Waiting for clicks on stdin");
            let page = Page::new(&config)?;
            let (tx, rx) = mpsc::channel(16);
            let dispatcher = page.controller.clone().on_ready(rx);

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                let line = line.trim();
                page.selector
                    .pick((!line.is_empty()).then(|| PathBuf::from(line)));
                if tx.send(Click).await.is_err() {
                    break;
                }
            }
            drop(tx);

            let clicks = dispatcher.await.context("Click dispatcher panicked")?;
            let last = page.status.text();
            tracing::info!(command = "watch", clicks, status = %last, "Input closed");
            if last == DONE_MESSAGE {
                Ok(())
            } else {
                anyhow::bail!("last analysis did not complete: {last:?}")
            }
        }
    }
}
