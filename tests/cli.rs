use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn video_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".mp4")
        .tempfile()
        .expect("Creating temp video failed");
    file.write_all(b"fake video bytes")
        .expect("Writing temp video failed");
    file
}

#[test]
fn analyze_without_video_alerts_and_fails() {
    let mut cmd = Command::cargo_bin("analyze-upload").expect("Binary exists");
    // Nothing listens here; the request must never be attempted anyway.
    cmd.arg("analyze")
        .arg("--base-url")
        .arg("http://127.0.0.1:9")
        .env_remove("ANALYZE_BASE_URL");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Please upload a video first!"))
        .stdout(predicate::str::contains("Analyzing").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_reports_completion_on_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let video = video_file();
    let base_url = server.uri();
    let video_path = video.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("analyze-upload")
            .expect("Binary exists")
            .arg("analyze")
            .arg("--video")
            .arg(&video_path)
            .arg("--base-url")
            .arg(&base_url)
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Analyzing video, please wait...")
                    .and(predicate::str::contains("✅ Analysis complete!")),
            );
    })
    .await
    .expect("CLI run panicked");
}

#[tokio::test(flavor = "multi_thread")]
async fn watch_exits_non_zero_when_the_last_click_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let video = video_file();
    let base_url = server.uri();
    let stdin = format!("{}\n", video.path().display());
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("analyze-upload")
            .expect("Binary exists")
            .arg("watch")
            .arg("--base-url")
            .arg(&base_url)
            .write_stdin(stdin)
            .assert()
            .failure()
            .stdout(predicate::str::contains("❌ Error: Failed to process video"));
    })
    .await
    .expect("CLI run panicked");
}

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use analyze_upload::cli::{run, Cli, Commands, ConnectionArgs};

    // Nothing selected, so this returns before any network activity.
    let cli = Cli {
        command: Commands::Analyze {
            video: None,
            connection: ConnectionArgs::default(),
        },
    };

    let result = run(cli).await;
    assert!(result.is_err(), "No video selected should be an error");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
