//! End-to-end polling tests against a mock weather service and a real
//! report file in a temporary directory.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use weatherlog_core::{ApiConfig, FileSink, Poller, SaverConfig, WeatherClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_service() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/authorize"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-e2e"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cities"))
        .and(header("Authorization", "Bearer tok-e2e"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!(["Vilnius", "Kaunas"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/weathers/Vilnius"))
        .and(header("Authorization", "Bearer tok-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "Vilnius",
            "summary": "Cool",
            "precipitation": 84,
            "windSpeed": 6,
            "temperature": 0
        })))
        .mount(&server)
        .await;

    server
}

fn saver_config(dir: &tempfile::TempDir) -> SaverConfig {
    SaverConfig {
        working_directory: dir.path().display().to_string(),
        filename: "weatherReports.txt".to_string(),
    }
}

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn zero_valid_cities_terminates_without_writing_reports() {
    let server = mock_service().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let client = WeatherClient::new(api_config(&server));
    let sink = FileSink::create(&saver_config(&dir)).await.expect("sink");
    let report_path = sink.path().to_path_buf();

    let poller = Poller::new(
        client,
        sink,
        Duration::from_millis(10),
        CancellationToken::new(),
    );

    poller
        .run(&["africa".to_string(), "asia".to_string()])
        .await
        .expect("run must terminate cleanly");

    let contents = std::fs::read_to_string(&report_path).expect("report file must exist");
    assert!(contents.is_empty(), "no report may be written: {contents:?}");
}

#[tokio::test]
async fn reports_are_appended_until_cancelled() {
    let server = mock_service().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let client = WeatherClient::new(api_config(&server));
    let sink = FileSink::create(&saver_config(&dir)).await.expect("sink");
    let report_path = sink.path().to_path_buf();

    let cancel = CancellationToken::new();
    let poller = Poller::new(client, sink, Duration::from_millis(10), cancel.clone());

    let handle = tokio::spawn(async move {
        // "africa" is partitioned out at startup, Vilnius is polled.
        poller
            .run(&["Vilnius".to_string(), "africa".to_string()])
            .await
    });

    // Wait until at least one cycle has persisted a report.
    let mut written = String::new();
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        written = std::fs::read_to_string(&report_path).unwrap_or_default();
        if written.contains("--- Weather in Vilnius:") {
            break;
        }
    }

    cancel.cancel();
    handle
        .await
        .expect("poller task must not panic")
        .expect("run must terminate cleanly");

    assert!(written.contains("--- Weather in Vilnius:"));
    assert!(written.contains(
        "Temperature: 0°C\tPrecipitation: 84mm\tWind Speed: 6m/s\tIn summary - Cool"
    ));
}
