use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    routing::post,
    Router,
};
use shared::error::ErrorBody;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CapturedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct AnalyzeServerState {
    status: StatusCode,
    body: String,
    hits: Arc<AtomicUsize>,
    fields: Arc<Mutex<Vec<CapturedField>>>,
}

async fn handle_analyze(
    State(state): State<AnalyzeServerState>,
    mut multipart: Multipart,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.expect("field bytes").to_vec();
        state.fields.lock().await.push(CapturedField {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

async fn spawn_analyze_server(
    status: StatusCode,
    body: &str,
) -> std::io::Result<(String, AnalyzeServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = AnalyzeServerState {
        status,
        body: body.to_string(),
        hits: Arc::new(AtomicUsize::new(0)),
        fields: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/analyze", post(handle_analyze))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn sample_request() -> AnalysisRequest {
    AnalysisRequest::new(
        SelectedFile::new("replay.osr", b"osr-bytes".to_vec()),
        SelectedFile::new("beatmap.osu", b"osu file format v14".to_vec())
            .with_mime_type("text/plain"),
    )
}

const SUCCESS_BODY: &str = r#"{
    "total_presses": 42,
    "avg_press_time": 123.456,
    "min_press_time": 10.0,
    "max_press_time": 200.789,
    "plot": "iVBORw0KGgo=",
    "count_300": 40,
    "count_miss": 2
}"#;

#[tokio::test]
async fn posts_both_files_once_under_documented_keys() {
    let (server_url, state) = spawn_analyze_server(StatusCode::OK, SUCCESS_BODY)
        .await
        .expect("spawn server");
    let client = AnalyzeClient::new(&server_url).expect("client");

    client.analyze(sample_request()).await.expect("analyze");

    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
    let fields = state.fields.lock().await.clone();
    assert_eq!(fields.len(), 2);

    assert_eq!(fields[0].name, "replay_file");
    assert_eq!(fields[0].file_name.as_deref(), Some("replay.osr"));
    assert_eq!(fields[0].bytes, b"osr-bytes");
    assert_eq!(
        fields[0].content_type.as_deref(),
        Some("application/octet-stream")
    );

    assert_eq!(fields[1].name, "beatmap_file");
    assert_eq!(fields[1].bytes, b"osu file format v14");
    assert_eq!(fields[1].content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn decodes_statistics_from_success_response() {
    let (server_url, _state) = spawn_analyze_server(StatusCode::OK, SUCCESS_BODY)
        .await
        .expect("spawn server");
    let client = AnalyzeClient::new(&server_url).expect("client");

    let response = client.analyze(sample_request()).await.expect("analyze");
    let AnalyzeResponse::Success(stats) = response else {
        panic!("expected statistics, got {response:?}");
    };
    assert_eq!(stats.total_presses, 42);
    assert_eq!(stats.plot, "iVBORw0KGgo=");
    assert_eq!(stats.judgements.count_300, Some(40));
    assert_eq!(stats.judgements.count_geki, None);
}

#[tokio::test]
async fn error_field_in_success_status_is_an_application_failure() {
    let (server_url, _state) =
        spawn_analyze_server(StatusCode::OK, r#"{"error":"Invalid beatmap file"}"#)
            .await
            .expect("spawn server");
    let client = AnalyzeClient::new(&server_url).expect("client");

    let response = client.analyze(sample_request()).await.expect("analyze");
    assert_eq!(
        response,
        AnalyzeResponse::Failure(ErrorBody::new("Invalid beatmap file"))
    );
}

#[tokio::test]
async fn non_success_status_is_reported_without_decoding_body() {
    let (server_url, _state) = spawn_analyze_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"should not be surfaced"}"#,
    )
    .await
    .expect("spawn server");
    let client = AnalyzeClient::new(&server_url).expect("client");

    let err = client
        .analyze(sample_request())
        .await
        .expect_err("status error");
    assert!(matches!(err, AnalyzeError::HttpStatus { .. }));
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.is_transport());
}

#[tokio::test]
async fn malformed_json_is_a_transport_failure() {
    let (server_url, _state) = spawn_analyze_server(StatusCode::OK, "<html>oops</html>")
        .await
        .expect("spawn server");
    let client = AnalyzeClient::new(&server_url).expect("client");

    let err = client
        .analyze(sample_request())
        .await
        .expect_err("decode error");
    assert!(matches!(err, AnalyzeError::MalformedResponse(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = AnalyzeClient::new(&format!("http://{addr}")).expect("client");
    let err = client
        .analyze(sample_request())
        .await
        .expect_err("connection error");
    assert!(matches!(err, AnalyzeError::Transport(_)));
}

#[test]
fn endpoint_replaces_path_and_ignores_trailing_slash() {
    assert_eq!(
        analyze_endpoint("http://localhost:8000/").expect("url").as_str(),
        "http://localhost:8000/analyze"
    );
    assert_eq!(
        analyze_endpoint("  https://replays.example.com/app/index.html ")
            .expect("url")
            .as_str(),
        "https://replays.example.com/analyze"
    );
}

#[test]
fn endpoint_requires_absolute_url() {
    let err = analyze_endpoint("/relative/only").expect_err("relative url");
    assert!(matches!(err, AnalyzeError::InvalidServerUrl { .. }));
    assert!(!err.is_transport());
}

#[test]
fn guesses_mime_type_from_extension() {
    assert_eq!(guess_mime_type("plot.png"), "image/png");
    assert_eq!(guess_mime_type("replay.osr"), "application/octet-stream");
}
