use super::*;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<(Option<String>, SaveRequest)>>>>,
}

/// Keeps the first occurrence of each id, like a backend that drops
/// duplicates before storing them.
async fn handle_save(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<SaveRequest>,
) -> Json<SaveResponse> {
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let mut artist_ids: Vec<String> = Vec::new();
    for id in &payload.artist_ids {
        if !artist_ids.contains(id) {
            artist_ids.push(id.clone());
        }
    }
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send((content_type, payload));
    }
    Json(SaveResponse { artist_ids })
}

async fn spawn_router(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_save_server() -> Result<(String, oneshot::Receiver<(Option<String>, SaveRequest)>)>
{
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/save", post(handle_save))
        .with_state(state);
    Ok((spawn_router(app).await?, rx))
}

#[tokio::test]
async fn posts_list_as_json_and_returns_server_version() {
    let (server_url, request_rx) = spawn_save_server().await.expect("spawn server");
    let transport = HttpSaveTransport::new(&server_url).expect("transport");

    let response = transport
        .save(SaveRequest {
            artist_ids: vec!["a".into(), "b".into(), "a".into()],
        })
        .await
        .expect("save");

    assert_eq!(response.artist_ids, vec!["a", "b"]);
    let (content_type, received) = request_rx.await.expect("request");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(received.artist_ids, vec!["a", "b", "a"]);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let app = Router::new().route(
        "/save",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let server_url = spawn_router(app).await.expect("spawn server");
    let transport = HttpSaveTransport::new(&server_url).expect("transport");

    let err = transport
        .save(SaveRequest {
            artist_ids: vec!["a".into()],
        })
        .await
        .expect_err("should fail");
    assert!(matches!(err, ClientError::Status { status: 500 }));
}

#[tokio::test]
async fn error_object_in_ok_body_is_reported_as_rejection() {
    let app = Router::new().route(
        "/save",
        post(|| async {
            Json(serde_json::json!({ "status": 401, "reason": "Username or Password Error" }))
        }),
    );
    let server_url = spawn_router(app).await.expect("spawn server");
    let transport = HttpSaveTransport::new(&server_url).expect("transport");

    let err = transport
        .save(SaveRequest {
            artist_ids: Vec::new(),
        })
        .await
        .expect_err("should fail");
    match err {
        ClientError::Rejected(api_error) => {
            assert_eq!(api_error.status, 401);
            assert_eq!(api_error.reason, "Username or Password Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let app = Router::new().route("/save", post(|| async { "<html>login</html>".into_response() }));
    let server_url = spawn_router(app).await.expect("spawn server");
    let transport = HttpSaveTransport::new(&server_url).expect("transport");

    let err = transport
        .save(SaveRequest {
            artist_ids: Vec::new(),
        })
        .await
        .expect_err("should fail");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let transport = HttpSaveTransport::new(&format!("http://{addr}")).expect("transport");
    let err = transport
        .save(SaveRequest {
            artist_ids: Vec::new(),
        })
        .await
        .expect_err("should fail");
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn missing_transport_always_fails() {
    let err = MissingSaveTransport
        .save(SaveRequest {
            artist_ids: Vec::new(),
        })
        .await
        .expect_err("should fail");
    assert!(matches!(err, ClientError::TransportUnavailable));
}

#[test]
fn save_url_is_joined_under_the_server_path() {
    let root = HttpSaveTransport::new("http://127.0.0.1:8081").expect("root");
    assert_eq!(root.save_url().as_str(), "http://127.0.0.1:8081/save");

    let prefixed = HttpSaveTransport::new("https://example.com/explorer").expect("prefixed");
    assert_eq!(prefixed.save_url().as_str(), "https://example.com/explorer/save");
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = HttpSaveTransport::new("not a url")
        .err()
        .expect("should fail");
    assert!(matches!(err, ClientError::InvalidServerUrl { .. }));
}
