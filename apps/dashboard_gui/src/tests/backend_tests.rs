use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use client::testing::until;
use serde_json::json;
use shared::domain::{AppLifecycle, RendererConfig, RequestStatus};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Counters {
    layout: Arc<AtomicUsize>,
    dependencies: Arc<AtomicUsize>,
}

async fn serve_layout(State(counters): State<Counters>) -> impl IntoResponse {
    counters.layout.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "layout": {
            "component_type": "Div",
            "props": {"id": "root"},
            "children": [
                {"component_type": "Dropdown", "props": {"id": "dropdown", "value": "a"}},
                {"component_type": "Graph", "props": {"id": "graph"}},
            ],
        },
    }))
}

async fn serve_dependencies(State(counters): State<Counters>) -> impl IntoResponse {
    counters.dependencies.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        {
            "output": {"component_id": "graph", "prop": "figure"},
            "inputs": [{"component_id": "dropdown", "prop": "value"}],
        },
    ]))
}

async fn spawn_page_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_settles_hydrated_and_fetches_each_resource_once() {
    let counters = Counters::default();
    let app = Router::new()
        .route("/_dash-layout", get(serve_layout))
        .route("/_dash-dependencies", get(serve_dependencies))
        .with_state(counters.clone());
    let server_url = spawn_page_server(app).await;

    let client = client::ApiClient::new(&server_url, "/").expect("client");
    let latest: Arc<Mutex<Option<ViewSnapshot>>> = Arc::new(Mutex::new(None));
    let sink = latest.clone();

    let handle = tokio::spawn(bootstrap_loop(
        client,
        StoreState::started(RendererConfig::default()),
        move |snapshot| {
            *sink.lock().expect("snapshot lock") = Some(snapshot);
        },
    ));

    until(
        || {
            latest
                .lock()
                .expect("snapshot lock")
                .as_ref()
                .is_some_and(|s| s.state.app_lifecycle == Some(AppLifecycle::Hydrated))
        },
        Duration::from_secs(5),
        Duration::from_millis(10),
    )
    .await
    .expect("bootstrap hydrates");

    let final_snapshot = handle.await.expect("loop finishes");
    assert!(!final_snapshot.error_loading);
    assert_eq!(counters.layout.load(Ordering::SeqCst), 1);
    assert_eq!(counters.dependencies.load(Ordering::SeqCst), 1);
    assert_eq!(final_snapshot.state.request_queue.len(), 1);
    // Paths and graph were both computed before hydration.
    assert!(final_snapshot.state.paths.is_some());
    assert!(!final_snapshot.state.graphs.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn layout_failure_leaves_the_bootstrap_unhydrated() {
    let counters = Counters::default();
    let app = Router::new()
        .route(
            "/_dash-layout",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        )
        .route("/_dash-dependencies", get(serve_dependencies))
        .with_state(counters);
    let server_url = spawn_page_server(app).await;

    let client = client::ApiClient::new(&server_url, "/").expect("client");
    let final_snapshot = bootstrap_loop(
        client,
        StoreState::started(RendererConfig::default()),
        |_| {},
    )
    .await;

    assert_eq!(
        final_snapshot.state.app_lifecycle,
        Some(AppLifecycle::Started)
    );
    assert!(final_snapshot.state.layout_request.has_failed());
    // Dependencies completed independently of the failed layout fetch.
    assert_eq!(
        final_snapshot.state.dependencies_request.status,
        Some(RequestStatus::Ok)
    );
    assert!(final_snapshot.state.request_queue.is_empty());
}
