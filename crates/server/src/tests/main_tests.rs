use super::*;
use axum::{body, body::Body, http::Request};
use shared::protocol::{DependenciesResponse, LayoutResponse};
use tower::ServiceExt;

fn test_app(prefix: &str) -> Router {
    let registry = default_registry();
    let state = AppState {
        index_html: render_index(&registry, prefix),
        page: demo_page(),
    };
    build_router(Arc::new(state), prefix)
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let response = test_app("").oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn layout_route_serves_the_page_envelope() {
    let request = Request::get("/_dash-layout")
        .body(Body::empty())
        .expect("request");
    let response = test_app("").oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let envelope: LayoutResponse = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(envelope.layout.id(), Some("root"));
    assert_eq!(envelope.persisted.len(), 1);
}

#[tokio::test]
async fn dependencies_route_serves_the_callback_spec() {
    let request = Request::get("/_dash-dependencies")
        .body(Body::empty())
        .expect("request");
    let response = test_app("").oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let spec: DependenciesResponse = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(spec.len(), 1);
    assert_eq!(spec[0].output.component_id, "graph");
}

#[tokio::test]
async fn pathname_prefix_moves_the_resource_routes() {
    let app = test_app("/app");

    let prefixed = Request::get("/app/_dash-layout")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(prefixed).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bare = Request::get("/_dash-layout")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(bare).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_routes_return_a_wire_error_body() {
    let request = Request::get("/_dash-nope")
        .body(Body::empty())
        .expect("request");
    let response = test_app("").oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let error: ApiError = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn index_page_carries_links_and_the_root_mount() {
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = test_app("").oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(html.contains("<link rel=\"stylesheet\""));
    assert!(html.contains("id=\"dashboard-root\""));
}
