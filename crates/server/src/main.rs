use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use shared::error::{ApiError, ErrorCode};
use tracing::info;

mod config;
mod page;
mod resources;

use config::{load_settings, normalize_pathname_prefix};
use page::{demo_page, load_page, PageSpec};
use resources::{RawResource, ResourceRegistry};

struct AppState {
    page: PageSpec,
    index_html: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let page = match &settings.page_path {
        Some(path) => load_page(path)?,
        None => demo_page(),
    };

    let mut registry = default_registry();
    registry.set_serve_scripts_locally(settings.serve_scripts_locally);
    registry.set_serve_css_locally(settings.serve_css_locally);

    let prefix = normalize_pathname_prefix(&settings.requests_pathname_prefix);
    let state = AppState {
        index_html: render_index(&registry, &prefix),
        page,
    };
    let app = build_router(Arc::new(state), &prefix);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, %prefix, "dashboard server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, prefix: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route(&format!("{prefix}/_dash-layout"), get(get_layout))
        .route(&format!("{prefix}/_dash-dependencies"), get(get_dependencies))
        .fallback(not_found)
        .with_state(state)
}

fn default_registry() -> ResourceRegistry {
    ResourceRegistry::new(
        &[],
        &[RawResource::Url(
            "https://codepen.io/chriddyp/pen/bWLwgP.css".to_string(),
        )],
    )
}

fn render_index(registry: &ResourceRegistry, prefix: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{links}\n</head>\n\
         <body>\n<div id=\"dashboard-root\" data-requests-pathname-prefix=\"{prefix}/\">\
         Loading...</div>\n{scripts}\n</body>\n</html>\n",
        links = registry.generate_links(),
        scripts = registry.generate_scripts(),
    )
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index_html.clone())
}

async fn get_layout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.page.layout.clone())
}

async fn get_dependencies(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.page.dependencies.clone())
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "no such resource")),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
