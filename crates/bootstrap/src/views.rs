//! Render selection: a pure function from the state snapshot to one of the
//! four mutually exclusive root views.

use serde_json::Value;
use shared::domain::{AppLifecycle, PendingStatus, RendererConfig, RequestQueueEntry};
use shared::layout::{ComponentNode, ComponentPath};
use store::StoreState;

/// Projection of the in-flight request queue onto the layout: is anything the
/// tree can see still loading, and if so what.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub prop: Option<String>,
    pub component_name: Option<String>,
}

/// Everything the hydrated tree renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeView {
    pub layout: ComponentNode,
    pub path: ComponentPath,
    pub dependencies: Option<Value>,
    pub loading_state: LoadingState,
    pub request_queue: Vec<RequestQueueEntry>,
    pub config: RendererConfig,
    /// Wrap the tree in the global error boundary (config.ui).
    pub wrap_error_boundary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    LayoutError,
    DependenciesError,
    Loading,
    Hydrated(Box<TreeView>),
}

/// Priority-ordered guards, first match wins. Unset request statuses fall
/// through to the loading view; only a set status outside ok/loading is an
/// error.
pub fn select_view(state: &StoreState, error_loading: bool) -> ViewState {
    if state.layout_request.has_failed() {
        return ViewState::LayoutError;
    }
    if error_loading || state.dependencies_request.has_failed() {
        return ViewState::DependenciesError;
    }
    if state.app_lifecycle == Some(AppLifecycle::Hydrated) {
        return ViewState::Hydrated(Box::new(TreeView {
            layout: state.layout.clone(),
            path: Vec::new(),
            dependencies: state.dependencies_request.content.clone(),
            loading_state: loading_state(&state.layout, &state.request_queue),
            request_queue: state.request_queue.clone(),
            config: state.config.clone(),
            wrap_error_boundary: state.config.ui,
        }));
    }
    ViewState::Loading
}

/// First pending queue entry whose target component exists in the layout
/// decides the loading state.
pub fn loading_state(layout: &ComponentNode, request_queue: &[RequestQueueEntry]) -> LoadingState {
    for entry in request_queue {
        if entry.status != PendingStatus::Pending {
            continue;
        }
        if let Some(node) = find_by_id(layout, &entry.handle.component_id) {
            return LoadingState {
                is_loading: true,
                prop: Some(entry.handle.prop.clone()),
                component_name: Some(node.component_type.clone()),
            };
        }
    }
    LoadingState::default()
}

fn find_by_id<'tree>(node: &'tree ComponentNode, id: &str) -> Option<&'tree ComponentNode> {
    if node.id() == Some(id) {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| find_by_id(child, id))
}
