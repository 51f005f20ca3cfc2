use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{
    dependencies::{build_graph, DependencyGraph, DependencySpec},
    domain::{
        AppLifecycle, HttpMethod, RendererConfig, RequestQueueEntry, RequestRecord, RequestSlot,
        RequestStatus, ResourceName,
    },
    error::HydrationError,
    layout::{compute_paths, ComponentNode, ComponentPath, Paths},
};
use tracing::debug;

/// Everything the bootstrap orchestrator reads on one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub app_lifecycle: Option<AppLifecycle>,
    pub layout_request: RequestRecord,
    pub dependencies_request: RequestRecord,
    pub layout: ComponentNode,
    pub graphs: DependencyGraph,
    pub paths: Option<Paths>,
    pub request_queue: Vec<RequestQueueEntry>,
    pub config: RendererConfig,
}

impl StoreState {
    pub fn started(config: RendererConfig) -> Self {
        Self {
            app_lifecycle: Some(AppLifecycle::Started),
            config,
            ..Self::default()
        }
    }

    pub fn record(&self, slot: RequestSlot) -> &RequestRecord {
        match slot {
            RequestSlot::LayoutRequest => &self.layout_request,
            RequestSlot::DependenciesRequest => &self.dependencies_request,
        }
    }

    fn record_mut(&mut self, slot: RequestSlot) -> &mut RequestRecord {
        match slot {
            RequestSlot::LayoutRequest => &mut self.layout_request,
            RequestSlot::DependenciesRequest => &mut self.dependencies_request,
        }
    }
}

/// Actions dispatched at the store. Fetch-progress writes come from the HTTP
/// collaborator; everything else from the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    RequestResource {
        resource: ResourceName,
        method: HttpMethod,
        slot: RequestSlot,
    },
    SetRequestState {
        slot: RequestSlot,
        status: RequestStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Value>,
    },
    SetLayout(ComponentNode),
    ComputePaths {
        sub_tree: ComponentNode,
        starting_path: ComponentPath,
    },
    ComputeGraphs(DependencySpec),
    HydrateInitialOutputs,
}

/// A resource fetch the effects driver still has to run. Queued by the store
/// when a `RequestResource` action lands; the store itself never performs IO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub resource: ResourceName,
    pub method: HttpMethod,
    pub slot: RequestSlot,
}

/// Dispatch handle injected into the orchestrator. Only the hydrate action
/// can fail; the orchestrator wraps that call in its scoped boundary.
pub trait CommandSink {
    fn dispatch(&mut self, action: Action) -> Result<(), HydrationError>;
}

/// Apply one action to the state. `HydrateInitialOutputs` is the only
/// fallible arm; it refuses to run without its prerequisites and refuses to
/// run twice.
pub fn reduce(state: &mut StoreState, action: Action) -> Result<(), HydrationError> {
    match action {
        Action::RequestResource { resource, slot, .. } => {
            debug!(?resource, ?slot, "marking resource request in flight");
            *state.record_mut(slot) = RequestRecord {
                status: Some(RequestStatus::Loading),
                content: None,
            };
        }
        Action::SetRequestState {
            slot,
            status,
            content,
        } => {
            let record = state.record_mut(slot);
            record.status = Some(status);
            if content.is_some() {
                record.content = content;
            }
        }
        Action::SetLayout(tree) => {
            state.layout = tree;
        }
        Action::ComputePaths {
            sub_tree,
            starting_path,
        } => {
            state.paths = Some(compute_paths(&sub_tree, &starting_path));
        }
        Action::ComputeGraphs(spec) => {
            state.graphs = build_graph(&spec);
        }
        Action::HydrateInitialOutputs => {
            if state.app_lifecycle == Some(AppLifecycle::Hydrated) {
                return Err(HydrationError::AlreadyHydrated);
            }
            if state.layout.is_empty() {
                return Err(HydrationError::MissingLayout);
            }
            if state.paths.is_none() {
                return Err(HydrationError::MissingPaths);
            }
            if state.graphs.is_empty() {
                return Err(HydrationError::MissingGraph);
            }
            for output in state.graphs.initial_outputs.clone() {
                state
                    .request_queue
                    .push(RequestQueueEntry::pending(output));
            }
            state.app_lifecycle = Some(AppLifecycle::Hydrated);
            debug!(
                queued = state.request_queue.len(),
                "hydrated initial outputs"
            );
        }
    }
    Ok(())
}

/// The live store: owns the state, applies actions synchronously, and queues
/// resource fetches for whoever drives the HTTP collaborator.
#[derive(Debug, Default)]
pub struct Store {
    pub state: StoreState,
    pending_fetches: Vec<FetchRequest>,
}

impl Store {
    pub fn new(state: StoreState) -> Self {
        Self {
            state,
            pending_fetches: Vec::new(),
        }
    }

    pub fn drain_fetches(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending_fetches)
    }
}

impl CommandSink for Store {
    fn dispatch(&mut self, action: Action) -> Result<(), HydrationError> {
        if let Action::RequestResource {
            resource,
            method,
            slot,
        } = &action
        {
            self.pending_fetches.push(FetchRequest {
                resource: *resource,
                method: *method,
                slot: *slot,
            });
        }
        reduce(&mut self.state, action)
    }
}

/// Test double from the dependency-injection seam: records every dispatched
/// action and fails hydration on demand.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub actions: Vec<Action>,
    pub fail_hydrate: bool,
}

impl RecordingSink {
    pub fn failing_hydrate() -> Self {
        Self {
            actions: Vec::new(),
            fail_hydrate: true,
        }
    }
}

impl CommandSink for RecordingSink {
    fn dispatch(&mut self, action: Action) -> Result<(), HydrationError> {
        let is_hydrate = action == Action::HydrateInitialOutputs;
        self.actions.push(action);
        if is_hydrate && self.fail_hydrate {
            return Err(HydrationError::MissingGraph);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
