use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::dependencies::PropHandle;

/// Coarse bootstrap stage of the application. The implicit pre-start state is
/// represented by both request records still being empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppLifecycle {
    Started,
    Hydrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Http(u16),
    Transport,
    Decode,
}

/// Progress of one async fetch. An unset status lives on the record as
/// `None`, which is neither OK nor an error; collapsing this into the enum
/// would break the render guards (see `RequestRecord::has_failed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Loading,
    Ok,
    Error(ErrorKind),
}

impl RequestStatus {
    pub fn is_ok_or_loading(self) -> bool {
        matches!(self, RequestStatus::Ok | RequestStatus::Loading)
    }
}

/// Status + payload pair tracking one async fetch's progress. Created empty,
/// mutated only by the fetch collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl RequestRecord {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.content.is_none()
    }

    pub fn is_ok(&self) -> bool {
        self.status == Some(RequestStatus::Ok)
    }

    /// Three-way guard: unset status never counts as a failure, ok/loading
    /// never count as a failure, anything else does.
    pub fn has_failed(&self) -> bool {
        matches!(self.status, Some(status) if !status.is_ok_or_loading())
    }
}

/// Which request slot a fetched resource lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestSlot {
    LayoutRequest,
    DependenciesRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceName {
    Layout,
    Dependencies,
}

impl ResourceName {
    /// Route suffix on the dashboard server, appended to the pathname prefix.
    pub fn route(self) -> &'static str {
        match self {
            ResourceName::Layout => "_dash-layout",
            ResourceName::Dependencies => "_dash-dependencies",
        }
    }

    pub fn slot(self) -> RequestSlot {
        match self {
            ResourceName::Layout => RequestSlot::LayoutRequest,
            ResourceName::Dependencies => RequestSlot::DependenciesRequest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingStatus {
    Pending,
    Resolved,
    Rejected,
}

/// One in-flight callback request observed by the loading-state projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestQueueEntry {
    pub uid: Uuid,
    pub handle: PropHandle,
    pub status: PendingStatus,
}

impl RequestQueueEntry {
    pub fn pending(handle: PropHandle) -> Self {
        Self {
            uid: Uuid::new_v4(),
            handle,
            status: PendingStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Wrap the hydrated tree in the global error boundary when true.
    pub ui: bool,
    pub requests_pathname_prefix: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            ui: false,
            requests_pathname_prefix: "/".to_string(),
        }
    }
}
