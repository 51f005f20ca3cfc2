//! HTTP fetch collaborator: turns queued `FetchRequest`s into terminal
//! `SetRequestState` transitions. The loading transition is written by the
//! store when the request is dispatched; this client only reports the
//! outcome. No retries, no cancellation.

use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::{ErrorKind, HttpMethod, RequestStatus, ResourceName},
    protocol::{DependenciesResponse, LayoutResponse},
};
use store::{Action, FetchRequest};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod testing;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server answered with status {0}")]
    Http(u16),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response body failed to decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Http(status) => ErrorKind::Http(*status),
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Thin reqwest wrapper bound to one dashboard server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    pathname_prefix: String,
}

impl ApiClient {
    pub fn new(base_url: &str, pathname_prefix: &str) -> Result<Self, url::ParseError> {
        let mut pathname_prefix = pathname_prefix.trim_end_matches('/').to_string();
        if !pathname_prefix.is_empty() && !pathname_prefix.starts_with('/') {
            pathname_prefix.insert(0, '/');
        }
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
            pathname_prefix,
        })
    }

    fn resource_url(&self, resource: ResourceName) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{}/{}", self.pathname_prefix, resource.route())
    }

    /// Run one queued fetch to completion and emit the terminal action for
    /// its slot. Failures become status writes, never errors; the render
    /// guards own the presentation.
    pub async fn execute(&self, request: FetchRequest) -> Action {
        match self.fetch(request).await {
            Ok(content) => {
                debug!(resource = ?request.resource, "resource fetch succeeded");
                Action::SetRequestState {
                    slot: request.slot,
                    status: RequestStatus::Ok,
                    content: Some(content),
                }
            }
            Err(error) => {
                warn!(resource = ?request.resource, %error, "resource fetch failed");
                Action::SetRequestState {
                    slot: request.slot,
                    status: RequestStatus::Error(error.kind()),
                    content: None,
                }
            }
        }
    }

    async fn fetch(&self, request: FetchRequest) -> Result<Value, FetchError> {
        let url = self.resource_url(request.resource);
        let builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        };
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }
        let content: Value = response.json().await?;
        validate(request.resource, &content)?;
        Ok(content)
    }
}

/// Decode-check the body against the resource's wire shape before the raw
/// value is stored; downstream normalization then cannot fail on shape.
fn validate(resource: ResourceName, content: &Value) -> Result<(), FetchError> {
    match resource {
        ResourceName::Layout => {
            serde_json::from_value::<LayoutResponse>(content.clone())?;
        }
        ResourceName::Dependencies => {
            serde_json::from_value::<DependenciesResponse>(content.clone())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
