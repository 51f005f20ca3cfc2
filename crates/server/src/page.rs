use std::fs;

use anyhow::Context;
use serde::Deserialize;
use serde_json::json;
use shared::protocol::{DependenciesResponse, LayoutResponse};

/// Everything one dashboard page serves: the layout envelope and the
/// callback dependency spec.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSpec {
    pub layout: LayoutResponse,
    #[serde(default)]
    pub dependencies: DependenciesResponse,
}

pub fn load_page(path: &str) -> anyhow::Result<PageSpec> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read page spec '{path}'"))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse page spec '{path}'"))
}

/// Built-in demo page: a dropdown driving a graph, with one persisted prop.
pub fn demo_page() -> PageSpec {
    serde_json::from_value(json!({
        "layout": {
            "layout": {
                "component_type": "Div",
                "props": {"id": "root"},
                "children": [
                    {
                        "component_type": "Dropdown",
                        "props": {"id": "dropdown", "value": "linear"},
                    },
                    {
                        "component_type": "Graph",
                        "props": {"id": "graph"},
                    },
                ],
            },
            "persisted": [
                {"component_id": "dropdown", "prop": "value", "value": "log"},
            ],
        },
        "dependencies": [
            {
                "output": {"component_id": "graph", "prop": "figure"},
                "inputs": [{"component_id": "dropdown", "prop": "value"}],
            },
        ],
    }))
    .expect("demo page spec is well-formed")
}
