use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A `component_id.prop` handle, the unit the callback graph is wired with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropHandle {
    pub component_id: String,
    pub prop: String,
}

impl PropHandle {
    pub fn new(component_id: impl Into<String>, prop: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            prop: prop.into(),
        }
    }
}

impl std::fmt::Display for PropHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.component_id, self.prop)
    }
}

/// One callback declaration as served by the dependencies endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackSpec {
    pub output: PropHandle,
    pub inputs: Vec<PropHandle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<PropHandle>,
}

pub type DependencySpec = Vec<CallbackSpec>;

/// Derived structure: which outputs each input can fire, plus the outputs to
/// request once at hydration time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub outputs_by_input: HashMap<PropHandle, Vec<PropHandle>>,
    pub initial_outputs: Vec<PropHandle>,
}

impl DependencyGraph {
    pub fn is_empty(&self) -> bool {
        self.outputs_by_input.is_empty() && self.initial_outputs.is_empty()
    }
}

/// Fold the wire-form dependency spec into the lookup graph. Every declared
/// output is an initial output; hydration fires each exactly once.
pub fn build_graph(spec: &DependencySpec) -> DependencyGraph {
    let mut graph = DependencyGraph::default();
    for callback in spec {
        for input in &callback.inputs {
            graph
                .outputs_by_input
                .entry(input.clone())
                .or_default()
                .push(callback.output.clone());
        }
        graph.initial_outputs.push(callback.output.clone());
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> DependencySpec {
        vec![
            CallbackSpec {
                output: PropHandle::new("graph", "figure"),
                inputs: vec![PropHandle::new("dropdown", "value")],
                state: Vec::new(),
            },
            CallbackSpec {
                output: PropHandle::new("table", "data"),
                inputs: vec![
                    PropHandle::new("dropdown", "value"),
                    PropHandle::new("slider", "value"),
                ],
                state: vec![PropHandle::new("store", "data")],
            },
        ]
    }

    #[test]
    fn empty_spec_builds_empty_graph() {
        assert!(build_graph(&Vec::new()).is_empty());
    }

    #[test]
    fn shared_input_fires_both_outputs() {
        let graph = build_graph(&spec());
        let fired = &graph.outputs_by_input[&PropHandle::new("dropdown", "value")];
        assert_eq!(
            fired,
            &vec![
                PropHandle::new("graph", "figure"),
                PropHandle::new("table", "data"),
            ]
        );
    }

    #[test]
    fn every_output_is_hydrated_once() {
        let graph = build_graph(&spec());
        assert_eq!(
            graph.initial_outputs,
            vec![
                PropHandle::new("graph", "figure"),
                PropHandle::new("table", "data"),
            ]
        );
    }
}
