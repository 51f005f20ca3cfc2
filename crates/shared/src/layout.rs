use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Index path from the layout root down to a component: each element is the
/// child index taken at that depth.
pub type ComponentPath = Vec<usize>;

/// One node of the opaque component tree. Props are carried as raw JSON so
/// component suites can ship whatever shape they like; only `id` is
/// interpreted by the renderer itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn id(&self) -> Option<&str> {
        self.props.get("id").and_then(Value::as_str)
    }

    /// The renderer treats a default node as "no layout committed yet".
    pub fn is_empty(&self) -> bool {
        self.component_type.is_empty() && self.props.is_empty() && self.children.is_empty()
    }

    pub fn get(&self, path: &[usize]) -> Option<&ComponentNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }
}

/// Component-id index over the tree, absent until computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paths {
    pub by_id: HashMap<String, ComponentPath>,
}

/// Walk `sub_tree` and record the path of every component carrying an id,
/// offsetting everything by `starting_path`.
pub fn compute_paths(sub_tree: &ComponentNode, starting_path: &[usize]) -> Paths {
    let mut paths = Paths::default();
    visit(sub_tree, starting_path.to_vec(), &mut paths);
    paths
}

fn visit(node: &ComponentNode, path: ComponentPath, paths: &mut Paths) {
    if let Some(id) = node.id() {
        paths.by_id.insert(id.to_string(), path.clone());
    }
    for (index, child) in node.children.iter().enumerate() {
        let mut child_path = path.clone();
        child_path.push(index);
        visit(child, child_path, paths);
    }
}
