//! Persistence normalization: re-applies persisted prop values onto the raw
//! fetched layout before it becomes the canonical tree.

use serde_json::Value;
use shared::layout::ComponentNode;
use shared::protocol::{LayoutResponse, PersistedProp};
use tracing::debug;

/// Decode the layout envelope and fold its persisted overrides into the tree.
pub fn apply_persistence(content: &Value) -> Result<ComponentNode, serde_json::Error> {
    let envelope: LayoutResponse = serde_json::from_value(content.clone())?;
    let LayoutResponse { mut layout, persisted } = envelope;
    for override_ in &persisted {
        if !apply_override(&mut layout, override_) {
            debug!(
                component_id = %override_.component_id,
                prop = %override_.prop,
                "persisted prop targets a component missing from the layout"
            );
        }
    }
    Ok(layout)
}

fn apply_override(node: &mut ComponentNode, override_: &PersistedProp) -> bool {
    if node.id() == Some(override_.component_id.as_str()) {
        node.props
            .insert(override_.prop.clone(), override_.value.clone());
        return true;
    }
    node.children
        .iter_mut()
        .any(|child| apply_override(child, override_))
}
