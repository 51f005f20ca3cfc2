use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dependencies::CallbackSpec;
use crate::layout::ComponentNode;

/// A prop value persisted across sessions, re-applied onto the raw layout
/// before it becomes canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedProp {
    pub component_id: String,
    pub prop: String,
    pub value: Value,
}

/// Envelope served by the layout endpoint: the raw tree plus any persisted
/// prop overrides to normalize into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub layout: ComponentNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persisted: Vec<PersistedProp>,
}

/// Body served by the dependencies endpoint.
pub type DependenciesResponse = Vec<CallbackSpec>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layout_envelope_roundtrips_without_persisted_block() {
        let raw = json!({
            "layout": {"component_type": "Div", "props": {"id": "root"}},
        });
        let envelope: LayoutResponse = serde_json::from_value(raw).expect("envelope");
        assert!(envelope.persisted.is_empty());
        assert_eq!(envelope.layout.id(), Some("root"));
    }
}
