//! Serializable tree projection
//!
//! Snapshots flatten the shared-handle tree into plain data for
//! assertions, golden files, and tooling. Namespaced attribute keys are
//! rendered as `namespace:name`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
        attributes: HashMap<String, String>,
        styles: HashMap<String, String>,
        children: Vec<NodeSnapshot>,
    },

    Text {
        content: String,
    },
}

impl NodeSnapshot {
    pub fn is_element(&self) -> bool {
        matches!(self, NodeSnapshot::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeSnapshot::Text { .. })
    }
}
