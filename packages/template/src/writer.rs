//! DOM write strategies
//!
//! The three write targets bindings push values through: text content,
//! a namespaced attribute, or an inline style property. Each exposes a
//! `set`/`remove` pair. Writers are constructed against nodes of the
//! matching kind; a shape mismatch at callback time is logged and
//! skipped rather than unwinding through the notification.

use serde_json::Value;
use tracing::warn;

use weft_dom::NodeRef;

use crate::schema::value_text;

#[derive(Clone)]
pub enum Writer {
    TextContent,
    Attribute {
        namespace: Option<String>,
        name: String,
    },
    StyleProperty {
        name: String,
    },
}

impl Writer {
    pub fn set(&self, node: &NodeRef, value: &Value) {
        let text = value_text(value);
        let outcome = match self {
            Writer::TextContent => node.set_text(&text),
            Writer::Attribute { namespace, name } => {
                node.set_attribute_ns(namespace.as_deref(), name, &text)
            }
            Writer::StyleProperty { name } => node.set_style(name, &text),
        };
        if let Err(error) = outcome {
            warn!(%error, "Skipping write to mismatched node");
        }
    }

    pub fn remove(&self, node: &NodeRef) {
        let outcome = match self {
            Writer::TextContent => node.set_text(""),
            Writer::Attribute { namespace, name } => {
                node.remove_attribute_ns(namespace.as_deref(), name)
            }
            Writer::StyleProperty { name } => node.remove_style(name),
        };
        if let Err(error) = outcome {
            warn!(%error, "Skipping removal on mismatched node");
        }
    }
}
