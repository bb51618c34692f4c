//! Canonical templates
//!
//! A `Template` is the normalized form of a definition: exactly one of
//! `tag`/`text` when rendered, attribute schemas in uniform array form,
//! children resolved once into a closed variant set, and listeners
//! keyed by `"event"` / `"event@selector"`.
//!
//! Templates compose an event-emitter capability (an owned [`Emitter`]
//! plus forwarding methods); the definition key `on` is reserved for
//! that API surface, which is why normalization relocates listener
//! entries to `event_listeners`.

use std::rc::Rc;

use serde_json::Value;

use weft_dom::NodeRef;
use weft_reactive::{Emitter, SubId};

use crate::definition::{Definition, ListenerEntry};
use crate::normalize;
use crate::schema::SchemaEntry;

/// An externally-owned entity with its own live node, usable as an
/// opaque child.
pub trait VisualComponent {
    fn node(&self) -> NodeRef;
}

/// An externally-owned ordered collection of visual components.
pub trait VisualComponentCollection {
    fn nodes(&self) -> Vec<NodeRef>;
    /// Told its new parent element when rendered into a tree.
    fn set_parent(&self, parent: &NodeRef);
}

/// One child slot, resolved once at normalization time.
pub enum Child {
    Template(Template),
    Component(Rc<dyn VisualComponent>),
    Collection(Rc<dyn VisualComponentCollection>),
}

/// Canonical attribute value: a schema with an optional namespace, or
/// the nested per-property mapping recognized for `style`.
pub enum AttrSchema {
    Schema {
        namespace: Option<String>,
        entries: Vec<SchemaEntry>,
    },
    StyleMap(Vec<(String, Vec<SchemaEntry>)>),
}

pub struct Template {
    pub(crate) tag: Option<String>,
    pub(crate) namespace: Option<String>,
    pub(crate) text: Option<Vec<SchemaEntry>>,
    pub(crate) attributes: Vec<(String, AttrSchema)>,
    pub(crate) children: Vec<Child>,
    pub(crate) event_listeners: Vec<(String, Vec<ListenerEntry>)>,
    pub(crate) emitter: Emitter,
}

impl Template {
    /// Normalize a definition into its canonical template.
    pub fn new(definition: Definition) -> Self {
        normalize::normalize(definition)
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn attribute_schema(&self, name: &str) -> Option<&AttrSchema> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, schema)| schema)
    }

    pub fn listener_entries(&self, key: &str) -> Option<&[ListenerEntry]> {
        self.event_listeners
            .iter()
            .find(|(listener_key, _)| listener_key == key)
            .map(|(_, entries)| entries.as_slice())
    }

    // -- emitter capability (composed, forwarded) ---------------------------

    /// Subscribe to this template's own lifecycle events (`rendered`,
    /// `applied`, `extended`).
    pub fn on(&self, event: &str, callback: impl Fn(&Value) + 'static) -> SubId {
        self.emitter.subscribe(event, callback)
    }

    pub fn off(&self, event: &str, id: SubId) -> bool {
        self.emitter.unsubscribe(event, id)
    }

    pub fn emit(&self, event: &str, payload: &Value) {
        self.emitter.emit(event, payload)
    }
}
