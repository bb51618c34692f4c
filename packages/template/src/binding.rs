//! Binding protocol
//!
//! A binding is a live link between a data-source attribute (or a
//! native node event) and a write/read operation on the tree. Bindings
//! are a closed sum over two variants dispatched through a single
//! evaluation function:
//!
//! - **Mirror**: the value is `transform(source[attribute], node)`, or
//!   the raw attribute when no transform is configured. In an event
//!   position the attribute slot instead holds an event name to re-emit
//!   on the source, or a callback invoked with the native event.
//! - **Conditional**: the mirror value collapsed to `false` when falsy,
//!   otherwise the configured "true" literal or a generic truthy marker.
//!
//! Bindings are created once at definition time and become live only
//! when the owning node is rendered or applied. Activation registers
//! every subscription with the binding's listener owner; the owner is
//! the only party that ever tears them down. Fan-out is per-binding:
//! two bindings on the same source attribute subscribe twice.

use std::rc::Rc;

use serde_json::{json, Value};
use tracing::warn;

use weft_dom::{Event, NodeRef};
use weft_reactive::{ListenerOwner, Observable};

use crate::schema::{self, is_falsy, SchemaEntry};
use crate::writer::Writer;

/// Value transform applied between the source attribute and the tree.
pub type Transform = Rc<dyn Fn(&Value, Option<&NodeRef>) -> Value>;

/// Callback configured for event bindings.
pub type EventHandler = Rc<dyn Fn(&Event)>;

#[derive(Clone)]
pub(crate) enum BindingTarget {
    /// A named source attribute (or, in an event position, the name of
    /// the source event to re-emit).
    Attribute(String),
    /// A source event name to re-emit on qualifying native events.
    Event(String),
    /// A callback invoked with the native event.
    Callback(EventHandler),
}

#[derive(Clone)]
pub(crate) enum BindingKind {
    Mirror,
    Conditional { true_value: Option<Value> },
}

#[derive(Clone)]
pub struct Binding {
    source: Rc<Observable>,
    owner: Rc<ListenerOwner>,
    target: BindingTarget,
    transform: Option<Transform>,
    kind: BindingKind,
}

impl Binding {
    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, BindingKind::Conditional { .. })
    }

    /// Name of the observed source attribute, if this binding observes one.
    pub fn bound_attribute(&self) -> Option<&str> {
        match &self.target {
            BindingTarget::Attribute(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Evaluate the binding's current value against `node`.
    pub fn value_for(&self, node: Option<&NodeRef>) -> Value {
        let raw = match &self.target {
            BindingTarget::Attribute(name) => self.source.get(name),
            _ => Value::Null,
        };
        let mirrored = match &self.transform {
            Some(transform) => transform(&raw, node),
            None => raw,
        };
        match &self.kind {
            BindingKind::Mirror => mirrored,
            BindingKind::Conditional { true_value } => {
                if is_falsy(&mirrored) {
                    Value::Bool(false)
                } else {
                    true_value.clone().unwrap_or(Value::Bool(true))
                }
            }
        }
    }

    /// Subscribe to the bound attribute's change notification. Every
    /// notification recomputes the full schema aggregate and pushes it
    /// through `writer`. Subscribed regardless of the value's current
    /// falsiness.
    pub(crate) fn activate_attribute_listener(
        &self,
        entries: &[SchemaEntry],
        node: &NodeRef,
        writer: &Writer,
    ) {
        let Some(attribute) = self.bound_attribute() else {
            warn!("Event binding used in a value position; skipping subscription");
            return;
        };
        let entries = entries.to_vec();
        let node = node.clone();
        let writer = writer.clone();
        self.owner.observe_attribute(&self.source, attribute, move |_| {
            schema::apply_schema(&entries, &node, &writer);
        });
    }

    /// Subscribe to a native node event and relay qualifying events:
    /// invoke the configured callback, or re-emit a named event on the
    /// source carrying the native event as payload. Mirror-only.
    pub(crate) fn activate_dom_event_listener(
        &self,
        node: &NodeRef,
        event: &str,
        selector: Option<&str>,
    ) {
        if self.is_conditional() {
            warn!(event, "Conditional binding used in a listener position; skipping");
            return;
        }
        let target = self.target.clone();
        let source = self.source.clone();
        let selector = selector.map(String::from);
        self.owner.listen(node, event, move |native: &Event| {
            if let Some(selector) = &selector {
                if !native.target.matches(selector) {
                    return;
                }
            }
            match &target {
                BindingTarget::Callback(callback) => callback(native),
                BindingTarget::Event(name) | BindingTarget::Attribute(name) => {
                    let payload = json!({
                        "event": native.name,
                        "target": native.target.to_json(),
                        "payload": native.payload,
                    });
                    source.emit(name, &payload);
                }
            }
        });
    }
}

/// Binding factory scoped to one (data source, listener owner) pair.
///
/// Pure: carries no state beyond the two references it closes over.
pub struct Bind {
    source: Rc<Observable>,
    owner: Rc<ListenerOwner>,
}

pub fn bind(source: &Rc<Observable>, owner: &Rc<ListenerOwner>) -> Bind {
    Bind {
        source: source.clone(),
        owner: owner.clone(),
    }
}

impl Bind {
    fn binding(&self, target: BindingTarget, transform: Option<Transform>, kind: BindingKind) -> Binding {
        Binding {
            source: self.source.clone(),
            owner: self.owner.clone(),
            target,
            transform,
            kind,
        }
    }

    /// Mirror a source attribute.
    pub fn to(&self, attribute: &str) -> Binding {
        self.binding(
            BindingTarget::Attribute(attribute.to_string()),
            None,
            BindingKind::Mirror,
        )
    }

    /// Mirror a source attribute through a transform.
    pub fn to_with(
        &self,
        attribute: &str,
        transform: impl Fn(&Value, Option<&NodeRef>) -> Value + 'static,
    ) -> Binding {
        self.binding(
            BindingTarget::Attribute(attribute.to_string()),
            Some(Rc::new(transform)),
            BindingKind::Mirror,
        )
    }

    /// Relay qualifying native events as a named source event.
    pub fn event(&self, event: &str) -> Binding {
        self.binding(
            BindingTarget::Event(event.to_string()),
            None,
            BindingKind::Mirror,
        )
    }

    /// Invoke a callback with qualifying native events.
    pub fn callback(&self, callback: impl Fn(&Event) + 'static) -> Binding {
        self.binding(
            BindingTarget::Callback(Rc::new(callback)),
            None,
            BindingKind::Mirror,
        )
    }

    /// Presence/absence of the generic truthy marker, driven by an
    /// attribute's truthiness.
    pub fn when(&self, attribute: &str) -> Binding {
        self.binding(
            BindingTarget::Attribute(attribute.to_string()),
            None,
            BindingKind::Conditional { true_value: None },
        )
    }

    /// Presence of a fixed literal, driven by an attribute's truthiness.
    pub fn when_value(&self, attribute: &str, true_value: impl Into<Value>) -> Binding {
        self.binding(
            BindingTarget::Attribute(attribute.to_string()),
            None,
            BindingKind::Conditional {
                true_value: Some(true_value.into()),
            },
        )
    }

    /// Conditional with both a transform and an optional "true" literal.
    pub fn when_with(
        &self,
        attribute: &str,
        true_value: Option<Value>,
        transform: impl Fn(&Value, Option<&NodeRef>) -> Value + 'static,
    ) -> Binding {
        self.binding(
            BindingTarget::Attribute(attribute.to_string()),
            Some(Rc::new(transform)),
            BindingKind::Conditional { true_value },
        )
    }
}
