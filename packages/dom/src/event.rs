//! Native node events
//!
//! Events carry a name, the node they were dispatched on, and an
//! arbitrary JSON payload. Dispatch bubbles from the target up through
//! its ancestors; listeners registered for the event name on any node
//! along that chain are invoked synchronously in registration order.

use std::rc::Rc;

use serde_json::Value;

use crate::node::NodeRef;

/// A native node-level event (click, keystroke, ...).
#[derive(Clone)]
pub struct Event {
    pub name: String,
    pub target: NodeRef,
    pub payload: Value,
}

impl Event {
    pub fn new(name: impl Into<String>, target: NodeRef, payload: Value) -> Self {
        Event {
            name: name.into(),
            target,
            payload,
        }
    }
}

/// Callback invoked when a subscribed event reaches a node.
pub type EventCallback = Rc<dyn Fn(&Event)>;

/// Handle identifying one registered listener, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
