//! Listener ownership and teardown
//!
//! Every subscription a view attaches — attribute-change notifications,
//! source events, native node events — is recorded against one owner.
//! The owner is the only party that ever detaches them; `teardown`
//! releases everything at once. Dropping an owner without teardown
//! leaks its subscriptions by design of the hosting contract.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use weft_dom::{Event, ListenerId, NodeRef};

use crate::emitter::SubId;
use crate::observable::Observable;

enum Registration {
    AttributeChange {
        source: Rc<Observable>,
        attribute: String,
        id: SubId,
    },
    SourceEvent {
        source: Rc<Observable>,
        event: String,
        id: SubId,
    },
    NodeEvent {
        node: NodeRef,
        event: String,
        id: ListenerId,
    },
}

#[derive(Default)]
pub struct ListenerOwner {
    registrations: RefCell<Vec<Registration>>,
}

impl ListenerOwner {
    pub fn new() -> Rc<Self> {
        Rc::new(ListenerOwner::default())
    }

    /// Subscribe to an attribute-change notification, scoped to this owner.
    pub fn observe_attribute(
        &self,
        source: &Rc<Observable>,
        attribute: &str,
        callback: impl Fn(&Value) + 'static,
    ) {
        let id = source.subscribe_attribute(attribute, callback);
        self.registrations
            .borrow_mut()
            .push(Registration::AttributeChange {
                source: source.clone(),
                attribute: attribute.to_string(),
                id,
            });
    }

    /// Subscribe to a named source event, scoped to this owner.
    pub fn observe_event(
        &self,
        source: &Rc<Observable>,
        event: &str,
        callback: impl Fn(&Value) + 'static,
    ) {
        let id = source.subscribe_event(event, callback);
        self.registrations
            .borrow_mut()
            .push(Registration::SourceEvent {
                source: source.clone(),
                event: event.to_string(),
                id,
            });
    }

    /// Attach a native node listener, scoped to this owner.
    pub fn listen(&self, node: &NodeRef, event: &str, callback: impl Fn(&Event) + 'static) {
        let id = node.add_event_listener(event, callback);
        self.registrations.borrow_mut().push(Registration::NodeEvent {
            node: node.clone(),
            event: event.to_string(),
            id,
        });
    }

    /// Detach every recorded subscription.
    pub fn teardown(&self) {
        let registrations = self.registrations.take();
        debug!(count = registrations.len(), "Tearing down listener owner");
        for registration in registrations {
            match registration {
                Registration::AttributeChange {
                    source,
                    attribute,
                    id,
                } => {
                    source.unsubscribe_attribute(&attribute, id);
                }
                Registration::SourceEvent { source, event, id } => {
                    source.unsubscribe_event(&event, id);
                }
                Registration::NodeEvent { node, event, id } => {
                    node.remove_event_listener(&event, id);
                }
            }
        }
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.borrow().len()
    }
}
