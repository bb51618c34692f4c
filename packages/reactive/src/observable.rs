//! Observable data source
//!
//! Named JSON attributes plus two event surfaces: per-attribute change
//! notifications (channel = attribute name) and arbitrary named events.
//! `set` always notifies, even when the stored value is unchanged;
//! subscribers must tolerate repeated notifications with equal values.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::emitter::{Emitter, SubId};

pub struct Observable {
    attributes: RefCell<HashMap<String, Value>>,
    changes: Emitter,
    events: Emitter,
}

impl Observable {
    pub fn new() -> Rc<Self> {
        Rc::new(Observable {
            attributes: RefCell::new(HashMap::new()),
            changes: Emitter::new(),
            events: Emitter::new(),
        })
    }

    /// Build a source pre-populated from a JSON object. Non-object
    /// values yield an empty source.
    pub fn with_attributes(values: Value) -> Rc<Self> {
        let source = Observable::new();
        if let Value::Object(map) = values {
            let mut attributes = source.attributes.borrow_mut();
            for (name, value) in map {
                attributes.insert(name, value);
            }
        }
        source
    }

    /// Current value of an attribute, `Null` when absent.
    pub fn get(&self, name: &str) -> Value {
        self.attributes
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Store a value and notify that attribute's subscribers.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        debug!(attribute = name, %value, "Attribute changed");
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        self.changes.emit(name, &value);
    }

    pub fn subscribe_attribute(&self, name: &str, callback: impl Fn(&Value) + 'static) -> SubId {
        self.changes.subscribe(name, callback)
    }

    pub fn unsubscribe_attribute(&self, name: &str, id: SubId) -> bool {
        self.changes.unsubscribe(name, id)
    }

    /// Emit an arbitrary named event (forwarded to the owned emitter).
    pub fn emit(&self, event: &str, payload: &Value) {
        debug!(event, "Emitting source event");
        self.events.emit(event, payload);
    }

    pub fn subscribe_event(&self, event: &str, callback: impl Fn(&Value) + 'static) -> SubId {
        self.events.subscribe(event, callback)
    }

    pub fn unsubscribe_event(&self, event: &str, id: SubId) -> bool {
        self.events.unsubscribe(event, id)
    }

    pub fn attribute_listener_count(&self, name: &str) -> usize {
        self.changes.listener_count(name)
    }

    pub fn event_listener_count(&self, event: &str) -> usize {
        self.events.listener_count(event)
    }
}
