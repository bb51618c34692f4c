//! Event-emitter capability
//!
//! One emitter holds any number of named channels. Emission snapshots
//! the channel's callback list first, so callbacks may subscribe or
//! unsubscribe while an emission is in flight.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

/// Callback invoked with the emitted payload.
pub type EmitterCallback = Rc<dyn Fn(&Value)>;

/// Handle identifying one subscription, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubId(u64);

#[derive(Default)]
pub struct Emitter {
    channels: RefCell<HashMap<String, Vec<(SubId, EmitterCallback)>>>,
    next_id: Cell<u64>,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter::default()
    }

    pub fn subscribe(&self, channel: &str, callback: impl Fn(&Value) + 'static) -> SubId {
        let id = SubId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.channels
            .borrow_mut()
            .entry(channel.to_string())
            .or_default()
            .push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, channel: &str, id: SubId) -> bool {
        let mut channels = self.channels.borrow_mut();
        if let Some(list) = channels.get_mut(channel) {
            let before = list.len();
            list.retain(|(sub_id, _)| *sub_id != id);
            return list.len() != before;
        }
        false
    }

    pub fn emit(&self, channel: &str, payload: &Value) {
        let callbacks: Vec<EmitterCallback> = self
            .channels
            .borrow()
            .get(channel)
            .map(|list| list.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default();
        for callback in callbacks {
            callback(payload);
        }
    }

    pub fn listener_count(&self, channel: &str) -> usize {
        self.channels.borrow().get(channel).map_or(0, Vec::len)
    }
}
