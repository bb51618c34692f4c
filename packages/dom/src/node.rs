//! Live tree nodes
//!
//! `NodeRef` is a shared handle over one element or text node. Cloning
//! the handle never clones the node; all clones observe the same
//! mutations. Parent links are weak so subtrees drop naturally when the
//! last external handle goes away.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DomError;
use crate::event::{Event, EventCallback, ListenerId};
use crate::selector;
use crate::snapshot::NodeSnapshot;

/// Attribute key: optional namespace plus local name.
pub(crate) type AttrKey = (Option<String>, String);

pub(crate) struct ElementData {
    pub tag: String,
    pub namespace: Option<String>,
    pub attributes: HashMap<AttrKey, String>,
    pub styles: HashMap<String, String>,
    pub children: Vec<NodeRef>,
}

pub(crate) enum NodeKind {
    Element(ElementData),
    Text(String),
}

pub(crate) struct NodeInner {
    kind: NodeKind,
    parent: Weak<RefCell<NodeInner>>,
    listeners: HashMap<String, Vec<(ListenerId, EventCallback)>>,
    next_listener_id: u64,
}

/// Shared handle to one live node.
#[derive(Clone)]
pub struct NodeRef {
    inner: Rc<RefCell<NodeInner>>,
}

impl NodeRef {
    /// Create a detached element in the default namespace.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::element_ns(tag, None::<&str>)
    }

    /// Create a detached element in the given namespace.
    pub fn element_ns(tag: impl Into<String>, namespace: Option<impl Into<String>>) -> Self {
        NodeRef::from_kind(NodeKind::Element(ElementData {
            tag: tag.into(),
            namespace: namespace.map(Into::into),
            attributes: HashMap::new(),
            styles: HashMap::new(),
            children: Vec::new(),
        }))
    }

    /// Create a detached text node.
    pub fn text(content: impl Into<String>) -> Self {
        NodeRef::from_kind(NodeKind::Text(content.into()))
    }

    fn from_kind(kind: NodeKind) -> Self {
        NodeRef {
            inner: Rc::new(RefCell::new(NodeInner {
                kind,
                parent: Weak::new(),
                listeners: HashMap::new(),
                next_listener_id: 0,
            })),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.inner.borrow().kind, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.inner.borrow().kind, NodeKind::Text(_))
    }

    /// Identity comparison: do both handles point at the same node?
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn tag(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => Some(el.tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn namespace(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => el.namespace.clone(),
            NodeKind::Text(_) => None,
        }
    }

    // -- attributes ---------------------------------------------------------

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.set_attribute_ns(None, name, value)
    }

    pub fn set_attribute_ns(
        &self,
        namespace: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Element(el) => {
                debug!(name, value, "Setting attribute");
                el.attributes
                    .insert((namespace.map(String::from), name.to_string()), value.to_string());
                Ok(())
            }
            NodeKind::Text(_) => Err(DomError::NotAnElement),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attribute_ns(None, name)
    }

    pub fn attribute_ns(&self, namespace: Option<&str>, name: &str) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => el
                .attributes
                .get(&(namespace.map(String::from), name.to_string()))
                .cloned(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn remove_attribute_ns(&self, namespace: Option<&str>, name: &str) -> Result<(), DomError> {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Element(el) => {
                el.attributes
                    .remove(&(namespace.map(String::from), name.to_string()));
                Ok(())
            }
            NodeKind::Text(_) => Err(DomError::NotAnElement),
        }
    }

    // -- inline styles ------------------------------------------------------

    pub fn set_style(&self, property: &str, value: &str) -> Result<(), DomError> {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Element(el) => {
                debug!(property, value, "Setting inline style");
                el.styles.insert(property.to_string(), value.to_string());
                Ok(())
            }
            NodeKind::Text(_) => Err(DomError::NotAnElement),
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => el.styles.get(property).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn remove_style(&self, property: &str) -> Result<(), DomError> {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Element(el) => {
                el.styles.remove(property);
                Ok(())
            }
            NodeKind::Text(_) => Err(DomError::NotAnElement),
        }
    }

    // -- text ---------------------------------------------------------------

    /// Replace the content of a text node (atomic replacement).
    pub fn set_text(&self, content: &str) -> Result<(), DomError> {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Text(text) => {
                *text = content.to_string();
                Ok(())
            }
            NodeKind::Element(_) => Err(DomError::NotText),
        }
    }

    /// Text node content, or the concatenated content of all descendant
    /// text nodes for an element.
    pub fn text_content(&self) -> String {
        match &self.inner.borrow().kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(el) => el
                .children
                .iter()
                .map(NodeRef::text_content)
                .collect::<Vec<_>>()
                .concat(),
        }
    }

    // -- children -----------------------------------------------------------

    pub fn append_child(&self, child: &NodeRef) -> Result<(), DomError> {
        if self.ptr_eq(child) {
            warn!("Ignoring attempt to append a node to itself");
            return Ok(());
        }
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Element(el) => {
                el.children.push(child.clone());
            }
            NodeKind::Text(_) => return Err(DomError::NotAnElement),
        }
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        Ok(())
    }

    pub fn child(&self, index: usize) -> Option<NodeRef> {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => el.children.get(index).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn child_count(&self) -> usize {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => el.children.len(),
            NodeKind::Text(_) => 0,
        }
    }

    pub fn children(&self) -> Vec<NodeRef> {
        match &self.inner.borrow().kind {
            NodeKind::Element(el) => el.children.clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeRef> {
        let parent = self.inner.borrow().parent.upgrade()?;
        Some(NodeRef { inner: parent })
    }

    // -- events -------------------------------------------------------------

    pub fn add_event_listener(
        &self,
        event: &str,
        callback: impl Fn(&Event) + 'static,
    ) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner
            .listeners
            .entry(event.to_string())
            .or_default()
            .push((id, Rc::new(callback)));
        id
    }

    pub fn remove_event_listener(&self, event: &str, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if let Some(list) = inner.listeners.get_mut(event) {
            let before = list.len();
            list.retain(|(listener_id, _)| *listener_id != id);
            return list.len() != before;
        }
        false
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Dispatch an event on this node and bubble it through ancestors.
    ///
    /// Listener lists are snapshotted per node before invocation, so a
    /// callback may freely mutate the tree or the listener sets.
    pub fn dispatch(&self, event: &Event) {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            let callbacks: Vec<EventCallback> = node
                .inner
                .borrow()
                .listeners
                .get(&event.name)
                .map(|list| list.iter().map(|(_, cb)| cb.clone()).collect())
                .unwrap_or_default();
            for callback in callbacks {
                callback(event);
            }
            current = node.parent();
        }
    }

    /// Dispatch a freshly built event targeted at this node.
    pub fn emit(&self, name: &str, payload: Value) {
        let event = Event::new(name, self.clone(), payload);
        self.dispatch(&event);
    }

    /// Match this node against a simple selector (`tag`, `.class`,
    /// `#id`, or a compound like `button.primary`).
    pub fn matches(&self, sel: &str) -> bool {
        selector::matches(self, sel)
    }

    // -- snapshots ----------------------------------------------------------

    pub fn snapshot(&self) -> NodeSnapshot {
        match &self.inner.borrow().kind {
            NodeKind::Text(text) => NodeSnapshot::Text {
                content: text.clone(),
            },
            NodeKind::Element(el) => NodeSnapshot::Element {
                tag: el.tag.clone(),
                namespace: el.namespace.clone(),
                attributes: el
                    .attributes
                    .iter()
                    .map(|((ns, name), value)| {
                        let key = match ns {
                            Some(ns) => format!("{}:{}", ns, name),
                            None => name.clone(),
                        };
                        (key, value.clone())
                    })
                    .collect(),
                styles: el.styles.clone(),
                children: el.children.iter().map(NodeRef::snapshot).collect(),
            },
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.snapshot()).unwrap_or(Value::Null)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.to_json())
    }
}
