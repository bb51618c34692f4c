//! Rendering
//!
//! One walk serves both modes: `render` creates nodes, `apply` reuses
//! an existing tree and only wires attributes, listeners, and bindings.
//! Fresh subtrees are materialized through a detached fragment so the
//! live parent is touched once. Apply mode recurses positionally into
//! existing children; pre-built components and collections already sit
//! in place and only consume their slots.

use serde_json::Value;
use tracing::{debug, info, warn};

use weft_dom::{Fragment, NodeRef};

use crate::definition::ListenerEntry;
use crate::error::{TemplateError, TemplateResult};
use crate::schema::{self, SchemaEntry};
use crate::template::{AttrSchema, Child, Template};
use crate::writer::Writer;

impl Template {
    /// Build a new node tree from this template.
    pub fn render(&self) -> TemplateResult<NodeRef> {
        info!(tag = ?self.tag, children = self.children.len(), "Rendering template");
        let node = self.materialize(None)?;
        self.emit("rendered", &Value::Null);
        Ok(node)
    }

    /// Attach this template's behavior to an existing node, creating
    /// nothing; returns the node it was given.
    pub fn apply(&self, existing: Option<&NodeRef>) -> TemplateResult<NodeRef> {
        let target = existing.ok_or(TemplateError::MissingTarget)?;
        info!(tag = ?self.tag, "Applying template to existing node");
        let node = self.materialize(Some(target))?;
        self.emit("applied", &Value::Null);
        Ok(node)
    }

    pub(crate) fn materialize(&self, existing: Option<&NodeRef>) -> TemplateResult<NodeRef> {
        match (&self.text, &self.tag) {
            (Some(_), Some(_)) => {
                Err(TemplateError::invalid("definition has both tag and text"))
            }
            (Some(entries), None) => {
                let node = match existing {
                    Some(node) => node.clone(),
                    None => NodeRef::text(""),
                };
                render_text_schema(entries, &node)?;
                Ok(node)
            }
            (None, Some(tag)) => {
                let node = match existing {
                    Some(node) => {
                        if node.tag().as_deref() != Some(tag.as_str()) {
                            warn!(
                                expected = %tag,
                                found = ?node.tag(),
                                "Applying element template to a node with a different tag"
                            );
                        }
                        node.clone()
                    }
                    None => NodeRef::element_ns(tag.as_str(), self.namespace.as_deref()),
                };
                self.render_attributes(&node)?;
                self.activate_listeners(&node);
                self.render_children(&node, existing.is_some())?;
                Ok(node)
            }
            // Neither tag nor text: valid only against an existing node,
            // where it attaches attributes and listeners.
            (None, None) => match existing {
                Some(node) => {
                    self.render_attributes(node)?;
                    self.activate_listeners(node);
                    self.render_children(node, true)?;
                    Ok(node.clone())
                }
                None => Err(TemplateError::invalid(
                    "definition has neither tag nor text",
                )),
            },
        }
    }

    fn render_attributes(&self, node: &NodeRef) -> TemplateResult<()> {
        for (name, attr) in &self.attributes {
            match attr {
                AttrSchema::Schema { namespace, entries } => {
                    if entries.iter().any(SchemaEntry::is_bound) {
                        let writer = Writer::Attribute {
                            namespace: namespace.clone(),
                            name: name.clone(),
                        };
                        activate_entries(entries, node, &writer);
                    } else {
                        let aggregate = schema::reduce_entries(entries, None);
                        if !aggregate.is_empty() {
                            debug!(attribute = %name, value = %aggregate, "Setting literal attribute");
                            node.set_attribute_ns(namespace.as_deref(), name, &aggregate)?;
                        }
                    }
                }
                AttrSchema::StyleMap(properties) => {
                    for (property, entries) in properties {
                        let writer = Writer::StyleProperty {
                            name: property.clone(),
                        };
                        if entries.iter().any(SchemaEntry::is_bound) {
                            activate_entries(entries, node, &writer);
                        } else {
                            let aggregate = schema::reduce_entries(entries, None);
                            if !aggregate.is_empty() {
                                node.set_style(property, &aggregate)?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn activate_listeners(&self, node: &NodeRef) {
        for (key, listeners) in &self.event_listeners {
            let (event, selector) = match key.split_once('@') {
                Some((event, selector)) => (event, Some(selector)),
                None => (key.as_str(), None),
            };
            debug!(event, selector = ?selector, count = listeners.len(), "Activating listeners");
            for listener in listeners {
                match listener {
                    ListenerEntry::Bound(binding) => {
                        binding.activate_dom_event_listener(node, event, selector);
                    }
                    ListenerEntry::Handler(handler) => {
                        let handler = handler.clone();
                        let selector = selector.map(String::from);
                        let _ = node.add_event_listener(event, move |native| {
                            if let Some(selector) = &selector {
                                if !native.target.matches(selector) {
                                    return;
                                }
                            }
                            handler(native);
                        });
                    }
                }
            }
        }
    }

    fn render_children(&self, node: &NodeRef, applying: bool) -> TemplateResult<()> {
        if self.children.is_empty() {
            return Ok(());
        }
        if applying {
            let mut position = 0usize;
            for child in &self.children {
                match child {
                    Child::Template(template) => {
                        match node.child(position) {
                            Some(existing) => {
                                template.materialize(Some(&existing))?;
                            }
                            None => warn!(
                                position,
                                "Existing node has no child at this position; skipping"
                            ),
                        }
                        position += 1;
                    }
                    // Pre-built nodes already sit in place.
                    Child::Component(_) => position += 1,
                    Child::Collection(collection) => position += collection.nodes().len(),
                }
            }
            return Ok(());
        }

        let mut fragment = Fragment::new();
        for child in &self.children {
            match child {
                Child::Template(template) => fragment.append(&template.materialize(None)?),
                Child::Component(component) => fragment.append(&component.node()),
                Child::Collection(collection) => {
                    for item in collection.nodes() {
                        fragment.append(&item);
                    }
                }
            }
        }
        debug!(count = fragment.len(), "Attaching children through fragment");
        fragment.append_to(node)?;
        for child in &self.children {
            if let Child::Collection(collection) = child {
                collection.set_parent(node);
            }
        }
        Ok(())
    }
}

fn activate_entries(entries: &[SchemaEntry], node: &NodeRef, writer: &Writer) {
    // Every binding subscribes, even when its current value is falsy;
    // falsiness only affects the computed aggregate.
    for entry in entries {
        if let SchemaEntry::Bound(binding) = entry {
            binding.activate_attribute_listener(entries, node, writer);
        }
    }
    schema::apply_schema(entries, node, writer);
}

fn render_text_schema(entries: &[SchemaEntry], node: &NodeRef) -> TemplateResult<()> {
    if entries.iter().any(SchemaEntry::is_bound) {
        activate_entries(entries, node, &Writer::TextContent);
        return Ok(());
    }
    // Pure literal text concatenates directly, without separators.
    let content: String = entries
        .iter()
        .map(|entry| match entry {
            SchemaEntry::Literal(value) if !schema::is_falsy(value) => schema::value_text(value),
            _ => String::new(),
        })
        .collect();
    node.set_text(&content)?;
    Ok(())
}
