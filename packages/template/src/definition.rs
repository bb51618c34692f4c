//! Definition grammar
//!
//! The raw, pre-normalization input shape accepted from callers. The
//! grammar is deliberately loose: text may be a scalar or a list,
//! attribute values may be single values, lists, namespaced wrappers,
//! or (for `style`) nested property mappings, and `on` values may be a
//! single listener or a list. Normalization folds all of it into the
//! canonical [`Template`](crate::template::Template) shape.
//!
//! Recognized top-level keys: `tag`, `text`, `attributes`, `children`,
//! `on`, plus `namespace`/`value` for namespaced attribute values and
//! arbitrary property keys under `attributes.style`.
//!
//! Cloning a definition is structural for plain data and reference-only
//! for bindings and pre-built components, so a clone never duplicates
//! externally-owned objects.

use std::rc::Rc;

use serde_json::Value;

use weft_dom::Event;

use crate::binding::{Binding, EventHandler};
use crate::template::{VisualComponent, VisualComponentCollection};

/// One value position: a literal or a binding.
#[derive(Clone)]
pub enum DefValue {
    Literal(Value),
    Bound(Binding),
}

impl From<Value> for DefValue {
    fn from(value: Value) -> Self {
        DefValue::Literal(value)
    }
}

impl From<&str> for DefValue {
    fn from(value: &str) -> Self {
        DefValue::Literal(Value::String(value.to_string()))
    }
}

impl From<String> for DefValue {
    fn from(value: String) -> Self {
        DefValue::Literal(Value::String(value))
    }
}

impl From<bool> for DefValue {
    fn from(value: bool) -> Self {
        DefValue::Literal(Value::Bool(value))
    }
}

impl From<i64> for DefValue {
    fn from(value: i64) -> Self {
        DefValue::Literal(Value::from(value))
    }
}

impl From<f64> for DefValue {
    fn from(value: f64) -> Self {
        DefValue::Literal(Value::from(value))
    }
}

impl From<Binding> for DefValue {
    fn from(binding: Binding) -> Self {
        DefValue::Bound(binding)
    }
}

/// Text content: scalar or list; normalization array-wraps scalars.
#[derive(Clone)]
pub enum TextValue {
    One(DefValue),
    Many(Vec<DefValue>),
}

/// Attribute value in the loose grammar.
#[derive(Clone)]
pub enum AttrValue {
    One(DefValue),
    List(Vec<DefValue>),
    /// `{ namespace, value }` wrapper around an inner value.
    Namespaced {
        namespace: String,
        value: Box<AttrValue>,
    },
    /// Nested property mapping, recognized for the `style` attribute.
    StyleMap(Vec<(String, AttrValue)>),
}

impl AttrValue {
    pub fn namespaced(namespace: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        AttrValue::Namespaced {
            namespace: namespace.into(),
            value: Box::new(value.into()),
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        AttrValue::One(DefValue::Literal(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::One(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::One(value.into())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::One(value.into())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::One(value.into())
    }
}

impl From<Binding> for AttrValue {
    fn from(binding: Binding) -> Self {
        AttrValue::One(DefValue::Bound(binding))
    }
}

impl From<Vec<DefValue>> for AttrValue {
    fn from(values: Vec<DefValue>) -> Self {
        AttrValue::List(values)
    }
}

/// One event-listener entry: a binding or a bare callback.
#[derive(Clone)]
pub enum ListenerEntry {
    Bound(Binding),
    Handler(EventHandler),
}

impl ListenerEntry {
    pub fn handler(callback: impl Fn(&Event) + 'static) -> Self {
        ListenerEntry::Handler(Rc::new(callback))
    }
}

impl From<Binding> for ListenerEntry {
    fn from(binding: Binding) -> Self {
        ListenerEntry::Bound(binding)
    }
}

/// Listener value in the loose grammar: scalar or list.
#[derive(Clone)]
pub enum ListenerValue {
    One(ListenerEntry),
    Many(Vec<ListenerEntry>),
}

impl From<Binding> for ListenerValue {
    fn from(binding: Binding) -> Self {
        ListenerValue::One(ListenerEntry::Bound(binding))
    }
}

impl From<ListenerEntry> for ListenerValue {
    fn from(entry: ListenerEntry) -> Self {
        ListenerValue::One(entry)
    }
}

impl From<Vec<ListenerEntry>> for ListenerValue {
    fn from(entries: Vec<ListenerEntry>) -> Self {
        ListenerValue::Many(entries)
    }
}

/// A child position: a nested definition or an externally-owned
/// component/collection passed through untouched.
#[derive(Clone)]
pub enum ChildDef {
    Definition(Definition),
    Component(Rc<dyn VisualComponent>),
    Collection(Rc<dyn VisualComponentCollection>),
}

impl From<Definition> for ChildDef {
    fn from(definition: Definition) -> Self {
        ChildDef::Definition(definition)
    }
}

impl From<&str> for ChildDef {
    fn from(text: &str) -> Self {
        ChildDef::Definition(Definition::text(text))
    }
}

impl From<String> for ChildDef {
    fn from(text: String) -> Self {
        ChildDef::Definition(Definition::text(text))
    }
}

impl From<Rc<dyn VisualComponent>> for ChildDef {
    fn from(component: Rc<dyn VisualComponent>) -> Self {
        ChildDef::Component(component)
    }
}

impl From<Rc<dyn VisualComponentCollection>> for ChildDef {
    fn from(collection: Rc<dyn VisualComponentCollection>) -> Self {
        ChildDef::Collection(collection)
    }
}

/// The raw input shape. Fields are public so callers can assemble any
/// combination, including invalid ones; validity is checked at render
/// or apply time, never here.
#[derive(Clone, Default)]
pub struct Definition {
    pub tag: Option<String>,
    pub namespace: Option<String>,
    pub text: Option<TextValue>,
    pub attributes: Vec<(String, AttrValue)>,
    pub children: Vec<ChildDef>,
    pub on: Vec<(String, ListenerValue)>,
}

impl Definition {
    /// An element definition in the default namespace.
    pub fn element(tag: impl Into<String>) -> Self {
        Definition {
            tag: Some(tag.into()),
            ..Definition::default()
        }
    }

    /// An element definition in an explicit namespace.
    pub fn element_ns(tag: impl Into<String>, namespace: impl Into<String>) -> Self {
        Definition {
            tag: Some(tag.into()),
            namespace: Some(namespace.into()),
            ..Definition::default()
        }
    }

    /// A text-node definition with scalar content.
    pub fn text(value: impl Into<DefValue>) -> Self {
        Definition {
            text: Some(TextValue::One(value.into())),
            ..Definition::default()
        }
    }

    /// A text-node definition from an ordered list of parts.
    pub fn text_parts(parts: Vec<DefValue>) -> Self {
        Definition {
            text: Some(TextValue::Many(parts)),
            ..Definition::default()
        }
    }

    /// A definition with neither tag nor text, valid only for `apply`:
    /// it attaches attributes and listeners onto an existing node.
    pub fn behavior() -> Self {
        Definition::default()
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add one property to the nested `style` mapping.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let pair = (property.into(), value.into());
        for (name, attr) in self.attributes.iter_mut() {
            if name == "style" {
                if let AttrValue::StyleMap(props) = attr {
                    props.push(pair);
                    return self;
                }
            }
        }
        self.attributes
            .push(("style".to_string(), AttrValue::StyleMap(vec![pair])));
        self
    }

    pub fn child(mut self, child: impl Into<ChildDef>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Register a listener under `"event"` or `"event@selector"`.
    pub fn on(mut self, key: impl Into<String>, value: impl Into<ListenerValue>) -> Self {
        self.on.push((key.into(), value.into()));
        self
    }

    /// Load the plain-data subset of the grammar from JSON. Bindings,
    /// callbacks, and pre-built components cannot be expressed in JSON
    /// and are attached through the builder API instead.
    pub fn from_json(value: &Value) -> Definition {
        match value {
            Value::String(text) => Definition::text(text.as_str()),
            Value::Object(map) => {
                let mut definition = Definition::default();
                definition.tag = map.get("tag").and_then(Value::as_str).map(String::from);
                definition.namespace = map
                    .get("namespace")
                    .and_then(Value::as_str)
                    .map(String::from);
                if let Some(text) = map.get("text") {
                    definition.text = Some(match text {
                        Value::Array(parts) => TextValue::Many(
                            parts.iter().cloned().map(DefValue::Literal).collect(),
                        ),
                        other => TextValue::One(DefValue::Literal(other.clone())),
                    });
                }
                if let Some(Value::Object(attributes)) = map.get("attributes") {
                    for (name, attr) in attributes {
                        definition
                            .attributes
                            .push((name.clone(), attr_from_json(name, attr)));
                    }
                }
                if let Some(Value::Array(children)) = map.get("children") {
                    for child in children {
                        definition
                            .children
                            .push(ChildDef::Definition(Definition::from_json(child)));
                    }
                }
                definition
            }
            other => Definition::text(other.clone()),
        }
    }
}

fn attr_from_json(name: &str, value: &Value) -> AttrValue {
    match value {
        Value::Array(items) => {
            AttrValue::List(items.iter().cloned().map(DefValue::Literal).collect())
        }
        Value::Object(map) => {
            if let (Some(Value::String(namespace)), Some(inner)) =
                (map.get("namespace"), map.get("value"))
            {
                let inner = match inner {
                    Value::Array(items) => {
                        AttrValue::List(items.iter().cloned().map(DefValue::Literal).collect())
                    }
                    other => AttrValue::One(DefValue::Literal(other.clone())),
                };
                return AttrValue::namespaced(namespace.clone(), inner);
            }
            if name == "style" {
                return AttrValue::StyleMap(
                    map.iter()
                        .map(|(property, v)| {
                            (property.clone(), AttrValue::One(DefValue::Literal(v.clone())))
                        })
                        .collect(),
                );
            }
            AttrValue::One(DefValue::Literal(value.clone()))
        }
        other => AttrValue::One(DefValue::Literal(other.clone())),
    }
}
