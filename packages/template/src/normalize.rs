//! Normalization
//!
//! Folds the loose definition grammar into the canonical template
//! shape: scalars become one-element arrays, `on` entries relocate to
//! `event_listeners`, namespaced wrappers are resolved, and children
//! collapse into the closed `Child` variant set. Pre-built components
//! and collections pass through by reference; nested definitions
//! recurse. Nothing is validated here — malformed shapes surface at
//! render time.

use tracing::{debug, warn};

use weft_reactive::Emitter;

use crate::definition::{AttrValue, ChildDef, DefValue, Definition, ListenerValue, TextValue};
use crate::schema::SchemaEntry;
use crate::template::{AttrSchema, Child, Template};

pub fn normalize(definition: Definition) -> Template {
    let Definition {
        tag,
        namespace,
        text,
        attributes,
        children,
        on,
    } = definition;

    let text = text.map(|value| match value {
        TextValue::One(part) => vec![entry(part)],
        TextValue::Many(parts) => parts.into_iter().map(entry).collect(),
    });

    // Attributes and children only apply to element nodes.
    let (attributes, children) = if text.is_some() {
        if !attributes.is_empty() || !children.is_empty() {
            debug!("Dropping attributes/children on a text definition");
        }
        (Vec::new(), Vec::new())
    } else {
        (
            attributes
                .into_iter()
                .map(|(name, value)| (name, normalize_attr(value)))
                .collect(),
            children.into_iter().map(normalize_child).collect(),
        )
    };

    let event_listeners = on
        .into_iter()
        .map(|(key, value)| {
            let entries = match value {
                ListenerValue::One(listener) => vec![listener],
                ListenerValue::Many(listeners) => listeners,
            };
            (key, entries)
        })
        .collect();

    Template {
        tag,
        namespace,
        text,
        attributes,
        children,
        event_listeners,
        emitter: Emitter::new(),
    }
}

fn entry(value: DefValue) -> SchemaEntry {
    match value {
        DefValue::Literal(literal) => SchemaEntry::Literal(literal),
        DefValue::Bound(binding) => SchemaEntry::Bound(binding),
    }
}

fn entries(value: AttrValue) -> Vec<SchemaEntry> {
    match value {
        AttrValue::One(part) => vec![entry(part)],
        AttrValue::List(parts) => parts.into_iter().map(entry).collect(),
        AttrValue::Namespaced { value, .. } => {
            warn!("Ignoring nested namespace wrapper in a value position");
            entries(*value)
        }
        AttrValue::StyleMap(_) => {
            warn!("Ignoring nested style mapping in a value position");
            Vec::new()
        }
    }
}

fn normalize_attr(value: AttrValue) -> AttrSchema {
    match value {
        AttrValue::Namespaced { namespace, value } => AttrSchema::Schema {
            namespace: Some(namespace),
            entries: entries(*value),
        },
        AttrValue::StyleMap(properties) => AttrSchema::StyleMap(
            properties
                .into_iter()
                .map(|(property, value)| (property, entries(value)))
                .collect(),
        ),
        other => AttrSchema::Schema {
            namespace: None,
            entries: entries(other),
        },
    }
}

fn normalize_child(child: ChildDef) -> Child {
    match child {
        ChildDef::Definition(definition) => Child::Template(normalize(definition)),
        ChildDef::Component(component) => Child::Component(component),
        ChildDef::Collection(collection) => Child::Collection(collection),
    }
}
