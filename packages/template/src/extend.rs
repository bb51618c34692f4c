//! Extension merging
//!
//! Deep-merges a definition fragment into an existing template in
//! place: attribute and listener arrays are concatenated key-by-key,
//! text parts are appended, and children merge positionally and
//! recursively. Child counts are validated across the whole tree
//! before anything is mutated, so a mismatch leaves the target
//! untouched.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::definition::Definition;
use crate::error::{TemplateError, TemplateResult};
use crate::normalize::normalize;
use crate::template::{AttrSchema, Child, Template};

impl Template {
    /// Merge a normalized fragment into this template.
    pub fn extend(&mut self, fragment: Definition) -> TemplateResult<()> {
        let fragment = normalize(fragment);
        info!(children = fragment.children.len(), "Extending template");
        validate_children(self, &fragment)?;
        merge_template(self, fragment);
        self.emit("extended", &Value::Null);
        Ok(())
    }
}

/// Positional correspondence requires equal child counts at every
/// level the fragment declares children for.
fn validate_children(target: &Template, fragment: &Template) -> TemplateResult<()> {
    if fragment.children.is_empty() {
        return Ok(());
    }
    if fragment.children.len() != target.children.len() {
        return Err(TemplateError::ChildCountMismatch {
            expected: target.children.len(),
            found: fragment.children.len(),
        });
    }
    for (current, incoming) in target.children.iter().zip(&fragment.children) {
        if let (Child::Template(current), Child::Template(incoming)) = (current, incoming) {
            validate_children(current, incoming)?;
        }
    }
    Ok(())
}

fn merge_template(target: &mut Template, fragment: Template) {
    if let Some(incoming) = fragment.text {
        match &mut target.text {
            Some(existing) => existing.extend(incoming),
            None => target.text = Some(incoming),
        }
    }

    for (name, incoming) in fragment.attributes {
        match target.attributes.iter().position(|(attr, _)| *attr == name) {
            Some(index) => merge_attr(&mut target.attributes[index].1, incoming),
            None => target.attributes.push((name, incoming)),
        }
    }

    for (key, incoming) in fragment.event_listeners {
        match target
            .event_listeners
            .iter()
            .position(|(listener_key, _)| *listener_key == key)
        {
            Some(index) => target.event_listeners[index].1.extend(incoming),
            None => target.event_listeners.push((key, incoming)),
        }
    }

    for (slot, incoming) in target.children.iter_mut().zip(fragment.children) {
        if let (Child::Template(current), Child::Template(extra)) = (slot, incoming) {
            merge_template(current, extra);
        } else {
            // An externally-owned child cannot absorb fragment behavior.
            debug!("Skipping non-template child pair during merge");
        }
    }
}

fn merge_attr(existing: &mut AttrSchema, incoming: AttrSchema) {
    match (existing, incoming) {
        (
            AttrSchema::Schema {
                entries: current, ..
            },
            AttrSchema::Schema { entries: extra, .. },
        ) => current.extend(extra),
        (AttrSchema::StyleMap(current), AttrSchema::StyleMap(extra)) => {
            for (property, entries) in extra {
                match current.iter().position(|(prop, _)| *prop == property) {
                    Some(index) => current[index].1.extend(entries),
                    None => current.push((property, entries)),
                }
            }
        }
        (slot, other) => {
            warn!("Replacing attribute value of a different shape during merge");
            *slot = other;
        }
    }
}
