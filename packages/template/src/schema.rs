//! Value schemas
//!
//! A value schema is an ordered mix of literal values and bindings that
//! together produce one aggregated value. Literal entries always take
//! part in value computation; binding entries additionally carry live
//! subscriptions once activated. A schema consisting of exactly one
//! conditional binding bypasses string aggregation and drives the write
//! target with its raw presence/absence outcome.

use serde_json::Value;

use weft_dom::NodeRef;

use crate::binding::Binding;
use crate::writer::Writer;

/// One entry of a value schema.
#[derive(Clone)]
pub enum SchemaEntry {
    Literal(Value),
    Bound(Binding),
}

impl SchemaEntry {
    pub fn is_bound(&self) -> bool {
        matches!(self, SchemaEntry::Bound(_))
    }
}

/// Render-facing falsiness: `false`, `null`, and the empty string are
/// falsy. The numeral zero is explicitly NOT falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Text form of a value as written into the tree: strings verbatim,
/// everything else via its JSON rendering (`true`, `0`, `[1,2]`, ...).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fold literal values into one space-joined string. Falsy entries are
/// skipped entirely and never contribute a separator.
pub fn array_value_reducer(values: &[Value]) -> String {
    values
        .iter()
        .filter(|value| !is_falsy(value))
        .map(|value| value_text(value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluate every entry (literals as-is, bindings against `node`) and
/// reduce to the aggregate string.
pub(crate) fn reduce_entries(entries: &[SchemaEntry], node: Option<&NodeRef>) -> String {
    let values: Vec<Value> = entries
        .iter()
        .map(|entry| match entry {
            SchemaEntry::Literal(value) => value.clone(),
            SchemaEntry::Bound(binding) => binding.value_for(node),
        })
        .collect();
    array_value_reducer(&values)
}

/// Recompute a schema and push the outcome through a write strategy:
/// `set` with the aggregate, or `remove` when the aggregate is falsy.
pub(crate) fn apply_schema(entries: &[SchemaEntry], node: &NodeRef, writer: &Writer) {
    if let [SchemaEntry::Bound(binding)] = entries {
        if binding.is_conditional() {
            let value = binding.value_for(Some(node));
            if is_falsy(&value) {
                writer.remove(node);
            } else {
                writer.set(node, &value);
            }
            return;
        }
    }
    let aggregate = reduce_entries(entries, Some(node));
    if aggregate.is_empty() {
        writer.remove(node);
    } else {
        writer.set(node, &Value::String(aggregate));
    }
}
