//! # Weft DOM
//!
//! The live visual tree that templates render into and bind against.
//!
//! Nodes are cheap shared handles (`NodeRef`) over reference-counted
//! interior state, because bindings mutate the tree in place from
//! later-firing callbacks on a single-threaded host. The tree knows
//! nothing about templates or data sources; it only exposes the
//! primitive mutations bindings write through:
//!
//! - namespaced attributes (`set_attribute_ns` / `remove_attribute_ns`)
//! - inline style properties (`set_style` / `remove_style`)
//! - text content (`set_text`)
//! - ordered children (`append_child`, `child`)
//! - native event listeners with bubbling dispatch
//!
//! `Fragment` buffers freshly created children so a whole subtree is
//! attached with a single pass over the live parent. `NodeSnapshot`
//! is the serializable projection used by tests and tooling.

pub mod error;
pub mod event;
pub mod fragment;
pub mod node;
pub mod selector;
pub mod snapshot;

pub use error::DomError;
pub use event::{Event, EventCallback, ListenerId};
pub use fragment::Fragment;
pub use node::NodeRef;
pub use snapshot::NodeSnapshot;
