//! Detached fragments
//!
//! A fragment buffers freshly created nodes so an entire new subtree is
//! attached to the live parent in one pass, instead of touching the
//! live tree once per child.

use crate::error::DomError;
use crate::node::NodeRef;

#[derive(Default)]
pub struct Fragment {
    children: Vec<NodeRef>,
}

impl Fragment {
    pub fn new() -> Self {
        Fragment::default()
    }

    pub fn append(&mut self, node: &NodeRef) {
        self.children.push(node.clone());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Move every buffered node under `parent`, in insertion order.
    pub fn append_to(self, parent: &NodeRef) -> Result<(), DomError> {
        for child in &self.children {
            parent.append_child(child)?;
        }
        Ok(())
    }
}
