//! Error types for tree mutations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Node is not an element")]
    NotAnElement,

    #[error("Node is not text")]
    NotText,
}
