//! Error types for rendering, applying, and merging templates

use thiserror::Error;

use weft_dom::DomError;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Invalid definition: {reason}")]
    InvalidDefinition { reason: String },

    #[error("Apply requires an existing target node")]
    MissingTarget,

    #[error("Cannot merge children: template has {expected}, fragment declares {found}")]
    ChildCountMismatch { expected: usize, found: usize },

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}

impl TemplateError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TemplateError::InvalidDefinition {
            reason: reason.into(),
        }
    }
}
