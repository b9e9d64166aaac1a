//! Error types for layer store operations

use thiserror::Error;

use crate::models::LayerId;

/// Error raised by layer creation, mutation and dragging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    /// Source is not an image, or its header cannot be decoded
    #[error("'{name}' is not a decodable image: {reason}")]
    InvalidInput { name: String, reason: String },
    /// Referenced layer is not (or no longer) in the store
    #[error("Layer {0} not found")]
    NotFound(LayerId),
    /// Attempted delete/reorder/drag of the base layer, or a second base
    #[error("Cannot {action} the base layer")]
    Forbidden { action: &'static str },
}

impl LayerError {
    pub(crate) fn invalid_input(name: impl Into<String>, reason: impl ToString) -> Self {
        LayerError::InvalidInput { name: name.into(), reason: reason.to_string() }
    }

    pub(crate) fn forbidden(action: &'static str) -> Self {
        LayerError::Forbidden { action }
    }

    /// Returns true for errors that UI-driven flows treat as a benign no-op.
    pub fn is_benign(&self) -> bool {
        matches!(self, LayerError::NotFound(_) | LayerError::Forbidden { .. })
    }
}
