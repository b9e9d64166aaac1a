//! Error types for composition rendering

use thiserror::Error;

use crate::models::LayerId;

/// A non-fatal problem encountered while compositing.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    /// Layer the warning refers to, if any
    pub layer: Option<LayerId>,
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { layer: None, message: message.into() }
    }

    pub fn for_layer(layer: LayerId, message: impl Into<String>) -> Self {
        Self { layer: Some(layer), message: message.into() }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.layer {
            Some(id) => write!(f, "layer {}: {}", id, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Error that prevents a composite from being produced at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    /// Export canvas has no drawable area
    #[error("Cannot allocate a {width}x{height} drawing surface for '{name}'")]
    EmptySurface { name: String, width: u32, height: u32 },
    /// Export canvas exceeds [`MAX_SURFACE_BYTES`](super::MAX_SURFACE_BYTES)
    #[error("Cannot allocate a {width}x{height} drawing surface for '{name}': too large")]
    SurfaceTooLarge { name: String, width: u32, height: u32 },
}
