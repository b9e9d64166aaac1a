//! Compositor - flattening the visible layer stack into one raster image

mod blend;
mod error;
mod render;

// Re-export public API
pub use error::{CompositionError, Warning};
pub use render::{render_layers, render_store, surface_bytes, MAX_SURFACE_BYTES};

/// Result type alias for composition operations.
pub type Result<T> = std::result::Result<T, CompositionError>;
