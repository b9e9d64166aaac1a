//! Data models for layers, geometry and export targets

mod geometry;
mod layer;

// Re-export all public types
pub use geometry::{Bounds, Dimensions, Position};
pub use layer::{ExportConfig, ImageData, Layer, LayerId, LayerUpdate};
