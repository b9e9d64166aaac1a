//! Layer records and the encoded pixel payload they own.

use std::fmt;
use std::sync::Arc;

use image::{ImageFormat, ImageResult, RgbaImage};
use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Dimensions, Position};

/// Opaque layer identifier, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoded image bytes plus the format detected when the layer was created.
///
/// The bytes are shared, so cloning a layer (or a whole store snapshot)
/// never copies pixel content. Decoding is deferred until compositing.
#[derive(Clone)]
pub struct ImageData {
    bytes: Arc<[u8]>,
    format: ImageFormat,
}

impl ImageData {
    pub fn new(bytes: impl Into<Arc<[u8]>>, format: ImageFormat) -> Self {
        Self { bytes: bytes.into(), format }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fully decode the payload to RGBA8.
    pub fn decode(&self) -> ImageResult<RgbaImage> {
        Ok(image::load_from_memory_with_format(&self.bytes, self.format)?.to_rgba8())
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One positioned, orderable image element in the composition.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub image: ImageData,
    pub dimensions: Dimensions,
    pub position: Position,
    /// Opacity from 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f64,
    /// Hidden layers stay in the store but are never composited
    pub visible: bool,
    pub is_base: bool,
}

impl Layer {
    /// Canvas-space rectangle currently covered by this layer.
    pub fn bounds(&self) -> Bounds {
        Bounds::at(self.position.x, self.position.y, self.dimensions)
    }
}

/// Partial update merged into an existing layer.
///
/// Has no `is_base` field: the base flag is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerUpdate {
    pub name: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub z_index: Option<i32>,
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
}

impl LayerUpdate {
    pub fn position(x: i32, y: i32) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    pub fn visible(visible: bool) -> Self {
        Self { visible: Some(visible), ..Default::default() }
    }

    pub fn opacity(opacity: f64) -> Self {
        Self { opacity: Some(opacity), ..Default::default() }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }
}

/// Target canvas for an export, independent of any layer's own size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl ExportConfig {
    pub const DEFAULT_NAME: &'static str = "character";
    pub const DEFAULT_SIZE: u32 = 64;

    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self { name: name.into(), width, height }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME, Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
    }
}
