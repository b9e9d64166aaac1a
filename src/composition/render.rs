//! Flattening a layer stack into a single RGBA image

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::models::{ExportConfig, Layer};
use crate::store::LayerStore;

use super::blend::blit_layer;
use super::error::{CompositionError, Warning};

/// Largest RGBA canvas, in bytes, the compositor will allocate (16384 x 16384).
pub const MAX_SURFACE_BYTES: u64 = 1 << 30;

/// Byte size of a `width` x `height` RGBA canvas.
pub fn surface_bytes(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * 4
}

/// Render every visible layer of `store` onto a canvas sized by `config`.
///
/// Convenience wrapper around [`render_layers`] using the store's paint order.
pub fn render_store(
    store: &LayerStore,
    config: &ExportConfig,
) -> Result<(RgbaImage, Vec<Warning>), CompositionError> {
    render_layers(&store.stack(), config)
}

/// Render layers, given in paint order, to an RGBA image buffer.
///
/// - Hidden layers are skipped entirely
/// - Each layer is drawn at its position, sized to its stored dimensions,
///   with its opacity applied as a global alpha
/// - A layer whose pixels fail to decode is skipped with a warning
/// - No layers yields a fully transparent canvas of the requested size
///
/// Returns an error only when the canvas itself cannot be allocated: an empty
/// size, or one above [`MAX_SURFACE_BYTES`].
pub fn render_layers(
    layers: &[&Layer],
    config: &ExportConfig,
) -> Result<(RgbaImage, Vec<Warning>), CompositionError> {
    if config.width == 0 || config.height == 0 {
        return Err(CompositionError::EmptySurface {
            name: config.name.clone(),
            width: config.width,
            height: config.height,
        });
    }
    let bytes = surface_bytes(config.width, config.height);
    if bytes > MAX_SURFACE_BYTES || usize::try_from(bytes).is_err() {
        return Err(CompositionError::SurfaceTooLarge {
            name: config.name.clone(),
            width: config.width,
            height: config.height,
        });
    }

    let mut warnings = Vec::new();

    // Create canvas (transparent by default)
    let mut canvas = RgbaImage::from_pixel(config.width, config.height, Rgba([0, 0, 0, 0]));

    for layer in layers.iter().filter(|l| l.visible) {
        let pixels = match layer.image.decode() {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!(
                    layer = %layer.id,
                    name = %layer.name,
                    error = %e,
                    "skipping undecodable layer"
                );
                warnings.push(Warning::for_layer(
                    layer.id,
                    format!("Could not decode '{}', layer skipped: {}", layer.name, e),
                ));
                continue;
            }
        };

        let pixels = fit_to_dimensions(pixels, layer);
        debug!(layer = %layer.id, x = layer.position.x, y = layer.position.y, "drawing layer");
        blit_layer(&mut canvas, &pixels, layer.position.x, layer.position.y, layer.opacity);
    }

    Ok((canvas, warnings))
}

/// Resize decoded pixels to the layer's stored size if they differ.
fn fit_to_dimensions(pixels: RgbaImage, layer: &Layer) -> RgbaImage {
    let (width, height) = (layer.dimensions.width, layer.dimensions.height);
    if pixels.dimensions() == (width, height) || width == 0 || height == 0 {
        return pixels;
    }
    image::imageops::resize(&pixels, width, height, FilterType::Nearest)
}
