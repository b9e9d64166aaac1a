//! Export formats for a composed layer stack.
//!
//! Two text formats describe the stack without pixel payloads; the raster
//! composite is produced by [`export_png`].
//!
//! # Supported Formats
//!
//! - **Manifest**: JSON with a format version, export timestamp and one record per layer
//! - **Godot**: `.tres` text resource with per-layer records plus canvas size and name
//! - **PNG**: the flattened composite of all visible layers
//!
//! # Example
//!
//! ```
//! use spritestack::export::{ExportOptions, Exporter, ManifestExporter};
//! use spritestack::models::ExportConfig;
//! use spritestack::store::LayerStore;
//!
//! let store = LayerStore::new();
//! let json = ManifestExporter::new()
//!     .export_to_string(&store, &ExportConfig::default(), &ExportOptions::default())
//!     .unwrap();
//! assert!(json.contains("\"layers\": []"));
//! ```

pub mod godot;
pub mod json;

pub use godot::GodotExporter;
pub use json::{Manifest, ManifestExporter, ManifestLayer, MANIFEST_VERSION};

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::composition::{render_store, CompositionError, Warning};
use crate::models::ExportConfig;
use crate::output::{save_png, write_atomic};
use crate::store::LayerStore;

/// Common error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Drawing or encoding failed; nothing was written
    #[error("Export failed: {0}")]
    Failure(String),
    /// IO error during file writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialization(e.to_string())
    }
}

impl From<CompositionError> for ExportError {
    fn from(e: CompositionError) -> Self {
        ExportError::Failure(e.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => ExportError::Io(io),
            other => ExportError::Failure(other.to_string()),
        }
    }
}

/// Options for text export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty print output (with indentation)
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Trait for text export format implementations.
pub trait Exporter {
    /// Render the stack to a string in this format.
    fn export_to_string(
        &self,
        store: &LayerStore,
        config: &ExportConfig,
        options: &ExportOptions,
    ) -> Result<String, ExportError>;

    /// Export the stack to `output_path`.
    ///
    /// The content is rendered in full before the file is written, and the
    /// write itself is all-or-nothing.
    fn export(
        &self,
        store: &LayerStore,
        config: &ExportConfig,
        output_path: &Path,
        options: &ExportOptions,
    ) -> Result<(), ExportError> {
        let content = self.export_to_string(store, config, options)?;
        write_atomic(output_path, content.as_bytes())?;
        info!(format = self.format_name(), path = %output_path.display(), "exported");
        Ok(())
    }

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Composite the visible stack and save it as a PNG.
///
/// Layers that fail to decode are skipped and reported in the returned
/// warnings. Any failure to draw or encode leaves no file at `output_path`.
pub fn export_png(
    store: &LayerStore,
    config: &ExportConfig,
    output_path: &Path,
) -> Result<Vec<Warning>, ExportError> {
    let (image, warnings) = render_store(store, config)?;
    save_png(&image, output_path)?;
    info!(
        path = %output_path.display(),
        width = config.width,
        height = config.height,
        skipped = warnings.len(),
        "exported composite"
    );
    Ok(warnings)
}
