//! Layer sources - raw image bytes awaiting header decoding
//!
//! A [`LayerSource`] is what the store consumes on `add_layer`. Reading files
//! happens here so the store itself never touches the filesystem.

use std::io::Cursor;
use std::path::Path;

use image::io::Reader as ImageReader;
use image::ImageFormat;

use crate::models::{Dimensions, ImageData};
use crate::store::LayerError;

/// Formats accepted as layer input.
pub const SUPPORTED_FORMATS: [ImageFormat; 4] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif, ImageFormat::WebP];

/// File extensions recognised as layer images.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Undecoded image content plus the file name it came from.
#[derive(Debug, Clone)]
pub struct LayerSource {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl LayerSource {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// Read a source from disk.
    ///
    /// Read failures are reported as `InvalidInput`: the upload is aborted
    /// and nothing reaches the store.
    pub fn from_path(path: &Path) -> Result<Self, LayerError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| LayerError::invalid_input(&file_name, e))?;
        Ok(Self { file_name, bytes })
    }

    /// Default layer name: the file name minus its extension.
    ///
    /// ```
    /// use spritestack::source::LayerSource;
    ///
    /// let source = LayerSource::from_bytes("knight_helmet.png", Vec::new());
    /// assert_eq!(source.display_name(), "knight_helmet");
    /// ```
    pub fn display_name(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.file_name.clone())
    }

    /// Detect the format and read pixel dimensions from the image header.
    ///
    /// Pixel data is not decoded here; that happens at raster export.
    pub fn probe(self) -> Result<(ImageData, Dimensions), LayerError> {
        let reader = ImageReader::new(Cursor::new(self.bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| LayerError::invalid_input(&self.file_name, e))?;

        let format = reader.format().ok_or_else(|| {
            LayerError::invalid_input(&self.file_name, "unrecognized image format")
        })?;
        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(LayerError::invalid_input(
                &self.file_name,
                format!("unsupported image format {:?}", format),
            ));
        }

        let (width, height) =
            reader.into_dimensions().map_err(|e| LayerError::invalid_input(&self.file_name, e))?;
        let dimensions = Dimensions::new(width, height);
        if dimensions.is_empty() {
            return Err(LayerError::invalid_input(&self.file_name, "image has no pixels"));
        }

        Ok((ImageData::new(self.bytes, format), dimensions))
    }
}

/// Check if a path has a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
