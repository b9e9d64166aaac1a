//! PNG encoding and all-or-nothing file output

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};

use crate::export::ExportError;

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Save an RGBA image to a PNG file.
///
/// The image is fully encoded before anything touches the filesystem, so an
/// encode failure never leaves a file behind.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_png(image)?;
    write_atomic(path, &bytes)
}

/// Write `contents` to `path` via a temporary sibling file and a rename.
///
/// Parent directories are created as needed. On failure the temporary file
/// is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let partial = partial_path(path);
    let result = fs::File::create(&partial)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&partial, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

/// Hidden sibling used while a file is being written.
fn partial_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.partial", file_name))
}
