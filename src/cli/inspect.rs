//! Inspect command implementation

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::export::{Manifest, ManifestLayer};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the inspect command
pub fn run_inspect(path: &Path) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let manifest = match Manifest::from_json(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("Error: '{}' is not a layer manifest: {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    print!("{}", format_manifest(&manifest));
    ExitCode::from(EXIT_SUCCESS)
}

/// Render a manifest as a top-to-bottom listing.
fn format_manifest(manifest: &Manifest) -> String {
    let mut out = format!(
        "Manifest v{} exported {}\n{} layer(s), top to bottom:\n",
        manifest.version,
        manifest.exported_at,
        manifest.layers.len()
    );
    for layer in manifest.layers.iter().rev() {
        out.push_str(&format_layer(layer));
        out.push('\n');
    }
    out
}

fn format_layer(layer: &ManifestLayer) -> String {
    let mut line = format!(
        "  #{:<3} {:<16} {}x{} at ({}, {}) z={} opacity={:.2}",
        layer.id.0,
        layer.name,
        layer.dimensions.width,
        layer.dimensions.height,
        layer.position.x,
        layer.position.y,
        layer.position.z_index,
        layer.opacity
    );
    if layer.is_base {
        line.push_str(" [base]");
    }
    if !layer.visible {
        line.push_str(" [hidden]");
    }
    line
}
