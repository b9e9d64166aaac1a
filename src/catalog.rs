//! Asset catalog - predefined sprite assets grouped by category
//!
//! A catalog is a directory whose immediate subdirectories are categories
//! and whose image files are assets:
//!
//! ```text
//! assets/
//!   grid_mapping.json      (optional)
//!   bodies/
//!     knight_body.png
//!   hats/
//!     red-cap.png
//! ```
//!
//! The optional `grid_mapping.json` describes the sprite-sheet grid of
//! individual assets, keyed by `"<category>/<filename>"`. It is read-only
//! input produced by an external pre-processing step.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::source::{is_supported_image, LayerSource};

/// Name of the optional grid description file in the catalog root.
pub const GRID_MAPPING_FILE: &str = "grid_mapping.json";

/// Error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Unknown asset '{category}/{filename}'")]
    UnknownAsset { category: String, filename: String },
}

/// One predefined asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub filename: String,
    pub display_name: String,
}

/// Sprite-sheet grid inferred for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridInfo {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub confidence: f64,
}

/// Read-only mapping of category to assets.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    root: PathBuf,
    categories: BTreeMap<String, Vec<Asset>>,
    grids: BTreeMap<String, GridInfo>,
}

impl AssetCatalog {
    /// Scan `root` for categories and assets.
    pub fn scan(root: &Path) -> Result<Self, CatalogError> {
        let mut categories = BTreeMap::new();

        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(category) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let assets = scan_category(&path)?;
            debug!(category = %category, assets = assets.len(), "scanned category");
            categories.insert(category, assets);
        }

        let grids = load_grid_mapping(&root.join(GRID_MAPPING_FILE))?;

        Ok(Self { root: root.to_path_buf(), categories, grids })
    }

    /// Directory the catalog was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Category → assets, both sorted.
    pub fn load_assets(&self) -> &BTreeMap<String, Vec<Asset>> {
        &self.categories
    }

    /// Assets of one category.
    pub fn assets(&self, category: &str) -> Option<&[Asset]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Location of an asset on disk.
    pub fn resolve_path(&self, category: &str, filename: &str) -> Result<PathBuf, CatalogError> {
        let known = self
            .assets(category)
            .map(|assets| assets.iter().any(|a| a.filename == filename))
            .unwrap_or(false);
        if !known {
            return Err(CatalogError::UnknownAsset {
                category: category.to_string(),
                filename: filename.to_string(),
            });
        }
        Ok(self.root.join(category).join(filename))
    }

    /// Read an asset's bytes as a layer source.
    pub fn open(&self, category: &str, filename: &str) -> Result<LayerSource, CatalogError> {
        let path = self.resolve_path(category, filename)?;
        let bytes = fs::read(&path)?;
        Ok(LayerSource::from_bytes(filename, bytes))
    }

    /// Grid description for an asset, if the mapping file lists one.
    pub fn grid_for(&self, category: &str, filename: &str) -> Option<&GridInfo> {
        self.grids.get(&format!("{}/{}", category, filename))
    }
}

/// Supported image files directly inside a category directory, sorted.
fn scan_category(dir: &Path) -> Result<Vec<Asset>, CatalogError> {
    let pattern = format!("{}/*", Pattern::escape(&dir.to_string_lossy()));
    let paths = glob(&pattern)
        .map_err(|e| CatalogError::Parse { path: dir.to_path_buf(), message: e.to_string() })?;

    let mut assets = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() && is_supported_image(&path) => {
                if let Some(filename) = path.file_name().map(|n| n.to_string_lossy().into_owned()) {
                    assets.push(Asset { display_name: display_name(&filename), filename });
                }
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "skipping unreadable catalog entry"),
        }
    }

    assets.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(assets)
}

fn load_grid_mapping(path: &Path) -> Result<BTreeMap<String, GridInfo>, CatalogError> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CatalogError::Parse { path: path.to_path_buf(), message: e.to_string() })
}

/// Human-readable name from a file name: `red-cap_large.png` → `Red Cap Large`.
pub fn display_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    stem.split(|c| c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
