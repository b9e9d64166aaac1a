//! JSON layer manifest.
//!
//! Describes a layer stack without any pixel payload, so the artifact stays
//! small and can be re-imported by other tools.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "exportedAt": "2024-05-01T12:00:00Z",
//!   "layers": [
//!     {
//!       "id": 1,
//!       "name": "body",
//!       "dimensions": { "width": 32, "height": 32 },
//!       "position": { "x": 0, "y": 0, "zIndex": 0 },
//!       "opacity": 1.0,
//!       "visible": true,
//!       "isBase": true
//!     }
//!   ]
//! }
//! ```
//!
//! `isBase` is only written for the base layer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::export::{ExportError, ExportOptions, Exporter};
use crate::models::{Dimensions, ExportConfig, Layer, LayerId, Position};
use crate::store::LayerStore;

/// Manifest format version written by this crate.
pub const MANIFEST_VERSION: &str = "1.0";

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: String,
    /// RFC 3339 timestamp in UTC
    pub exported_at: String,
    /// Layers in paint order (base first)
    pub layers: Vec<ManifestLayer>,
}

/// One layer record. Never carries image data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestLayer {
    pub id: LayerId,
    pub name: String,
    pub dimensions: Dimensions,
    pub position: Position,
    pub opacity: f64,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_base: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<&Layer> for ManifestLayer {
    fn from(layer: &Layer) -> Self {
        Self {
            id: layer.id,
            name: layer.name.clone(),
            dimensions: layer.dimensions,
            position: layer.position,
            opacity: layer.opacity,
            visible: layer.visible,
            is_base: layer.is_base,
        }
    }
}

impl Manifest {
    /// Build a manifest of `store` stamped with the current time.
    pub fn from_store(store: &LayerStore) -> Self {
        Self::from_store_at(store, Utc::now())
    }

    /// Build a manifest of `store` stamped with `exported_at`.
    pub fn from_store_at(store: &LayerStore, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            layers: store.stack().into_iter().map(ManifestLayer::from).collect(),
        }
    }

    /// Parse a manifest previously written by [`ManifestExporter`].
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON text.
    pub fn to_json(&self, pretty: bool) -> Result<String, ExportError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Manifest exporter.
#[derive(Debug, Default)]
pub struct ManifestExporter;

impl ManifestExporter {
    /// Create a new manifest exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for ManifestExporter {
    fn export_to_string(
        &self,
        store: &LayerStore,
        _config: &ExportConfig,
        options: &ExportOptions,
    ) -> Result<String, ExportError> {
        Manifest::from_store(store).to_json(options.pretty)
    }

    fn format_name(&self) -> &'static str {
        "manifest"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
