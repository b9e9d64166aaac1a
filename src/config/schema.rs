//! Configuration schema types for `spritestack.toml`
//!
//! Defines the structure and validation rules for composer configuration.
//! Every section and field is optional; missing values fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::composition::{surface_bytes, MAX_SURFACE_BYTES};
use crate::export::godot::DEFAULT_RESOURCE_PATH;
use crate::models::ExportConfig;
use crate::placement::{PlacementConfig, SnapConfig};

/// Export target section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Export name used for file stems and resource names
    #[serde(default = "default_name")]
    pub name: String,
    /// Canvas width in pixels
    #[serde(default = "default_size")]
    pub width: u32,
    /// Canvas height in pixels
    #[serde(default = "default_size")]
    pub height: u32,
    /// Pretty-print text artifacts
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// `res://` prefix for the Godot texture reference
    #[serde(default = "default_resource_path")]
    pub resource_path: String,
}

fn default_name() -> String {
    ExportConfig::DEFAULT_NAME.to_string()
}

fn default_size() -> u32 {
    ExportConfig::DEFAULT_SIZE
}

fn default_pretty() -> bool {
    true
}

fn default_resource_path() -> String {
    DEFAULT_RESOURCE_PATH.to_string()
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            width: default_size(),
            height: default_size(),
            pretty: default_pretty(),
            resource_path: default_resource_path(),
        }
    }
}

impl ExportSection {
    /// The export canvas described by this section.
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::new(self.name.clone(), self.width, self.height)
    }
}

/// Root configuration structure for spritestack.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpritestackConfig {
    /// Export target
    #[serde(default)]
    pub export: ExportSection,
    /// Auto-placement of new layers
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Drag snapping
    #[serde(default)]
    pub snap: SnapConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "export.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spritestack.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritestackConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.export.name.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "export.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        let positive = [
            ("export.width", self.export.width),
            ("export.height", self.export.height),
            ("placement.grid_step", self.placement.grid_step),
            ("snap.grid_size", self.snap.grid_size),
        ];
        for (field, value) in positive {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        if surface_bytes(self.export.width, self.export.height) > MAX_SURFACE_BYTES {
            errors.push(ConfigValidationError {
                field: "export.width".to_string(),
                message: format!(
                    "{}x{} canvas exceeds the {} byte surface limit",
                    self.export.width, self.export.height, MAX_SURFACE_BYTES
                ),
            });
        }

        errors
    }
}
