//! Godot engine resource description.
//!
//! Writes the layer stack as a Godot text resource (`.tres`) holding the
//! same per-layer metadata as the manifest plus the canvas size and export
//! name.
//!
//! # Output Format
//!
//! ```text
//! [gd_resource type="Resource" format=3]
//!
//! [resource]
//! resource_name = "hero"
//! layers = [{
//! "id": 1,
//! "name": "body",
//! "size": Vector2(32, 32),
//! "position": Vector2(0, 0),
//! "z_index": 0,
//! "opacity": 1.0,
//! "visible": true,
//! "is_base": true
//! }]
//! canvas_size = Vector2(64, 64)
//! export_name = "hero"
//! ```
//!
//! With a texture reference enabled the composite PNG is linked as an
//! external resource:
//!
//! ```text
//! [gd_resource type="Resource" load_steps=2 format=3]
//!
//! [ext_resource type="Texture2D" path="res://characters/hero.png" id="1"]
//!
//! [resource]
//! texture = ExtResource("1")
//! ...
//! ```

use std::fmt::Write as _;

use crate::export::{ExportError, ExportOptions, Exporter};
use crate::models::{ExportConfig, Layer};
use crate::store::LayerStore;

/// Default `res://` directory the composite texture is expected under.
pub const DEFAULT_RESOURCE_PATH: &str = "res://assets/sprites";

/// Godot format exporter.
#[derive(Debug, Clone)]
pub struct GodotExporter {
    /// Resource path prefix
    resource_path: String,
    /// Link the composite PNG as an ExtResource
    texture: bool,
}

impl Default for GodotExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GodotExporter {
    /// Create a new Godot exporter with default settings.
    pub fn new() -> Self {
        Self { resource_path: DEFAULT_RESOURCE_PATH.to_string(), texture: false }
    }

    /// Create a Godot exporter with custom resource path.
    pub fn with_resource_path(mut self, path: &str) -> Self {
        self.resource_path = path.trim_end_matches('/').to_string();
        self
    }

    /// Enable or disable the texture reference to `<resource_path>/<name>.png`.
    pub fn with_texture(mut self, enabled: bool) -> Self {
        self.texture = enabled;
        self
    }

    /// Build the resource path for a file.
    fn resource_path_for(&self, filename: &str) -> String {
        format!("{}/{}", self.resource_path, filename)
    }

    fn layer_record(layer: &Layer, pretty: bool) -> String {
        let fields = [
            format!("\"id\": {}", layer.id),
            format!("\"name\": {}", quote(&layer.name)),
            format!("\"size\": Vector2({}, {})", layer.dimensions.width, layer.dimensions.height),
            format!("\"position\": Vector2({}, {})", layer.position.x, layer.position.y),
            format!("\"z_index\": {}", layer.position.z_index),
            format!("\"opacity\": {:?}", layer.opacity),
            format!("\"visible\": {}", layer.visible),
            format!("\"is_base\": {}", layer.is_base),
        ];
        if pretty {
            format!("{{\n{}\n}}", fields.join(",\n"))
        } else {
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

impl Exporter for GodotExporter {
    fn export_to_string(
        &self,
        store: &LayerStore,
        config: &ExportConfig,
        options: &ExportOptions,
    ) -> Result<String, ExportError> {
        let mut out = String::new();
        let name = quote(&config.name);

        // Writing into a String cannot fail
        if self.texture {
            let _ = writeln!(out, "[gd_resource type=\"Resource\" load_steps=2 format=3]");
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "[ext_resource type=\"Texture2D\" path={} id=\"1\"]",
                quote(&self.resource_path_for(&format!("{}.png", config.name)))
            );
        } else {
            let _ = writeln!(out, "[gd_resource type=\"Resource\" format=3]");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "[resource]");
        let _ = writeln!(out, "resource_name = {}", name);
        if self.texture {
            let _ = writeln!(out, "texture = ExtResource(\"1\")");
        }

        let records: Vec<String> = store
            .stack()
            .into_iter()
            .map(|layer| Self::layer_record(layer, options.pretty))
            .collect();
        let _ = writeln!(out, "layers = [{}]", records.join(", "));
        let _ = writeln!(out, "canvas_size = Vector2({}, {})", config.width, config.height);
        let _ = writeln!(out, "export_name = {}", name);

        Ok(out)
    }

    fn format_name(&self) -> &'static str {
        "godot"
    }

    fn extension(&self) -> &'static str {
        "tres"
    }
}

/// Quote a string for a Godot text resource.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
