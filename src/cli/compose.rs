//! Compose command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Args;
use tracing::info;

use crate::catalog::AssetCatalog;
use crate::config::{self, CliOverrides, SpritestackConfig};
use crate::export::{export_png, ExportOptions, Exporter, GodotExporter, ManifestExporter};
use crate::models::LayerUpdate;
use crate::source::LayerSource;
use crate::store::LayerStore;

use super::{parse_size, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Arguments for `spritestack compose`
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Layer image files, added above the base in order
    pub layers: Vec<PathBuf>,

    /// Base layer image (painted first, fixed at 0,0)
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Catalog asset to add as a layer, as CATEGORY/FILE (repeatable)
    #[arg(long = "asset", value_name = "CATEGORY/FILE")]
    pub assets: Vec<String>,

    /// Catalog directory for --asset
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Export name
    #[arg(long)]
    pub name: Option<String>,

    /// Export canvas size (e.g., 64x64)
    #[arg(long)]
    pub size: Option<String>,

    /// Composite PNG output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON manifest output path
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Godot resource description output path
    #[arg(long)]
    pub resource: Option<PathBuf>,

    /// Hide the layer with this name (repeatable)
    #[arg(long)]
    pub hide: Vec<String>,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,

    /// Godot res:// directory for the texture reference
    #[arg(long, value_name = "RES_PATH")]
    pub resource_path: Option<String>,

    /// Auto-placement grid step in pixels
    #[arg(long, value_name = "PX")]
    pub grid_step: Option<u32>,

    /// Path to spritestack.toml (default: discovered from the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute the compose command
pub fn run_compose(args: &ComposeArgs) -> ExitCode {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(code) => return code,
    };

    if args.base.is_none() && args.layers.is_empty() && args.assets.is_empty() {
        eprintln!("Error: Nothing to compose. Pass layer files, --base or --asset");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let catalog = match (&args.catalog, args.assets.is_empty()) {
        (_, true) => None,
        (Some(dir), false) => match AssetCatalog::scan(dir) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                eprintln!("Error: Cannot read catalog '{}': {}", dir.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        (None, false) => {
            eprintln!("Error: --asset requires --catalog");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut store = LayerStore::with_placement(config.placement);

    if let Some(ref base) = args.base {
        if let Err(code) = add_file(&mut store, base, true) {
            return code;
        }
    }
    for path in &args.layers {
        if let Err(code) = add_file(&mut store, path, false) {
            return code;
        }
    }
    if let Some(ref catalog) = catalog {
        for asset in &args.assets {
            if let Err(code) = add_asset(&mut store, catalog, asset) {
                return code;
            }
        }
    }

    for name in &args.hide {
        match store.find_by_name(name).map(|l| l.id) {
            Some(id) => {
                if let Err(e) = store.update_layer(id, LayerUpdate::visible(false)) {
                    eprintln!("Warning: {}", e);
                }
            }
            None => eprintln!("Warning: No layer named '{}' to hide", name),
        }
    }

    write_artifacts(&store, &config, args)
}

/// Load config, apply flags and validate.
fn resolve_config(args: &ComposeArgs) -> Result<SpritestackConfig, ExitCode> {
    let size = match args.size.as_deref().map(parse_size).transpose() {
        Ok(size) => size,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    let overrides = CliOverrides {
        name: args.name.clone(),
        size,
        pretty: args.compact.then_some(false),
        resource_path: args.resource_path.clone(),
        grid_step: args.grid_step,
    };
    config::merge_cli_overrides(&mut config, &overrides);

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

fn add_file(store: &mut LayerStore, path: &Path, is_base: bool) -> Result<(), ExitCode> {
    let source = LayerSource::from_path(path).map_err(|e| {
        eprintln!("Error: Cannot open input file '{}': {}", path.display(), e);
        ExitCode::from(EXIT_ERROR)
    })?;
    add_source(store, source, is_base)
}

fn add_asset(store: &mut LayerStore, catalog: &AssetCatalog, asset: &str) -> Result<(), ExitCode> {
    let Some((category, filename)) = asset.split_once('/') else {
        eprintln!("Error: Invalid asset '{}'. Use CATEGORY/FILE", asset);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    };
    let source = catalog.open(category, filename).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    add_source(store, source, false)
}

fn add_source(store: &mut LayerStore, source: LayerSource, is_base: bool) -> Result<(), ExitCode> {
    match store.add_layer(source, is_base) {
        Ok(layer) => {
            info!(
                id = %layer.id,
                name = %layer.name,
                x = layer.position.x,
                y = layer.position.y,
                "added layer"
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Write every requested artifact. With none requested, writes `<name>.png`.
fn write_artifacts(store: &LayerStore, config: &SpritestackConfig, args: &ComposeArgs) -> ExitCode {
    let export_config = config.export.export_config();
    let options = ExportOptions { pretty: config.export.pretty };

    let png_path = match (&args.output, &args.manifest, &args.resource) {
        (Some(path), _, _) => Some(path.clone()),
        (None, None, None) => Some(PathBuf::from(format!("{}.png", export_config.name))),
        _ => None,
    };

    if let Some(ref path) = png_path {
        match export_png(store, &export_config, path) {
            Ok(warnings) => {
                for warning in warnings {
                    eprintln!("Warning: {}", warning);
                }
                println!("Saved: {}", path.display());
            }
            Err(e) => {
                eprintln!("Error: Failed to save image '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if let Some(ref path) = args.manifest {
        if let Err(e) = ManifestExporter::new().export(store, &export_config, path, &options) {
            eprintln!("Error: Failed to write manifest '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", path.display());
    }

    if let Some(ref path) = args.resource {
        let exporter = GodotExporter::new()
            .with_resource_path(&config.export.resource_path)
            .with_texture(png_path.is_some());
        if let Err(e) = exporter.export(store, &export_config, path, &options) {
            eprintln!("Error: Failed to write resource '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}
