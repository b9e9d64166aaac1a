//! Assets command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::catalog::AssetCatalog;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the assets command
pub fn run_assets(dir: &Path, json: bool) -> ExitCode {
    let catalog = match AssetCatalog::scan(dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: Cannot read catalog '{}': {}", dir.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(catalog.load_assets()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    for (category, assets) in catalog.load_assets() {
        println!("{} ({})", category, assets.len());
        for asset in assets {
            match catalog.grid_for(category, &asset.filename) {
                Some(grid) => println!(
                    "  {:<24} {}  [{}x{} grid of {}x{}]",
                    asset.filename,
                    asset.display_name,
                    grid.cols,
                    grid.rows,
                    grid.cell_width,
                    grid.cell_height
                ),
                None => println!("  {:<24} {}", asset.filename, asset.display_name),
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
