//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod assets;
mod compose;
mod inspect;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use compose::ComposeArgs;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Spritestack - compose layered character sprites
#[derive(Parser)]
#[command(name = "spritestack")]
#[command(about = "Spritestack - stack sprite layers, auto-place them, export PNG/JSON/Godot")]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose layers into a sprite and export it
    Compose(ComposeArgs),

    /// Print the layer stack described by a manifest, top to bottom
    Inspect {
        /// Manifest JSON written by `compose --manifest`
        manifest: PathBuf,
    },

    /// List the categories and assets of a catalog directory
    Assets {
        /// Catalog root directory
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse a `WxH` size such as `64x48`.
pub(crate) fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid size format '{}'. Use WxH (e.g., 64x64)", s));
    }
    let w = parts[0].parse::<u32>().map_err(|_| format!("Invalid width in '{}'", s))?;
    let h = parts[1].parse::<u32>().map_err(|_| format!("Invalid height in '{}'", s))?;
    if w == 0 || h == 0 {
        return Err("Width and height must be greater than 0".to_string());
    }
    Ok((w, h))
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Commands::Compose(args) => compose::run_compose(&args),
        Commands::Inspect { manifest } => inspect::run_inspect(&manifest),
        Commands::Assets { dir, json } => assets::run_assets(&dir, json),
    }
}
