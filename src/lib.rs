//! Spritestack - layered character sprite composer
//!
//! This library provides functionality to:
//! - Keep an ordered stack of image layers with position, z-order, opacity and visibility
//! - Suggest non-overlapping positions for new layers and snap dragged layers
//! - Flatten the visible stack to PNG
//! - Describe the stack as a JSON manifest or a Godot text resource

pub mod catalog;
pub mod cli;
pub mod composition;
pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod output;
pub mod placement;
pub mod source;
pub mod store;
