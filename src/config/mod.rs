//! Configuration for spritestack
//!
//! Provides types, discovery and loading for `spritestack.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
