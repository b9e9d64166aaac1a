//! Placement engine - default positions for new layers and drag snapping

mod auto;
mod drag;
mod snap;

// Re-export public API
pub use auto::{auto_place, center_in};
pub use drag::{DragController, DragState};
pub use snap::{round_to_multiple, snap_position, Snapped};

use serde::{Deserialize, Serialize};

/// Auto-placement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Step between candidate top-left positions, in pixels
    pub grid_step: u32,
}

impl PlacementConfig {
    pub const DEFAULT_GRID_STEP: u32 = 32;
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { grid_step: Self::DEFAULT_GRID_STEP }
    }
}

/// Interactive drag snapping settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Round positions to the nearest grid line before layer snapping
    pub snap_to_grid: bool,
    /// Grid spacing in pixels
    pub grid_size: u32,
    /// Align edges and centers with other visible layers
    pub snap_to_layers: bool,
    /// Maximum distance in pixels at which a reference line attracts
    pub threshold: u32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { snap_to_grid: false, grid_size: 16, snap_to_layers: true, threshold: 8 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_config_default() {
        assert_eq!(PlacementConfig::default().grid_step, 32);
    }

    #[test]
    fn test_snap_config_partial_toml() {
        let config: SnapConfig = toml::from_str("snap_to_grid = true").unwrap();
        assert!(config.snap_to_grid);
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.threshold, 8);
        assert!(config.snap_to_layers);
    }
}
