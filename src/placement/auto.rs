//! Collision-avoiding default positions for newly added layers

use tracing::debug;

use crate::models::{Bounds, Dimensions};

use super::PlacementConfig;

/// Suggest a top-left position for a new layer of `size`.
///
/// Algorithm:
/// 1. Without a base reference, place at the origin
/// 2. If the layer is wider or taller than the base, center it in the base
/// 3. Otherwise scan grid-stepped candidates row-major within the base and
///    return the first one that intersects none of `occupied`
/// 4. If every candidate collides, fall back to centering (overlap allowed)
///
/// ```
/// use spritestack::models::{Bounds, Dimensions};
/// use spritestack::placement::{auto_place, PlacementConfig};
///
/// let base = Bounds::new(0, 0, 100, 100);
/// let first = Bounds::new(0, 0, 20, 20);
/// let config = PlacementConfig::default();
/// let pos = auto_place(Dimensions::new(20, 20), Some(base), &[first], &config);
/// assert_eq!(pos, (32, 0));
/// ```
pub fn auto_place(
    size: Dimensions,
    base: Option<Bounds>,
    occupied: &[Bounds],
    config: &PlacementConfig,
) -> (i32, i32) {
    let Some(base) = base else {
        return (0, 0);
    };

    if size.width > base.width || size.height > base.height {
        let pos = center_in(size, base);
        debug!(?size, ?pos, "layer exceeds base bounds, centering");
        return pos;
    }

    let step = config.grid_step.max(1) as usize;
    let max_y = base.bottom() - size.height as i64;
    let max_x = base.right() - size.width as i64;

    for y in (base.y as i64..=max_y).step_by(step) {
        for x in (base.x as i64..=max_x).step_by(step) {
            let candidate = Bounds::at(x as i32, y as i32, size);
            if !occupied.iter().any(|other| candidate.intersects(other)) {
                return (candidate.x, candidate.y);
            }
        }
    }

    let pos = center_in(size, base);
    debug!(?size, ?pos, "no free grid slot, centering");
    pos
}

/// Center `size` within `base`, clamping each coordinate to be non-negative.
pub fn center_in(size: Dimensions, base: Bounds) -> (i32, i32) {
    let offset = |origin: i32, outer: u32, inner: u32| -> i32 {
        let value = origin as i64 + (outer as i64 - inner as i64).div_euclid(2);
        value.clamp(0, i32::MAX as i64) as i32
    };
    (offset(base.x, base.width, size.width), offset(base.y, base.height, size.height))
}
