//! Grid and edge/center snapping for in-progress drags

use crate::models::Bounds;

use super::SnapConfig;

/// Result of snapping a proposed drag position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapped {
    pub x: i32,
    pub y: i32,
    /// Vertical guide line the x axis aligned to, if any
    pub guide_x: Option<i32>,
    /// Horizontal guide line the y axis aligned to, if any
    pub guide_y: Option<i32>,
}

/// Snap a dragged layer's proposed bounds.
///
/// Grid snap runs first; then each axis independently aligns the dragged
/// layer's start, center or end line to the start, center or end line of
/// any layer in `others` within `threshold` pixels. The closest candidate
/// wins; equal distances keep the earliest one in `others`. Results are
/// clamped to be non-negative; an axis moved by the clamp reports no guide.
///
/// ```
/// use spritestack::models::Bounds;
/// use spritestack::placement::{snap_position, SnapConfig};
///
/// let other = Bounds::new(40, 0, 20, 20);
/// let snapped = snap_position(Bounds::new(37, 50, 20, 10), &[other], &SnapConfig::default());
/// assert_eq!(snapped.x, 40);
/// ```
pub fn snap_position(proposed: Bounds, others: &[Bounds], config: &SnapConfig) -> Snapped {
    let mut x = proposed.x as i64;
    let mut y = proposed.y as i64;

    if config.snap_to_grid && config.grid_size > 0 {
        x = round_to_multiple(x, config.grid_size as i64);
        y = round_to_multiple(y, config.grid_size as i64);
    }

    let mut guide_x = None;
    let mut guide_y = None;

    if config.snap_to_layers {
        let threshold = config.threshold as i64;

        let x_lines = others.iter().flat_map(|b| reference_lines(b.x as i64, b.width));
        if let Some((aligned, guide)) = nearest_alignment(x, proposed.width, x_lines, threshold) {
            x = aligned;
            guide_x = Some(guide as i32);
        }

        let y_lines = others.iter().flat_map(|b| reference_lines(b.y as i64, b.height));
        if let Some((aligned, guide)) = nearest_alignment(y, proposed.height, y_lines, threshold) {
            y = aligned;
            guide_y = Some(guide as i32);
        }
    }

    let (clamped_x, clamped_y) = (clamp_coord(x), clamp_coord(y));
    Snapped {
        x: clamped_x,
        y: clamped_y,
        guide_x: guide_x.filter(|_| clamped_x as i64 == x),
        guide_y: guide_y.filter(|_| clamped_y as i64 == y),
    }
}

/// Round `value` to the nearest multiple of `grid`, halves away from zero.
pub fn round_to_multiple(value: i64, grid: i64) -> i64 {
    let rem = value.rem_euclid(grid);
    let down = value - rem;
    if rem * 2 >= grid {
        if value >= 0 || rem * 2 > grid {
            down + grid
        } else {
            down
        }
    } else {
        down
    }
}

/// Start, center and end lines of a span along one axis.
fn reference_lines(start: i64, extent: u32) -> [i64; 3] {
    let extent = extent as i64;
    [start, start + extent / 2, start + extent]
}

/// Find the closest guide line for a span starting at `start`.
///
/// Returns the new span start and the guide line it aligned to.
fn nearest_alignment(
    start: i64,
    extent: u32,
    guides: impl Iterator<Item = i64>,
    threshold: i64,
) -> Option<(i64, i64)> {
    let own = reference_lines(0, extent);
    let mut best: Option<(i64, i64, i64)> = None;

    for guide in guides {
        for offset in own {
            let distance = (guide - (start + offset)).abs();
            if distance > threshold {
                continue;
            }
            if best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, guide - offset, guide));
            }
        }
    }

    best.map(|(_, aligned, guide)| (aligned, guide))
}

fn clamp_coord(value: i64) -> i32 {
    value.clamp(0, i32::MAX as i64) as i32
}
