//! Layer store - ordered layer collection with base and z-order invariants
//!
//! The store owns every [`Layer`] in a session. It allocates ids and z values
//! from its own counters, so paint order never depends on wall-clock time.
//! Equal `z_index` values are broken by insertion order (lower id first).
//! The base layer, if any, always paints first.

mod error;

pub use error::LayerError;

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{Bounds, Dimensions, Layer, LayerId, LayerUpdate, Position};
use crate::placement::{auto_place, PlacementConfig};
use crate::source::LayerSource;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, LayerError>;

/// Direction for [`LayerStore::reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// In-memory layer collection.
///
/// Cloning is cheap (pixel payloads are shared) and yields an independent
/// snapshot, which is what exports read from.
#[derive(Debug, Clone)]
pub struct LayerStore {
    /// Layers in insertion order
    layers: Vec<Layer>,
    next_id: u64,
    next_z: i32,
    revision: u64,
    placement: PlacementConfig,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// z value assigned to the base layer.
    pub const BASE_Z_INDEX: i32 = 0;

    pub fn new() -> Self {
        Self::with_placement(PlacementConfig::default())
    }

    pub fn with_placement(placement: PlacementConfig) -> Self {
        Self { layers: Vec::new(), next_id: 1, next_z: 1, revision: 0, placement }
    }

    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Probe `source` and add it as a new layer.
    ///
    /// The base layer is placed at the origin with the minimal z value.
    /// Other layers are auto-placed against the base bounds and stacked on
    /// top of every existing layer.
    pub fn add_layer(&mut self, source: LayerSource, is_base: bool) -> Result<&Layer> {
        if is_base && self.base().is_some() {
            return Err(LayerError::forbidden("replace"));
        }

        let name = source.display_name();
        let (image, dimensions) = source.probe()?;

        let position = if is_base {
            Position::new(0, 0, Self::BASE_Z_INDEX)
        } else {
            let (x, y) = self.suggest_position(dimensions);
            Position::new(x, y, self.allocate_z())
        };

        let id = LayerId(self.next_id);
        self.next_id += 1;

        debug!(%id, %name, ?dimensions, ?position, is_base, "layer added");
        self.layers.push(Layer {
            id,
            name,
            image,
            dimensions,
            position,
            opacity: 1.0,
            visible: true,
            is_base,
        });
        self.touch();

        let index = self.layers.len() - 1;
        Ok(&self.layers[index])
    }

    /// Where a new layer of `size` would be placed right now.
    pub fn suggest_position(&self, size: Dimensions) -> (i32, i32) {
        let base = self.base().map(Layer::bounds);
        let occupied: Vec<Bounds> =
            self.layers.iter().filter(|l| !l.is_base).map(Layer::bounds).collect();
        auto_place(size, base, &occupied, &self.placement)
    }

    /// Merge `update` into the layer with `id`.
    pub fn update_layer(&mut self, id: LayerId, update: LayerUpdate) -> Result<()> {
        let layer = self.get_mut(id).ok_or(LayerError::NotFound(id))?;

        if let Some(name) = update.name {
            layer.name = name;
        }
        if let Some(x) = update.x {
            layer.position.x = x;
        }
        if let Some(y) = update.y {
            layer.position.y = y;
        }
        if let Some(z) = update.z_index {
            layer.position.z_index = z;
        }
        if let Some(opacity) = update.opacity {
            layer.opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
        }
        if let Some(visible) = update.visible {
            layer.visible = visible;
        }

        debug!(%id, "layer updated");
        self.touch();
        Ok(())
    }

    /// Remove a layer permanently. The base layer cannot be deleted.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<Layer> {
        let index = self.index_of(id).ok_or(LayerError::NotFound(id))?;
        if self.layers[index].is_base {
            return Err(LayerError::forbidden("delete"));
        }

        let removed = self.layers.remove(index);
        debug!(%id, name = %removed.name, "layer deleted");
        self.touch();
        Ok(removed)
    }

    /// Move a layer one step up or down in paint order.
    ///
    /// The target's z becomes its neighbour's z plus or minus one. If that
    /// cannot express the swap without disturbing other layers (a tie or
    /// overtake with the next layer), the non-base layers are renumbered
    /// contiguously in the swapped order. Moving past the top or bottom is
    /// a no-op.
    pub fn reorder(&mut self, id: LayerId, direction: Direction) -> Result<()> {
        let target = self.get(id).ok_or(LayerError::NotFound(id))?;
        if target.is_base {
            return Err(LayerError::forbidden("reorder"));
        }

        let order = self.non_base_order();
        let Some(index) = order.iter().position(|other| *other == id) else {
            return Err(LayerError::NotFound(id));
        };
        let neighbor_index = match direction {
            Direction::Up if index + 1 < order.len() => index + 1,
            Direction::Down if index > 0 => index - 1,
            _ => return Ok(()),
        };

        let mut desired = order.clone();
        desired.swap(index, neighbor_index);

        let neighbor = order[neighbor_index];
        let neighbor_z =
            self.get(neighbor).map(|l| l.position.z_index).ok_or(LayerError::NotFound(neighbor))?;
        let new_z = match direction {
            Direction::Up => neighbor_z.saturating_add(1),
            Direction::Down => neighbor_z.saturating_sub(1),
        };
        if let Some(layer) = self.get_mut(id) {
            layer.position.z_index = new_z;
        }

        if self.non_base_order() != desired {
            debug!(%id, ?direction, "z keys exhausted, renumbering stack");
            for (rank, layer_id) in desired.iter().enumerate() {
                if let Some(layer) = self.get_mut(*layer_id) {
                    layer.position.z_index = rank as i32 + 1;
                }
            }
        }
        self.next_z = self.next_z.max(self.max_z().saturating_add(1));

        debug!(%id, ?direction, "layer reordered");
        self.touch();
        Ok(())
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Look up a layer by its current name (first match in insertion order).
    pub fn find_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn base(&self) -> Option<&Layer> {
        self.layers.iter().find(|l| l.is_base)
    }

    /// Layers in insertion order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in paint order: base first, then ascending z, ties by insertion.
    pub fn stack(&self) -> Vec<&Layer> {
        let mut stack: Vec<&Layer> = self.layers.iter().collect();
        stack.sort_by(|a, b| paint_order(a, b));
        stack
    }

    /// Layers top-to-bottom, as a layer panel lists them.
    pub fn listing(&self) -> Vec<&Layer> {
        let mut listing = self.stack();
        listing.reverse();
        listing
    }

    /// Incremented on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    fn non_base_order(&self) -> Vec<LayerId> {
        self.stack().into_iter().filter(|l| !l.is_base).map(|l| l.id).collect()
    }

    fn max_z(&self) -> i32 {
        self.layers
            .iter()
            .filter(|l| !l.is_base)
            .map(|l| l.position.z_index)
            .max()
            .unwrap_or(Self::BASE_Z_INDEX)
    }

    /// Next z value, always above every existing non-base layer.
    fn allocate_z(&mut self) -> i32 {
        let z = self.next_z.max(self.max_z().saturating_add(1));
        self.next_z = z.saturating_add(1);
        z
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Total paint order over layers.
pub fn paint_order(a: &Layer, b: &Layer) -> Ordering {
    b.is_base
        .cmp(&a.is_base)
        .then(a.position.z_index.cmp(&b.position.z_index))
        .then(a.id.cmp(&b.id))
}
