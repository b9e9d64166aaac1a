//! Drag state machine: `Idle -> Dragging(layer, offset) -> Idle`

use tracing::debug;

use crate::models::{Bounds, LayerId, LayerUpdate};
use crate::store::{LayerError, LayerStore};

use super::snap::{snap_position, Snapped};
use super::SnapConfig;

/// Current pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is held on `layer`; `offset` is the pointer position relative
    /// to the layer's top-left corner at pointer-down.
    Dragging { layer: LayerId, offset: (i32, i32) },
}

/// Turns pointer events into snapped layer moves.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    snap: SnapConfig,
}

impl DragController {
    pub fn new(snap: SnapConfig) -> Self {
        Self { state: DragState::Idle, snap }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn snap_config(&self) -> &SnapConfig {
        &self.snap
    }

    pub fn set_snap_config(&mut self, snap: SnapConfig) {
        self.snap = snap;
    }

    /// Start dragging `layer` with the pointer at `pointer`.
    pub fn pointer_down(
        &mut self,
        store: &LayerStore,
        layer: LayerId,
        pointer: (i32, i32),
    ) -> Result<(), LayerError> {
        let target = store.get(layer).ok_or(LayerError::NotFound(layer))?;
        if target.is_base {
            return Err(LayerError::forbidden("drag"));
        }

        let offset = (
            pointer.0.saturating_sub(target.position.x),
            pointer.1.saturating_sub(target.position.y),
        );
        debug!(%layer, ?offset, "drag started");
        self.state = DragState::Dragging { layer, offset };
        Ok(())
    }

    /// Move the dragged layer to follow the pointer.
    ///
    /// Returns `Ok(None)` while idle. If the dragged layer disappeared
    /// mid-drag the controller returns to `Idle` and reports `NotFound`.
    pub fn pointer_move(
        &mut self,
        store: &mut LayerStore,
        pointer: (i32, i32),
    ) -> Result<Option<Snapped>, LayerError> {
        let DragState::Dragging { layer, offset } = self.state else {
            return Ok(None);
        };

        let Some(target) = store.get(layer) else {
            self.state = DragState::Idle;
            return Err(LayerError::NotFound(layer));
        };

        let proposed = Bounds::at(
            pointer.0.saturating_sub(offset.0),
            pointer.1.saturating_sub(offset.1),
            target.dimensions,
        );
        let others: Vec<Bounds> = store
            .stack()
            .into_iter()
            .filter(|other| other.id != layer && other.visible)
            .map(|other| other.bounds())
            .collect();

        let snapped = snap_position(proposed, &others, &self.snap);
        store.update_layer(layer, LayerUpdate::position(snapped.x, snapped.y))?;
        Ok(Some(snapped))
    }

    /// Release the pointer. Returns the layer that was being dragged, if any.
    pub fn pointer_up(&mut self) -> Option<LayerId> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { layer, .. } => {
                debug!(%layer, "drag finished");
                Some(layer)
            }
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_support::solid_png;
    use crate::source::LayerSource;

    fn store_with_base() -> (LayerStore, LayerId, LayerId) {
        let mut store = LayerStore::new();
        let base = store
            .add_layer(
                LayerSource::from_bytes("base.png", solid_png(100, 100, [0, 0, 0, 255])),
                true,
            )
            .unwrap()
            .id;
        let hat = store
            .add_layer(
                LayerSource::from_bytes("hat.png", solid_png(20, 20, [255, 0, 0, 255])),
                false,
            )
            .unwrap()
            .id;
        (store, base, hat)
    }

    fn no_snap() -> SnapConfig {
        SnapConfig { snap_to_grid: false, snap_to_layers: false, ..Default::default() }
    }

    #[test]
    fn test_idle_move_is_noop() {
        let (mut store, _, _) = store_with_base();
        let mut drag = DragController::default();
        assert_eq!(drag.pointer_move(&mut store, (10, 10)).unwrap(), None);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_keeps_pointer_offset() {
        let (mut store, _, hat) = store_with_base();
        let mut drag = DragController::new(no_snap());

        drag.pointer_down(&store, hat, (5, 5)).unwrap();
        assert_eq!(drag.state(), DragState::Dragging { layer: hat, offset: (5, 5) });

        drag.pointer_move(&mut store, (55, 35)).unwrap();
        let moved = store.get(hat).unwrap();
        assert_eq!((moved.position.x, moved.position.y), (50, 30));

        assert_eq!(drag.pointer_up(), Some(hat));
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.pointer_up(), None);
    }

    #[test]
    fn test_drag_extreme_coordinates_saturate() {
        let (mut store, _, hat) = store_with_base();
        store.update_layer(hat, LayerUpdate::position(i32::MIN, i32::MIN)).unwrap();
        let mut drag = DragController::new(no_snap());

        drag.pointer_down(&store, hat, (i32::MAX, i32::MAX)).unwrap();
        assert_eq!(
            drag.state(),
            DragState::Dragging { layer: hat, offset: (i32::MAX, i32::MAX) }
        );

        // Far past the top-left corner, clamped back onto the canvas
        drag.pointer_move(&mut store, (i32::MIN, i32::MIN)).unwrap();
        let moved = store.get(hat).unwrap();
        assert_eq!((moved.position.x, moved.position.y), (0, 0));
        drag.pointer_up();

        drag.pointer_down(&store, hat, (i32::MIN, 0)).unwrap();
        drag.pointer_move(&mut store, (i32::MAX, 0)).unwrap();
        let moved = store.get(hat).unwrap();
        assert_eq!((moved.position.x, moved.position.y), (i32::MAX, 0));
    }

    #[test]
    fn test_drag_base_forbidden() {
        let (store, base, _) = store_with_base();
        let mut drag = DragController::default();
        let err = drag.pointer_down(&store, base, (0, 0)).unwrap_err();
        assert_eq!(err, LayerError::Forbidden { action: "drag" });
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_unknown_layer() {
        let (store, _, _) = store_with_base();
        let mut drag = DragController::default();
        assert_eq!(
            drag.pointer_down(&store, LayerId(999), (0, 0)),
            Err(LayerError::NotFound(LayerId(999)))
        );
    }

    #[test]
    fn test_deleted_mid_drag_returns_to_idle() {
        let (mut store, _, hat) = store_with_base();
        let mut drag = DragController::new(no_snap());
        drag.pointer_down(&store, hat, (0, 0)).unwrap();
        store.delete_layer(hat).unwrap();

        let err = drag.pointer_move(&mut store, (10, 10)).unwrap_err();
        assert!(err.is_benign());
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_snaps_to_base_edge() {
        let (mut store, _, hat) = store_with_base();
        let mut drag = DragController::new(SnapConfig::default());
        drag.pointer_down(&store, hat, (0, 0)).unwrap();

        // Right edge lands at 97, 3px from the base's right edge at 100
        let snapped = drag.pointer_move(&mut store, (77, 40)).unwrap().unwrap();
        assert_eq!(snapped.x, 80);
        assert_eq!(store.get(hat).unwrap().position.x, 80);
    }

    #[test]
    fn test_hidden_layers_do_not_attract() {
        let (mut store, _, hat) = store_with_base();
        let scarf = store
            .add_layer(
                LayerSource::from_bytes("scarf.png", solid_png(10, 10, [0, 255, 0, 255])),
                false,
            )
            .unwrap()
            .id;
        store.update_layer(scarf, LayerUpdate::position(60, 60)).unwrap();
        store.update_layer(scarf, LayerUpdate::visible(false)).unwrap();

        let config = SnapConfig { threshold: 3, ..Default::default() };
        let mut drag = DragController::new(config);
        drag.pointer_down(&store, hat, (0, 0)).unwrap();
        drag.pointer_move(&mut store, (62, 62)).unwrap();

        let moved = store.get(hat).unwrap();
        assert_eq!((moved.position.x, moved.position.y), (62, 62));
    }
}
