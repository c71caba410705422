//! Item dragging - pointer gestures to `MOVE_ITEM` intents.
//!
//! One `ItemDrag` exists per interactive item. On press it selects and raises
//! the item, captures the pointer and anchors the gesture at the item's
//! press-time position. Every move dispatches an absolute position computed
//! from that anchor, so rounding never compounds across move events.
//!
//! ## Scale compensation
//!
//! The board may be rendered shrunk. A screen delta is divided by the current
//! scale before it is applied: at scale 0.5, 1 screen pixel is 2 board pixels.
//!
//! ## Performance Notes
//!
//! Pointer move fires at display rate. Moves for foreign pointers exit early
//! and repeated targets are not re-dispatched.

use super::capture::PointerCapture;
use super::coords::{CoordinateConverter, Point};
use super::events::PointerEvent;
use super::state::DragState;
use crate::intent::BoardIntent;
use crate::profile_scope;
use crate::scale::ScaleHandle;
use crate::store::Dispatcher;
use crate::types::ItemId;
use tracing::{debug, trace, warn};

/// Drag interaction for one item.
#[derive(Debug, Clone)]
pub struct ItemDrag {
    item_id: ItemId,
    state: DragState,
    scale: ScaleHandle,
}

impl ItemDrag {
    pub fn new(item_id: ItemId, scale: ScaleHandle) -> Self {
        Self {
            item_id,
            state: DragState::Idle,
            scale,
        }
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Pointer pressed on the item whose current board position is
    /// `item_position`.
    ///
    /// Dispatches `SELECT_ITEM` and `BRING_TO_FRONT`, then enters `Dragging`.
    /// Returns false if the press was ignored (a gesture is already running,
    /// or the pointer is owned elsewhere).
    pub fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        item_position: Point,
        capture: &mut impl PointerCapture,
        dispatcher: &mut impl Dispatcher,
    ) -> bool {
        if self.state.is_dragging() {
            trace!(item = %self.item_id, pointer = %event.pointer_id, "Press ignored, already dragging");
            return false;
        }

        if let Err(e) = capture.capture(event.pointer_id, &self.item_id) {
            warn!(item = %self.item_id, "Cannot start drag: {}", e);
            return false;
        }

        dispatcher.dispatch(BoardIntent::select(self.item_id.clone()));
        dispatcher.dispatch(BoardIntent::BringToFront {
            id: self.item_id.clone(),
        });

        self.state
            .start_dragging(event.pointer_id, item_position, event.position);
        debug!(
            item = %self.item_id,
            pointer = %event.pointer_id,
            x = item_position.x,
            y = item_position.y,
            "Drag started"
        );
        true
    }

    /// Pointer moved. Dispatches `MOVE_ITEM` with the anchor plus the
    /// scale-compensated delta; returns whether an intent was dispatched.
    pub fn on_pointer_move(&mut self, event: &PointerEvent, dispatcher: &mut impl Dispatcher) -> bool {
        profile_scope!("item_drag_move");

        if !self.state.is_driven_by(event.pointer_id) {
            return false;
        }
        let (Some(item_origin), Some(pointer_origin)) =
            (self.state.item_origin(), self.state.pointer_origin())
        else {
            return false;
        };

        let scale = self.scale.get();
        if !scale.is_finite() || scale <= 0.0 {
            warn!(scale, "Skipping drag move with unusable scale");
            return false;
        }

        let delta = CoordinateConverter::delta_screen_to_board(event.position - pointer_origin, scale);
        let target = item_origin + delta;
        if !self.state.record_target(target) {
            return false;
        }

        trace!(item = %self.item_id, x = target.x, y = target.y, "Drag move");
        dispatcher.dispatch(BoardIntent::MoveItem {
            id: self.item_id.clone(),
            x: target.x,
            y: target.y,
        });
        true
    }

    /// Pointer released. Ends the gesture; no intents are dispatched.
    pub fn on_pointer_up(&mut self, event: &PointerEvent, capture: &mut impl PointerCapture) -> bool {
        self.finish(event, capture, "released")
    }

    /// Gesture interrupted by the platform. Handled exactly like release.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent, capture: &mut impl PointerCapture) -> bool {
        self.finish(event, capture, "cancelled")
    }

    /// Tear down a running gesture (item removed or view unmounted).
    pub fn abort(&mut self, capture: &mut impl PointerCapture) -> bool {
        let Some(pointer) = self.state.pointer_id() else {
            return false;
        };
        capture.release(pointer, &self.item_id);
        self.state.reset();
        debug!(item = %self.item_id, %pointer, "Drag aborted");
        true
    }

    fn finish(&mut self, event: &PointerEvent, capture: &mut impl PointerCapture, how: &str) -> bool {
        if !self.state.is_driven_by(event.pointer_id) {
            return false;
        }
        capture.release(event.pointer_id, &self.item_id);
        self.state.reset();
        debug!(item = %self.item_id, pointer = %event.pointer_id, "Drag {}", how);
        true
    }
}
