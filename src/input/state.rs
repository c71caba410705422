//! Drag state machine for a single item.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging     (pointer down on the item, capture acquired)
//! Dragging -> Idle     (pointer up or pointer cancel for the same pointer)
//! Dragging -> Idle     (abort: item torn down mid-gesture)
//! ```
//!
//! Everything a gesture needs is carried by the `Dragging` variant, so an
//! idle item cannot hold a stale anchor.

use super::coords::Point;
use super::events::PointerId;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,

    /// A pointer owns this item and moves it
    Dragging {
        /// Pointer that started the gesture
        pointer_id: PointerId,
        /// Item position (board space) at press time
        item_origin: Point,
        /// Pointer position (screen space) at press time
        pointer_origin: Point,
        /// Last position handed to the engine, to skip duplicate moves
        last_target: Option<Point>,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The pointer driving the gesture, if dragging
    pub fn pointer_id(&self) -> Option<PointerId> {
        match self {
            Self::Dragging { pointer_id, .. } => Some(*pointer_id),
            Self::Idle => None,
        }
    }

    /// True if dragging and `pointer` is the gesture's pointer
    pub fn is_driven_by(&self, pointer: PointerId) -> bool {
        self.pointer_id() == Some(pointer)
    }

    pub fn item_origin(&self) -> Option<Point> {
        match self {
            Self::Dragging { item_origin, .. } => Some(*item_origin),
            Self::Idle => None,
        }
    }

    pub fn pointer_origin(&self) -> Option<Point> {
        match self {
            Self::Dragging { pointer_origin, .. } => Some(*pointer_origin),
            Self::Idle => None,
        }
    }

    pub fn start_dragging(&mut self, pointer_id: PointerId, item_origin: Point, pointer_origin: Point) {
        *self = Self::Dragging {
            pointer_id,
            item_origin,
            pointer_origin,
            last_target: None,
        };
    }

    /// Record `target` as dispatched; returns false if it repeats the last one.
    pub fn record_target(&mut self, target: Point) -> bool {
        match self {
            Self::Dragging { last_target, .. } => {
                if *last_target == Some(target) {
                    return false;
                }
                *last_target = Some(target);
                true
            }
            Self::Idle => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
