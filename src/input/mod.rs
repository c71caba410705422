//! Pointer and keyboard input handling for the board.
//!
//! ## Architecture
//!
//! Each interactive item owns an explicit drag state machine (`DragState`)
//! driven by `ItemDrag`. Input handlers never touch the board: they emit
//! intents through a `Dispatcher`.
//!
//! ## Modules
//!
//! - `coords` - Screen/board coordinate conversion
//! - `events` - Pointer, key and focus event types
//! - `capture` - Exclusive pointer capture
//! - `state` - Drag state machine enum
//! - `drag` - Press/move/release handling for one item
//! - `keyboard` - Arrow-key nudging of the selection

pub mod coords;
pub mod events;
mod capture;
mod drag;
mod keyboard;
mod state;

pub use capture::{CaptureError, CaptureRegistry, PointerCapture};
pub use coords::{point, CoordinateContext, CoordinateConverter, Point};
pub use drag::ItemDrag;
pub use events::{FocusTarget, Key, KeyEvent, Modifiers, PointerEvent, PointerId};
pub use keyboard::{NudgeAdapter, NudgeConfig};
pub use state::DragState;
