//! Keyboard nudging for the selected item.
//!
//! Arrow keys move the selection by one board pixel, ten with Shift. Escape
//! clears the selection and Delete/Backspace removes the selected item. The
//! adapter stays silent while nothing is selected or while focus is in a text
//! field, so typing elsewhere never moves the board.

use super::events::{FocusTarget, Key, KeyEvent};
use crate::board::BoardState;
use crate::constants::{NUDGE_STEP, NUDGE_STEP_LARGE};
use crate::intent::BoardIntent;
use crate::store::Dispatcher;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Step sizes for arrow-key nudges, in board-space pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgeConfig {
    pub step: f64,
    pub large_step: f64,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            step: NUDGE_STEP,
            large_step: NUDGE_STEP_LARGE,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NudgeAdapter {
    config: NudgeConfig,
}

impl NudgeAdapter {
    pub fn new(config: NudgeConfig) -> Self {
        Self { config }
    }

    /// The intent `event` maps to, if the adapter is active and the key is
    /// one it consumes.
    pub fn translate(&self, state: &BoardState, event: &KeyEvent, focus: FocusTarget) -> Option<BoardIntent> {
        if focus.is_text_entry() {
            trace!(?focus, "Nudge suppressed while typing");
            return None;
        }
        let selected = state.selected_id()?.clone();

        let mods = event.modifiers;
        if mods.control || mods.platform || mods.alt {
            return None;
        }
        let step = if mods.shift {
            self.config.large_step
        } else {
            self.config.step
        };

        let (dx, dy) = match &event.key {
            Key::ArrowUp => (0.0, -step),
            Key::ArrowDown => (0.0, step),
            Key::ArrowLeft => (-step, 0.0),
            Key::ArrowRight => (step, 0.0),
            Key::Escape => return Some(BoardIntent::deselect()),
            Key::Delete | Key::Backspace => return Some(BoardIntent::RemoveItem { id: selected }),
            Key::Other(_) => return None,
        };
        Some(BoardIntent::MoveItemBy {
            id: selected,
            dx,
            dy,
        })
    }

    /// Dispatch the mapped intent. Returns true when the key was consumed and
    /// the host must prevent its default action (page scroll, navigation).
    pub fn handle_key(
        &self,
        state: &BoardState,
        event: &KeyEvent,
        focus: FocusTarget,
        dispatcher: &mut impl Dispatcher,
    ) -> bool {
        match self.translate(state, event, focus) {
            Some(intent) => {
                dispatcher.dispatch(intent);
                true
            }
            None => false,
        }
    }
}
