//! Dispatch boundary.
//!
//! Toolbar buttons, item views and the keyboard adapter hand intents to a
//! [`Dispatcher`]; only the store turns them into new states.

use crate::board::{BoardConfig, BoardState};
use crate::engine::apply;
use crate::intent::BoardIntent;
use std::sync::Arc;

/// Anything that accepts one intent per call.
pub trait Dispatcher {
    fn dispatch(&mut self, intent: BoardIntent);
}

/// Collecting intents is how input handlers are observed in isolation.
impl Dispatcher for Vec<BoardIntent> {
    fn dispatch(&mut self, intent: BoardIntent) {
        self.push(intent);
    }
}

/// Owns the current `BoardState` and a revision counter bumped on every
/// effective change.
#[derive(Debug, Clone)]
pub struct BoardStore {
    state: Arc<BoardState>,
    revision: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl BoardStore {
    pub fn new(config: BoardConfig) -> Self {
        Self::from_state(BoardState::new(config))
    }

    pub fn from_state(state: BoardState) -> Self {
        Self {
            state: Arc::new(state),
            revision: 0,
        }
    }

    /// The current state. Cheap to clone; compare snapshots with `Arc::ptr_eq`.
    pub fn state(&self) -> &Arc<BoardState> {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<BoardState> {
        Arc::clone(&self.state)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `intent`; returns whether the state changed.
    pub fn apply(&mut self, intent: &BoardIntent) -> bool {
        let next = apply(&self.state, intent);
        if Arc::ptr_eq(&next, &self.state) {
            return false;
        }
        self.state = next;
        self.revision += 1;
        true
    }
}

impl Dispatcher for BoardStore {
    fn dispatch(&mut self, intent: BoardIntent) {
        self.apply(&intent);
    }
}
