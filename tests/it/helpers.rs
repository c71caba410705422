//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - Builder for boards populated through real intents
//! - Event helpers like `press()`, `key()`
//! - Assertion helpers for z-order and item positions

use moodboard::board::{BoardConfig, BoardState};
use moodboard::engine::apply;
use moodboard::input::{point, Key, KeyEvent, Modifiers, PointerEvent, PointerId};
use moodboard::intent::BoardIntent;
use moodboard::types::{BoardItem, ItemId};
use std::sync::Arc;

// ============================================================================
// TestBoardBuilder - Builder pattern for creating test boards
// ============================================================================

/// Builder for boards created by replaying intents, so every fixture obeys
/// the same invariants as a live board.
///
/// # Example
/// ```ignore
/// let state = TestBoardBuilder::new()
///     .with_color()
///     .with_text()
///     .at("item-1", 300.0, 200.0)
///     .build();
/// ```
pub struct TestBoardBuilder {
    config: BoardConfig,
    intents: Vec<BoardIntent>,
}

impl Default for TestBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self {
            config: BoardConfig::default(),
            intents: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_color(mut self) -> Self {
        self.intents.push(BoardIntent::AddColorItem);
        self
    }

    pub fn with_text(mut self) -> Self {
        self.intents.push(BoardIntent::AddTextItem);
        self
    }

    pub fn with_image(mut self, src: &str) -> Self {
        self.intents.push(BoardIntent::add_image(src));
        self
    }

    /// Move the item with `id` to an absolute position.
    pub fn at(mut self, id: &str, x: f64, y: f64) -> Self {
        self.intents.push(BoardIntent::MoveItem {
            id: ItemId::new(id),
            x,
            y,
        });
        self
    }

    pub fn selecting(mut self, id: Option<&str>) -> Self {
        self.intents.push(BoardIntent::SelectItem {
            id: id.map(ItemId::new),
        });
        self
    }

    pub fn build(self) -> Arc<BoardState> {
        apply_all(&Arc::new(BoardState::new(self.config)), &self.intents)
    }
}

// ============================================================================
// Standalone helper functions
// ============================================================================

pub fn empty_state() -> Arc<BoardState> {
    Arc::new(BoardState::default())
}

pub fn apply_all(state: &Arc<BoardState>, intents: &[BoardIntent]) -> Arc<BoardState> {
    intents
        .iter()
        .fold(Arc::clone(state), |state, intent| apply(&state, intent))
}

pub fn id(s: &str) -> ItemId {
    ItemId::new(s)
}

pub fn item<'a>(state: &'a BoardState, id: &str) -> &'a BoardItem {
    state
        .get_item(&ItemId::new(id))
        .unwrap_or_else(|| panic!("Item {} not found", id))
}

// ============================================================================
// Event helpers
// ============================================================================

pub fn pointer(pointer_id: u32, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(PointerId(pointer_id), point(x, y))
}

pub fn key(key: Key) -> KeyEvent {
    KeyEvent::new(key)
}

pub fn shift_key(key: Key) -> KeyEvent {
    KeyEvent::new(key).with_modifiers(Modifiers::shift())
}

// ============================================================================
// Assertion helpers
// ============================================================================

pub fn assert_position(state: &BoardState, id: &str, expected: (f64, f64)) {
    let found = item(state, id).position();
    assert_eq!(found, expected, "Item {} at {:?}, expected {:?}", id, found, expected);
}

/// Assert ids in paint order, back to front.
pub fn assert_paint_order(state: &BoardState, expected: &[&str]) {
    let order: Vec<&str> = state.paint_order().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(order, expected);
}

pub fn assert_on_top(state: &BoardState, id: &str) {
    let top = state.top_item().map(|i| i.id.as_str());
    assert_eq!(top, Some(id), "Expected {} on top", id);
}
