//! Unit tests for keyboard nudging.

use crate::helpers::{assert_position, key, shift_key, TestBoardBuilder};
use moodboard::input::{FocusTarget, Key, NudgeAdapter, NudgeConfig};
use moodboard::store::BoardStore;

fn store_with_selected_swatch() -> BoardStore {
    let state = TestBoardBuilder::new().with_color().build();
    BoardStore::from_state((*state).clone())
}

#[test]
fn test_arrows_move_one_unit() {
    let mut store = store_with_selected_swatch();
    let adapter = NudgeAdapter::default();

    for k in [Key::ArrowRight, Key::ArrowRight, Key::ArrowDown, Key::ArrowLeft, Key::ArrowUp, Key::ArrowUp] {
        let state = store.snapshot();
        assert!(adapter.handle_key(&state, &key(k), FocusTarget::Canvas, &mut store));
    }
    assert_position(store.state(), "item-1", (41.0, 39.0));
}

#[test]
fn test_shift_arrow_moves_ten() {
    let mut store = store_with_selected_swatch();
    let adapter = NudgeAdapter::default();
    let state = store.snapshot();
    adapter.handle_key(&state, &shift_key(Key::ArrowDown), FocusTarget::Canvas, &mut store);
    assert_position(store.state(), "item-1", (40.0, 50.0));
}

#[test]
fn test_custom_steps() {
    let mut store = store_with_selected_swatch();
    let adapter = NudgeAdapter::new(NudgeConfig { step: 5.0, large_step: 50.0 });
    let state = store.snapshot();
    adapter.handle_key(&state, &key(Key::ArrowLeft), FocusTarget::Canvas, &mut store);
    assert_position(store.state(), "item-1", (35.0, 40.0));
}

#[test]
fn test_typing_in_text_field_is_not_consumed() {
    let mut store = store_with_selected_swatch();
    let adapter = NudgeAdapter::default();
    let state = store.snapshot();
    assert!(!adapter.handle_key(&state, &key(Key::ArrowUp), FocusTarget::TextInput, &mut store));
    assert!(!adapter.handle_key(&state, &key(Key::Backspace), FocusTarget::ContentEditable, &mut store));
    assert_eq!(store.revision(), 0);
    assert_eq!(store.state().item_count(), 1);
}

#[test]
fn test_escape_deselects() {
    let mut store = store_with_selected_swatch();
    let adapter = NudgeAdapter::default();
    let state = store.snapshot();
    assert!(adapter.handle_key(&state, &key(Key::Escape), FocusTarget::Canvas, &mut store));
    assert_eq!(store.state().selected_id(), None);
}

#[test]
fn test_delete_removes_selected() {
    for k in [Key::Delete, Key::Backspace] {
        let mut store = store_with_selected_swatch();
        let adapter = NudgeAdapter::default();
        let state = store.snapshot();
        assert!(adapter.handle_key(&state, &key(k), FocusTarget::Canvas, &mut store));
        assert_eq!(store.state().item_count(), 0);
    }
}
