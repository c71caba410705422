//! Snapshot tests using the insta crate.
//!
//! Serialized intents and board states are the format scripted sessions are
//! written in, so their shape is pinned here.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{id, TestBoardBuilder};
use moodboard::board::BoardState;
use moodboard::intent::BoardIntent;

fn compact(value: &impl serde::Serialize) -> String {
    serde_json::to_string(value).unwrap()
}

#[test]
fn snapshot_intent_wire_format() {
    let intents = [
        BoardIntent::AddColorItem,
        BoardIntent::add_image("https://example.com/a.png"),
        BoardIntent::deselect(),
        BoardIntent::select("item-1"),
        BoardIntent::BringToFront { id: id("item-1") },
        BoardIntent::MoveItem { id: id("item-1"), x: 10.0, y: 20.5 },
        BoardIntent::RemoveItem { id: id("item-2") },
    ];
    let lines: Vec<String> = intents.iter().map(|intent| compact(intent)).collect();
    insta::assert_snapshot!(lines.join("\n"), @r#"
    {"type":"ADD_COLOR_ITEM"}
    {"type":"ADD_IMAGE_ITEM","src":"https://example.com/a.png"}
    {"type":"SELECT_ITEM","id":null}
    {"type":"SELECT_ITEM","id":"item-1"}
    {"type":"BRING_TO_FRONT","id":"item-1"}
    {"type":"MOVE_ITEM","id":"item-1","x":10.0,"y":20.5}
    {"type":"REMOVE_ITEM","id":"item-2"}
    "#);
}

#[test]
fn snapshot_board_state() {
    let state = TestBoardBuilder::new().with_color().with_text().build();
    let mut state = (*state).clone();
    state.board.id = "board-test".to_string();

    insta::assert_snapshot!(compact(&state), @r##"{"board":{"id":"board-test","width":1000.0,"height":600.0,"items":[{"id":"item-1","x":40.0,"y":40.0,"zIndex":1,"type":"color","hex":"#f97316","width":120.0,"height":120.0},{"id":"item-2","x":200.0,"y":60.0,"zIndex":2,"type":"text","text":"New note"}]},"selectedItemId":"item-2","nextItemSeq":3}"##);
}

#[test]
fn snapshot_paint_order_after_raise() {
    let state = TestBoardBuilder::new()
        .with_color()
        .with_text()
        .with_image("a.png")
        .build();
    let state = moodboard::apply(&state, &BoardIntent::BringToFront { id: id("item-1") });
    let order: Vec<String> = state
        .paint_order()
        .iter()
        .map(|i| format!("{} z={}", i.id, i.z_index))
        .collect();
    insta::assert_snapshot!(order.join("\n"), @r"
    item-2 z=2
    item-3 z=3
    item-1 z=4
    ");
}

#[test]
fn test_board_state_round_trip() {
    let state = TestBoardBuilder::new()
        .with_color()
        .with_text()
        .with_image("a.png")
        .build();
    let json = serde_json::to_string_pretty(state.as_ref()).unwrap();
    let restored: BoardState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.items(), state.items());
    assert_eq!(restored.selected_item_id, state.selected_item_id);
    assert_eq!(restored.next_item_seq, 4);
}
