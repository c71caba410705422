//! Replay script integration tests.

use crate::helpers::{assert_on_top, assert_position};
use moodboard::export::DirectorySink;
use moodboard::script::{Script, ScriptError};
use moodboard::session::BoardSession;
use std::fs;
use tempfile::tempdir;

const DRAG_SCRIPT: &str = r#"{
    "viewport_width": 500,
    "steps": [
        { "intent": { "type": "ADD_COLOR_ITEM" } },
        { "intent": { "type": "ADD_TEXT_ITEM" } },
        { "pointer_down": { "pointer_id": 1, "position": { "x": 30, "y": 30 } } },
        { "pointer_move": { "pointer_id": 1, "position": { "x": 130, "y": 70 } } },
        { "pointer_up": { "pointer_id": 1, "position": { "x": 130, "y": 70 } } },
        { "key": { "key": "ArrowDown", "modifiers": { "shift": true } } },
        { "intent": { "type": "ADD_IMAGE_ITEM", "src": "   " } },
        "export"
    ]
}"#;

#[test]
fn test_replay_drag_script() {
    let dir = tempdir().unwrap();
    let script_path = dir.path().join("session.json");
    fs::write(&script_path, DRAG_SCRIPT).unwrap();

    let script = Script::from_path(&script_path).unwrap();
    let mut session = BoardSession::default();
    let mut sink = DirectorySink::new(dir.path().join("out"));
    let report = script.replay(&mut session, &mut sink);

    assert_eq!(report.steps, 8);
    assert_eq!(report.exports.len(), 1);
    assert!(dir.path().join("out").join("moodboard.png").exists());

    let state = session.state();
    assert_eq!(state.item_count(), 2);
    assert_position(state, "item-1", (240.0, 130.0));
    assert_on_top(state, "item-1");
}

#[test]
fn test_replay_counts_only_effective_steps() {
    let script = Script::parse(
        r#"{"steps": [
            { "intent": { "type": "ADD_COLOR_ITEM" } },
            { "intent": { "type": "SELECT_ITEM", "id": "item-1" } },
            { "key": { "key": "Escape" } },
            { "key": { "key": "Escape" } }
        ]}"#,
    )
    .unwrap();
    let dir = tempdir().unwrap();
    let mut session = BoardSession::default();
    let report = script.replay(&mut session, &mut DirectorySink::new(dir.path()));

    assert_eq!(report.steps, 4);
    assert_eq!(report.changes, 2);
    assert_eq!(session.state().selected_id(), None);
}

#[test]
fn test_missing_script_file() {
    let dir = tempdir().unwrap();
    let err = Script::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ScriptError::Io(_)));
}
