//! Unit tests for the render plan.

use crate::helpers::{id, TestBoardBuilder};
use moodboard::engine::apply;
use moodboard::intent::BoardIntent;
use moodboard::types::ItemKind;
use moodboard::view::render_plan;

#[test]
fn test_views_sorted_by_z() {
    let state = TestBoardBuilder::new().with_color().with_text().with_color().build();
    let state = apply(&state, &BoardIntent::BringToFront { id: id("item-1") });

    let plan = render_plan(&state, 1.0);
    assert_eq!(plan.order(), vec!["item-2", "item-3", "item-1"]);
}

#[test]
fn test_only_selected_item_flagged() {
    let state = TestBoardBuilder::new().with_color().with_text().build();
    let plan = render_plan(&state, 1.0);
    let flagged: Vec<&str> = plan
        .items
        .iter()
        .filter(|v| v.selected)
        .map(|v| v.id.as_str())
        .collect();
    assert_eq!(flagged, vec!["item-2"]);
}

#[test]
fn test_positions_scale_with_viewport() {
    let state = TestBoardBuilder::new().with_image("a.png").build();
    let plan = render_plan(&state, 0.5);
    let view = plan.item(&id("item-1")).unwrap();

    assert_eq!(view.kind, ItemKind::Image);
    assert_eq!((view.x, view.y), (180.0, 20.0));
    assert_eq!(view.size, Some((120.0, 90.0)));
    assert_eq!(view.label, "Image a.png");
}
