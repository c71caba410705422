//! State transition engine.
//!
//! `apply` is the single authority for board mutations. It never mutates its
//! input: a change yields a fresh `Arc<BoardState>`, a no-op hands back the
//! same `Arc` so callers can detect "unchanged" with [`Arc::ptr_eq`].
//!
//! ## Z-order
//!
//! Every add and every bring-to-front scans for the current maximum z-index
//! and assigns `max + 1`, so z-indices are a strict total order at all times.
//! When `max + 1` would overflow, z-indices are compacted to `1..=n` first.
//!
//! ## Malformed intents
//!
//! Unknown ids, wrong item variants, empty image sources, bad hex strings and
//! non-finite coordinates all leave the state untouched. Nothing here panics.

use crate::board::BoardState;
use crate::intent::{validate_image_src, BoardIntent};
use crate::profile_scope;
use crate::types::{BoardItem, HexColor, ItemContent, ItemId};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Apply one intent to `state`, returning the next state.
pub fn apply(state: &Arc<BoardState>, intent: &BoardIntent) -> Arc<BoardState> {
    profile_scope!("engine_apply");

    let next = match intent {
        BoardIntent::AddColorItem => {
            let content = ItemContent::Color {
                hex: state.config.color_hex.clone(),
                width: state.config.color_size.0,
                height: state.config.color_size.1,
            };
            Some(add_item(state, state.config.color_position, content))
        }
        BoardIntent::AddTextItem => {
            let content = ItemContent::Text {
                text: state.config.text_placeholder.clone(),
            };
            Some(add_item(state, state.config.text_position, content))
        }
        BoardIntent::AddImageItem { src } => match validate_image_src(src) {
            Ok(src) => {
                let content = ItemContent::Image {
                    src: src.to_string(),
                    width: state.config.image_size.0,
                    height: state.config.image_size.1,
                };
                Some(add_item(state, state.config.image_position, content))
            }
            Err(_) => {
                warn!("Rejected image item with empty source");
                None
            }
        },
        BoardIntent::SelectItem { id } => select_item(state, id.as_ref()),
        BoardIntent::BringToFront { id } => bring_to_front(state, id),
        BoardIntent::MoveItem { id, x, y } => {
            if !x.is_finite() || !y.is_finite() {
                None
            } else {
                update_item(state, id, |item| {
                    if item.x == *x && item.y == *y {
                        return false;
                    }
                    item.x = *x;
                    item.y = *y;
                    true
                })
            }
        }
        BoardIntent::MoveItemBy { id, dx, dy } => {
            if !dx.is_finite() || !dy.is_finite() {
                None
            } else {
                update_item(state, id, |item| {
                    if *dx == 0.0 && *dy == 0.0 {
                        return false;
                    }
                    item.x += dx;
                    item.y += dy;
                    true
                })
            }
        }
        BoardIntent::UpdateColor { id, hex } => match HexColor::parse(hex) {
            Some(new_hex) => update_item(state, id, |item| match &mut item.content {
                ItemContent::Color { hex, .. } if *hex != new_hex => {
                    *hex = new_hex.clone();
                    true
                }
                ItemContent::Color { .. } | ItemContent::Text { .. } | ItemContent::Image { .. } => {
                    false
                }
            }),
            None => {
                debug!(hex = %hex, "Ignoring malformed hex color");
                None
            }
        },
        BoardIntent::UpdateText { id, text } => update_item(state, id, |item| match &mut item.content {
            ItemContent::Text { text: current } if current != text => {
                *current = text.clone();
                true
            }
            ItemContent::Text { .. } | ItemContent::Color { .. } | ItemContent::Image { .. } => false,
        }),
        BoardIntent::ResizeItem { id, width, height } => {
            if !width.is_finite() || !height.is_finite() {
                None
            } else {
                let min = state.config.min_item_size;
                let (w, h) = (width.max(min), height.max(min));
                update_item(state, id, |item| match &mut item.content {
                    ItemContent::Color { width, height, .. } | ItemContent::Image { width, height, .. } => {
                        if *width == w && *height == h {
                            return false;
                        }
                        *width = w;
                        *height = h;
                        true
                    }
                    ItemContent::Text { .. } => false,
                })
            }
        }
        BoardIntent::RemoveItem { id } => remove_item(state, id),
    };

    match next {
        Some(mut next) => {
            // A selection pointing at a missing item reads as none.
            if next.selected_id().is_none() {
                next.selected_item_id = None;
            }
            debug!(
                intent = intent.name(),
                item = ?intent.target().map(ItemId::as_str),
                items = next.item_count(),
                "Applied intent"
            );
            if cfg!(debug_assertions) {
                if let Err(violation) = next.check_invariants() {
                    warn!(intent = intent.name(), %violation, "Board invariant broken");
                }
            }
            Arc::new(next)
        }
        None => {
            trace!(
                intent = intent.name(),
                item = ?intent.target().map(ItemId::as_str),
                "Intent was a no-op"
            );
            Arc::clone(state)
        }
    }
}

/// The z-index a newly created or front-brought item receives, compacting
/// `state` first if the counter would overflow.
fn claim_top_z_index(state: &mut BoardState) -> u32 {
    match state.max_z_index().checked_add(1) {
        Some(z) => z,
        None => {
            compact_z_indices(state);
            state.max_z_index() + 1
        }
    }
}

/// Renumber z-indices to `1..=n`, preserving paint order.
fn compact_z_indices(state: &mut BoardState) {
    let mut order: Vec<usize> = (0..state.board.items.len()).collect();
    order.sort_by_key(|&i| state.board.items[i].z_index);
    for (rank, index) in order.into_iter().enumerate() {
        state.board.items[index].z_index = rank as u32 + 1;
    }
    debug!(items = state.board.items.len(), "Compacted z-indices");
}

fn add_item(state: &BoardState, position: (f64, f64), content: ItemContent) -> BoardState {
    let mut next = state.clone();
    let z_index = claim_top_z_index(&mut next);
    let id = ItemId::from_sequence(next.next_item_seq);
    next.next_item_seq += 1;
    next.board.items.push(BoardItem {
        id: id.clone(),
        x: position.0,
        y: position.1,
        z_index,
        content,
    });
    next.selected_item_id = Some(id);
    next
}

fn select_item(state: &BoardState, id: Option<&ItemId>) -> Option<BoardState> {
    // Unknown ids deselect.
    let target = id.filter(|id| state.get_item(id).is_some());
    if target.is_none() && id.is_some() {
        debug!(id = ?id.map(ItemId::as_str), "Selecting unknown item, clearing selection");
    }
    if state.selected_item_id.as_ref() == target {
        return None;
    }
    let mut next = state.clone();
    next.selected_item_id = target.cloned();
    Some(next)
}

fn bring_to_front(state: &BoardState, id: &ItemId) -> Option<BoardState> {
    state.item_index(id)?;
    let mut next = state.clone();
    let z_index = claim_top_z_index(&mut next);
    let index = next.item_index(id)?;
    next.board.items[index].z_index = z_index;
    Some(next)
}

/// Clone `state` and run `f` on the item with `id`; `f` reports whether it
/// changed anything.
fn update_item(
    state: &BoardState,
    id: &ItemId,
    f: impl FnOnce(&mut BoardItem) -> bool,
) -> Option<BoardState> {
    let index = state.item_index(id)?;
    let mut item = state.board.items[index].clone();
    if !f(&mut item) {
        return None;
    }
    let mut next = state.clone();
    next.board.items[index] = item;
    Some(next)
}

fn remove_item(state: &BoardState, id: &ItemId) -> Option<BoardState> {
    let index = state.item_index(id)?;
    let mut next = state.clone();
    next.board.items.remove(index);
    if next.selected_item_id.as_ref() == Some(id) {
        next.selected_item_id = None;
    }
    Some(next)
}
