//! Render plan: what a host draws for a given state and scale.
//!
//! Positions and explicit sizes are multiplied by the scale. Text notes carry
//! no size and are laid out by the host at `scale` font size. Views come back
//! in paint order, so drawing them in sequence stacks them correctly.

use crate::board::BoardState;
use crate::types::{ItemContent, ItemId, ItemKind};

/// Screen-space description of one item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemView {
    pub id: ItemId,
    pub kind: ItemKind,
    pub x: f64,
    pub y: f64,
    /// Scaled box; `None` for intrinsically sized text
    pub size: Option<(f64, f64)>,
    pub z_index: u32,
    pub selected: bool,
    /// Accessible name
    pub label: String,
    pub content: ItemContent,
}

/// The scaled canvas plus its items back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub scale: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub items: Vec<ItemView>,
}

impl RenderPlan {
    pub fn item(&self, id: &ItemId) -> Option<&ItemView> {
        self.items.iter().find(|v| &v.id == id)
    }

    /// Ids in paint order.
    pub fn order(&self) -> Vec<&str> {
        self.items.iter().map(|v| v.id.as_str()).collect()
    }
}

pub fn render_plan(state: &BoardState, scale: f64) -> RenderPlan {
    let items = state
        .paint_order()
        .into_iter()
        .map(|item| ItemView {
            id: item.id.clone(),
            kind: item.kind(),
            x: item.x * scale,
            y: item.y * scale,
            size: item.content.size().map(|(w, h)| (w * scale, h * scale)),
            z_index: item.z_index,
            selected: state.is_selected(&item.id),
            label: item.content.display_name(),
            content: item.content.clone(),
        })
        .collect();

    RenderPlan {
        scale,
        canvas_width: state.board.width * scale,
        canvas_height: state.board.height * scale,
        items,
    }
}
