//! Intents: requested state changes consumed by the transition engine.
//!
//! Serialized with an uppercase `type` tag (`{"type": "MOVE_ITEM", ...}`) so
//! scripted sessions can be written by hand.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardIntent {
    /// Append a color swatch at the default position
    AddColorItem,
    /// Append a text note with placeholder text
    AddTextItem,
    /// Append an image referencing `src`
    AddImageItem { src: String },
    /// Replace the selection; `None` deselects
    SelectItem { id: Option<ItemId> },
    /// Raise an item above every other item
    BringToFront { id: ItemId },
    /// Place an item at an absolute board-space position
    MoveItem { id: ItemId, x: f64, y: f64 },
    /// Offset an item by a board-space delta
    MoveItemBy { id: ItemId, dx: f64, dy: f64 },
    /// Change the fill of a color swatch
    UpdateColor { id: ItemId, hex: String },
    /// Change the content of a text note
    UpdateText { id: ItemId, text: String },
    /// Change the box of a swatch or image
    ResizeItem { id: ItemId, width: f64, height: f64 },
    /// Delete an item
    RemoveItem { id: ItemId },
}

impl BoardIntent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            BoardIntent::AddColorItem => "ADD_COLOR_ITEM",
            BoardIntent::AddTextItem => "ADD_TEXT_ITEM",
            BoardIntent::AddImageItem { .. } => "ADD_IMAGE_ITEM",
            BoardIntent::SelectItem { .. } => "SELECT_ITEM",
            BoardIntent::BringToFront { .. } => "BRING_TO_FRONT",
            BoardIntent::MoveItem { .. } => "MOVE_ITEM",
            BoardIntent::MoveItemBy { .. } => "MOVE_ITEM_BY",
            BoardIntent::UpdateColor { .. } => "UPDATE_COLOR",
            BoardIntent::UpdateText { .. } => "UPDATE_TEXT",
            BoardIntent::ResizeItem { .. } => "RESIZE_ITEM",
            BoardIntent::RemoveItem { .. } => "REMOVE_ITEM",
        }
    }

    /// The item this intent targets, if any.
    pub fn target(&self) -> Option<&ItemId> {
        match self {
            BoardIntent::AddColorItem
            | BoardIntent::AddTextItem
            | BoardIntent::AddImageItem { .. } => None,
            BoardIntent::SelectItem { id } => id.as_ref(),
            BoardIntent::BringToFront { id }
            | BoardIntent::MoveItem { id, .. }
            | BoardIntent::MoveItemBy { id, .. }
            | BoardIntent::UpdateColor { id, .. }
            | BoardIntent::UpdateText { id, .. }
            | BoardIntent::ResizeItem { id, .. }
            | BoardIntent::RemoveItem { id } => Some(id),
        }
    }

    pub fn select(id: impl Into<ItemId>) -> Self {
        BoardIntent::SelectItem {
            id: Some(id.into()),
        }
    }

    pub fn deselect() -> Self {
        BoardIntent::SelectItem { id: None }
    }

    pub fn add_image(src: impl Into<String>) -> Self {
        BoardIntent::AddImageItem { src: src.into() }
    }
}

/// Why an image source was refused before dispatch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSrcError {
    #[error("image URL is empty")]
    Empty,
}

/// Validate an image URL on the caller side; returns the trimmed source.
///
/// The engine applies the same rule, so an unvalidated dispatch is still a
/// no-op.
pub fn validate_image_src(src: &str) -> Result<&str, ImageSrcError> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        Err(ImageSrcError::Empty)
    } else {
        Ok(trimmed)
    }
}
