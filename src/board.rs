//! Board document model.
//!
//! A `BoardState` owns exactly one `Board` and the current selection. Values
//! are treated as immutable by the transition engine: every change produces
//! a new state, so holders of an `Arc<BoardState>` can compare by pointer.

use crate::constants::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_COLOR_HEX, DEFAULT_COLOR_POSITION, DEFAULT_COLOR_SIZE,
    DEFAULT_IMAGE_POSITION, DEFAULT_IMAGE_SIZE, DEFAULT_TEXT, DEFAULT_TEXT_POSITION, MIN_ITEM_SIZE,
};
use crate::types::{BoardItem, HexColor, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Defaults the engine uses when it creates items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Native board width (board-space pixels)
    pub width: f64,
    /// Native board height (board-space pixels)
    pub height: f64,
    pub color_position: (f64, f64),
    pub color_size: (f64, f64),
    pub color_hex: HexColor,
    pub text_position: (f64, f64),
    pub text_placeholder: String,
    pub image_position: (f64, f64),
    pub image_size: (f64, f64),
    /// Lower bound applied by resize intents
    pub min_item_size: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            color_position: DEFAULT_COLOR_POSITION,
            color_size: DEFAULT_COLOR_SIZE,
            color_hex: HexColor::parse(DEFAULT_COLOR_HEX).unwrap_or_default(),
            text_position: DEFAULT_TEXT_POSITION,
            text_placeholder: DEFAULT_TEXT.to_string(),
            image_position: DEFAULT_IMAGE_POSITION,
            image_size: DEFAULT_IMAGE_SIZE,
            min_item_size: MIN_ITEM_SIZE,
        }
    }
}

/// The fixed-size canvas and the items placed on it.
///
/// Sequence order is insertion order only; paint order is `z_index`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Session identifier (UUID v4), used to correlate logs
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub items: Vec<BoardItem>,
}

impl Board {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            width,
            height,
            items: Vec::new(),
        }
    }
}

/// A broken document invariant, reported by [`BoardState::check_invariants`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("selection references missing item {0}")]
    DanglingSelection(ItemId),

    #[error("item id {0} appears more than once")]
    DuplicateId(ItemId),

    #[error("z-index {0} is shared by several items")]
    DuplicateZIndex(u32),

    #[error("item id {id} was minted at or after the next sequence {next}")]
    FutureId { id: ItemId, next: u64 },
}

/// The board plus selection: the value the transition engine maps over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub board: Board,
    pub selected_item_id: Option<ItemId>,
    /// Sequence number the next created item will take
    pub next_item_seq: u64,
    #[serde(skip)]
    pub config: BoardConfig,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl BoardState {
    /// Empty board, nothing selected.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            board: Board::new(config.width, config.height),
            selected_item_id: None,
            next_item_seq: 1,
            config,
        }
    }

    pub fn items(&self) -> &[BoardItem] {
        &self.board.items
    }

    pub fn item_count(&self) -> usize {
        self.board.items.len()
    }

    pub fn get_item(&self, id: &ItemId) -> Option<&BoardItem> {
        self.board.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn item_index(&self, id: &ItemId) -> Option<usize> {
        self.board.items.iter().position(|item| &item.id == id)
    }

    /// The selected id, treating a selection of a missing item as none.
    pub fn selected_id(&self) -> Option<&ItemId> {
        self.selected_item_id
            .as_ref()
            .filter(|id| self.get_item(id).is_some())
    }

    pub fn selected_item(&self) -> Option<&BoardItem> {
        self.selected_item_id.as_ref().and_then(|id| self.get_item(id))
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected_id() == Some(id)
    }

    /// Highest z-index on the board; 0 when empty.
    pub fn max_z_index(&self) -> u32 {
        self.board.items.iter().map(|i| i.z_index).max().unwrap_or(0)
    }

    /// The item painted last, if any.
    pub fn top_item(&self) -> Option<&BoardItem> {
        self.board.items.iter().max_by_key(|i| i.z_index)
    }

    /// Items in paint order (back to front).
    pub fn paint_order(&self) -> Vec<&BoardItem> {
        let mut items: Vec<&BoardItem> = self.board.items.iter().collect();
        items.sort_by_key(|i| i.z_index);
        items
    }

    /// Verify the document invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut ids = HashSet::new();
        let mut z_indices = HashSet::new();
        for item in &self.board.items {
            if !ids.insert(&item.id) {
                return Err(InvariantViolation::DuplicateId(item.id.clone()));
            }
            if !z_indices.insert(item.z_index) {
                return Err(InvariantViolation::DuplicateZIndex(item.z_index));
            }
            if let Some(seq) = item
                .id
                .as_str()
                .strip_prefix("item-")
                .and_then(|s| s.parse::<u64>().ok())
            {
                if seq >= self.next_item_seq {
                    return Err(InvariantViolation::FutureId {
                        id: item.id.clone(),
                        next: self.next_item_seq,
                    });
                }
            }
        }
        if let Some(selected) = &self.selected_item_id {
            if !ids.contains(selected) {
                return Err(InvariantViolation::DanglingSelection(selected.clone()));
            }
        }
        Ok(())
    }
}
