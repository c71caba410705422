//! Core types for the moodboard document.
//!
//! This module defines the item model placed on the board: identifiers,
//! colors, the per-variant payloads and the geometry helpers every consumer
//! (engine, hit testing, rendering, export) shares.

use crate::constants::{TEXT_GLYPH_WIDTH, TEXT_LINE_HEIGHT, TEXT_PADDING_X, TEXT_PADDING_Y};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a board item. Immutable for the item's lifetime and never
/// reused within a session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id minted by the engine for the `seq`-th created item.
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("item-{}", seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Colors
// ============================================================================

/// A 6-digit RGB color, stored normalized as `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse `#rrggbb` or `rrggbb` (any case). Shorthand and alpha forms are
    /// rejected.
    pub fn parse(input: &str) -> Option<Self> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or(0)
        };
        [channel(1..3), channel(3..5), channel(5..7)]
    }

    /// Fully opaque RGBA pixel for this color.
    pub fn rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.rgb();
        [r, g, b, 255]
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#000000".to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("invalid hex color: {:?}", value))
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

// ============================================================================
// Items
// ============================================================================

/// Discriminant of an item, for labels and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Color,
    Text,
    Image,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Color => "Color",
            ItemKind::Text => "Text",
            ItemKind::Image => "Image",
        }
    }
}

/// The payload of a board item.
///
/// Color swatches and images carry an explicit box; text notes are sized by
/// their content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemContent {
    /// A solid color swatch
    Color {
        hex: HexColor,
        width: f64,
        height: f64,
    },
    /// A free text note
    Text { text: String },
    /// An image referenced by URL or path
    Image { src: String, width: f64, height: f64 },
}

impl ItemContent {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemContent::Color { .. } => ItemKind::Color,
            ItemContent::Text { .. } => ItemKind::Text,
            ItemContent::Image { .. } => ItemKind::Image,
        }
    }

    /// Explicit box, if the variant has one.
    pub fn size(&self) -> Option<(f64, f64)> {
        match self {
            ItemContent::Color { width, height, .. } | ItemContent::Image { width, height, .. } => {
                Some((*width, *height))
            }
            ItemContent::Text { .. } => None,
        }
    }

    /// Accessible name used by views and logs.
    pub fn display_name(&self) -> String {
        match self {
            ItemContent::Color { hex, .. } => format!("Color swatch {}", hex),
            ItemContent::Text { text } => text.clone(),
            ItemContent::Image { src, .. } => format!("Image {}", src),
        }
    }
}

/// Glyph metrics used to estimate the box of intrinsically sized text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    pub glyph_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            glyph_width: TEXT_GLYPH_WIDTH,
            line_height: TEXT_LINE_HEIGHT,
            padding_x: TEXT_PADDING_X,
            padding_y: TEXT_PADDING_Y,
        }
    }
}

impl TextMetrics {
    /// Estimated `(width, height)` of a note showing `text`.
    pub fn extent(&self, text: &str) -> (f64, f64) {
        let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        (
            longest as f64 * self.glyph_width + 2.0 * self.padding_x,
            lines as f64 * self.line_height + 2.0 * self.padding_y,
        )
    }
}

/// An item placed on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardItem {
    /// Unique identifier for this item
    pub id: ItemId,
    /// Left edge in board-space pixels (may be negative or past the board)
    pub x: f64,
    /// Top edge in board-space pixels
    pub y: f64,
    /// Paint order; unique across the board
    pub z_index: u32,
    /// What the item shows
    #[serde(flatten)]
    pub content: ItemContent,
}

impl BoardItem {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn kind(&self) -> ItemKind {
        self.content.kind()
    }

    /// Board-space box `(x, y, width, height)`, estimating text extents.
    pub fn bounds(&self, metrics: &TextMetrics) -> (f64, f64, f64, f64) {
        let (w, h) = match &self.content {
            ItemContent::Text { text } => metrics.extent(text),
            other => other.size().unwrap_or((0.0, 0.0)),
        };
        (self.x, self.y, w, h)
    }
}
