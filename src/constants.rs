//! Application-wide constants.
//!
//! Centralizes board dimensions, item defaults and input steps so the
//! engine, the settings defaults and the tests agree on the same numbers.

// ============================================================================
// Board
// ============================================================================

/// Native board width in board-space pixels
pub const BOARD_WIDTH: f64 = 1000.0;

/// Native board height in board-space pixels
pub const BOARD_HEIGHT: f64 = 600.0;

/// Board background painted behind every export
pub const BOARD_BACKGROUND: &str = "#ffffff";

// ============================================================================
// Item Defaults
// ============================================================================

/// Where a new color swatch lands
pub const DEFAULT_COLOR_POSITION: (f64, f64) = (40.0, 40.0);

/// Size of a new color swatch
pub const DEFAULT_COLOR_SIZE: (f64, f64) = (120.0, 120.0);

/// Fill of a new color swatch
pub const DEFAULT_COLOR_HEX: &str = "#f97316";

/// Where a new text note lands
pub const DEFAULT_TEXT_POSITION: (f64, f64) = (200.0, 60.0);

/// Placeholder content of a new text note
pub const DEFAULT_TEXT: &str = "New note";

/// Where a new image lands
pub const DEFAULT_IMAGE_POSITION: (f64, f64) = (360.0, 40.0);

/// Box of a new image
pub const DEFAULT_IMAGE_SIZE: (f64, f64) = (240.0, 180.0);

/// Smallest box a swatch or image can be resized to
pub const MIN_ITEM_SIZE: f64 = 10.0;

// ============================================================================
// Text Metrics (used for hit testing and export placeholders)
// ============================================================================

/// Approximate advance of one glyph at the note font size
pub const TEXT_GLYPH_WIDTH: f64 = 10.0;

/// Line height of a text note
pub const TEXT_LINE_HEIGHT: f64 = 28.0;

/// Horizontal padding around a text note
pub const TEXT_PADDING_X: f64 = 6.0;

/// Vertical padding around a text note
pub const TEXT_PADDING_Y: f64 = 2.0;

// ============================================================================
// Input Handling
// ============================================================================

/// Board-space pixels moved per arrow key press
pub const NUDGE_STEP: f64 = 1.0;

/// Board-space pixels moved per arrow key press with Shift held
pub const NUDGE_STEP_LARGE: f64 = 10.0;

/// Scale never drops to zero; this floor keeps screen-to-board division finite
pub const MIN_SCALE: f64 = 1e-3;

// ============================================================================
// Export
// ============================================================================

/// File name of the exported raster
pub const EXPORT_FILE_NAME: &str = "moodboard.png";

/// Fill used for text note placeholders in raster exports
pub const TEXT_PLACEHOLDER_COLOR: &str = "#171717";

/// Largest raster an export will allocate (8192 x 8192 RGBA)
pub const MAX_EXPORT_PIXELS: f64 = 67_108_864.0;
