//! Coordinate conversion between screen space and board space.
//!
//! Screen space is what pointer events report; board space is the board's
//! native pixel grid. The two differ by the canvas origin on screen and the
//! uniform scale factor.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point or vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Context needed for coordinate conversions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateContext {
    /// Top-left corner of the rendered board, in screen pixels
    pub canvas_origin: Point,
    pub scale: f64,
}

impl CoordinateContext {
    #[inline]
    pub fn new(canvas_origin: Point, scale: f64) -> Self {
        Self {
            canvas_origin,
            scale,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert screen position to board position
    #[inline]
    pub fn screen_to_board(screen_pos: Point, ctx: &CoordinateContext) -> Point {
        Self::delta_screen_to_board(screen_pos - ctx.canvas_origin, ctx.scale)
    }

    /// Convert board position to screen position
    #[inline]
    pub fn board_to_screen(board_pos: Point, ctx: &CoordinateContext) -> Point {
        Self::delta_board_to_screen(board_pos, ctx.scale) + ctx.canvas_origin
    }

    /// Convert a delta from screen to board (for drag operations)
    #[inline]
    pub fn delta_screen_to_board(delta: Point, scale: f64) -> Point {
        point(delta.x / scale, delta.y / scale)
    }

    /// Convert a delta from board to screen
    #[inline]
    pub fn delta_board_to_screen(delta: Point, scale: f64) -> Point {
        point(delta.x * scale, delta.y * scale)
    }
}
