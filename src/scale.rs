//! Scale resolver: fits the fixed-size board into a variable-width viewport.
//!
//! `scale = min(1, available_width / board_width)`, applied to both axes. The
//! board only ever shrinks. The current value lives behind a [`ScaleHandle`]
//! so every drag engine reads the scale in effect when a pointer moves.

use crate::constants::MIN_SCALE;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Uniform shrink factor for `board_width` rendered in `available_width`:
/// `min(1, available_width / board_width)`, floored at [`MIN_SCALE`] so a
/// sliver of a viewport still yields a finite screen-to-board division.
///
/// Returns `None` for measurements that cannot produce a usable scale
/// (non-finite or non-positive widths).
pub fn resolve_scale(available_width: f64, board_width: f64) -> Option<f64> {
    if !available_width.is_finite() || available_width <= 0.0 {
        return None;
    }
    if !board_width.is_finite() || board_width <= 0.0 {
        return None;
    }
    Some((available_width / board_width).min(1.0).max(MIN_SCALE))
}

/// Shared, cloneable view of the current scale.
#[derive(Clone, Debug)]
pub struct ScaleHandle {
    inner: Arc<RwLock<f64>>,
}

impl Default for ScaleHandle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ScaleHandle {
    pub fn new(scale: f64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(scale)),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        *self.inner.read()
    }

    fn set(&self, scale: f64) {
        *self.inner.write() = scale;
    }
}

/// Recomputes the scale whenever the hosting surface reports a new width.
#[derive(Debug)]
pub struct ScaleResolver {
    board_width: f64,
    available_width: Option<f64>,
    handle: ScaleHandle,
}

impl ScaleResolver {
    pub fn new(board_width: f64) -> Self {
        Self {
            board_width,
            available_width: None,
            handle: ScaleHandle::default(),
        }
    }

    /// A handle that follows every recomputation.
    pub fn handle(&self) -> ScaleHandle {
        self.handle.clone()
    }

    pub fn scale(&self) -> f64 {
        self.handle.get()
    }

    pub fn available_width(&self) -> Option<f64> {
        self.available_width
    }

    /// Resize observation. Recomputes synchronously; returns the new scale if
    /// it changed. Degenerate widths keep the previous scale.
    pub fn observe_width(&mut self, available_width: f64) -> Option<f64> {
        let Some(scale) = resolve_scale(available_width, self.board_width) else {
            trace!(available_width, "Ignoring degenerate viewport width");
            return None;
        };
        self.available_width = Some(available_width);
        if scale == self.handle.get() {
            return None;
        }
        self.handle.set(scale);
        debug!(available_width, scale, "Viewport scale changed");
        Some(scale)
    }
}
