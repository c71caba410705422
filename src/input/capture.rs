//! Pointer capture: exclusive ownership of one pointer's event stream.
//!
//! A drag acquires capture on press so movement keeps arriving after the
//! cursor leaves the item, and gives it back on release, cancel or teardown.

use super::events::PointerId;
use crate::types::ItemId;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("{pointer} is already captured by item {owner}")]
    AlreadyCaptured { pointer: PointerId, owner: ItemId },
}

/// The host capability drag engines acquire and release.
pub trait PointerCapture {
    /// Claim `pointer` for `owner`. Re-claiming by the same owner succeeds.
    fn capture(&mut self, pointer: PointerId, owner: &ItemId) -> Result<(), CaptureError>;

    /// Give `pointer` back; returns false if `owner` did not hold it.
    fn release(&mut self, pointer: PointerId, owner: &ItemId) -> bool;

    /// Current owner of `pointer`, if captured.
    fn owner(&self, pointer: PointerId) -> Option<&ItemId>;
}

/// In-process capture table used by the headless session and tests.
#[derive(Debug, Default)]
pub struct CaptureRegistry {
    owners: HashMap<PointerId, ItemId>,
}

impl CaptureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self, pointer: PointerId) -> bool {
        self.owners.contains_key(&pointer)
    }

    pub fn active_count(&self) -> usize {
        self.owners.len()
    }
}

impl PointerCapture for CaptureRegistry {
    fn capture(&mut self, pointer: PointerId, owner: &ItemId) -> Result<(), CaptureError> {
        match self.owners.get(&pointer) {
            Some(current) if current != owner => Err(CaptureError::AlreadyCaptured {
                pointer,
                owner: current.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                debug!(%pointer, item = %owner, "Pointer captured");
                self.owners.insert(pointer, owner.clone());
                Ok(())
            }
        }
    }

    fn release(&mut self, pointer: PointerId, owner: &ItemId) -> bool {
        match self.owners.get(&pointer) {
            Some(current) if current == owner => {
                self.owners.remove(&pointer);
                debug!(%pointer, item = %owner, "Pointer released");
                true
            }
            _ => {
                trace!(%pointer, item = %owner, "Release without matching capture");
                false
            }
        }
    }

    fn owner(&self, pointer: PointerId) -> Option<&ItemId> {
        self.owners.get(&pointer)
    }
}
