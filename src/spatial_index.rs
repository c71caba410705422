//! Spatial Index Module
//!
//! R-tree over item bounding boxes for pointer hit testing. Text notes have
//! no explicit box, so their bounds come from the estimated text extent.

use crate::board::BoardState;
use crate::types::{ItemId, TextMetrics};
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

/// A spatial entry representing an item's bounding box in board space.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub item_id: ItemId,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(item_id: ItemId, position: (f64, f64), size: (f64, f64)) -> Self {
        Self {
            item_id,
            min_x: position.0,
            min_y: position.1,
            max_x: position.0 + size.0,
            max_y: position.1 + size.1,
        }
    }

    fn same_bounds(&self, other: &SpatialEntry) -> bool {
        self.min_x == other.min_x
            && self.min_y == other.min_y
            && self.max_x == other.max_x
            && self.max_y == other.max_y
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Spatial index for board items using an R-tree.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every item of `state`.
    pub fn from_state(state: &BoardState, metrics: &TextMetrics) -> Self {
        let mut index = Self::new();
        index.rebuild(state, metrics);
        index
    }

    pub fn insert(&mut self, item_id: ItemId, position: (f64, f64), size: (f64, f64)) {
        if let Some(old_entry) = self.entries.remove(&item_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(item_id.clone(), position, size);
        self.tree.insert(entry.clone());
        self.entries.insert(item_id, entry);
    }

    pub fn remove(&mut self, item_id: &ItemId) -> bool {
        if let Some(entry) = self.entries.remove(item_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// All items whose box contains the board-space point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<ItemId> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.item_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild(&mut self, state: &BoardState, metrics: &TextMetrics) {
        let entries: Vec<SpatialEntry> = state
            .items()
            .iter()
            .map(|item| {
                let (x, y, w, h) = item.bounds(metrics);
                SpatialEntry::new(item.id.clone(), (x, y), (w, h))
            })
            .collect();

        self.entries = entries.iter().map(|e| (e.item_id.clone(), e.clone())).collect();
        self.tree = RTree::bulk_load(entries);
    }

    /// Bring the index in line with `state`. Only entries of items that were
    /// added, moved, resized, edited or removed are touched.
    pub fn sync(&mut self, state: &BoardState, metrics: &TextMetrics) {
        let gone: Vec<ItemId> = self
            .entries
            .keys()
            .filter(|id| state.get_item(id).is_none())
            .cloned()
            .collect();
        for id in &gone {
            self.remove(id);
        }

        for item in state.items() {
            let (x, y, w, h) = item.bounds(metrics);
            let current = SpatialEntry::new(item.id.clone(), (x, y), (w, h));
            let unchanged = self
                .entries
                .get(&item.id)
                .is_some_and(|entry| entry.same_bounds(&current));
            if !unchanged {
                self.insert(item.id.clone(), (x, y), (w, h));
            }
        }
    }

    /// The topmost item (highest z-index) under a board-space point.
    pub fn topmost_at(&self, state: &BoardState, x: f64, y: f64) -> Option<ItemId> {
        self.query_point(x, y)
            .into_iter()
            .filter_map(|id| state.get_item(&id).map(|item| (item.z_index, id)))
            .max_by_key(|(z, _)| *z)
            .map(|(_, id)| id)
    }
}
