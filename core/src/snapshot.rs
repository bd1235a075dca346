use std::collections::BTreeMap;

use crate::geometry::Rect;
use crate::ids::TileId;

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry<H> {
    pub handle: H,
    pub rect: Rect,
}

/// Geometry of every tracked tile at one instant. Entries are read eagerly,
/// so a snapshot never observes later layout changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSnapshot<H> {
    entries: BTreeMap<TileId, SnapshotEntry<H>>,
}

impl<H> PositionSnapshot<H> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Later insertions with the same id replace earlier ones, matching
    /// document order when fed from a selector query.
    pub fn insert(&mut self, tile_id: TileId, handle: H, rect: Rect) {
        self.entries.insert(tile_id, SnapshotEntry { handle, rect });
    }

    pub fn get(&self, tile_id: &TileId) -> Option<&SnapshotEntry<H>> {
        self.entries.get(tile_id)
    }

    pub fn rect(&self, tile_id: &TileId) -> Option<Rect> {
        self.entries.get(tile_id).map(|entry| entry.rect)
    }

    pub fn contains(&self, tile_id: &TileId) -> bool {
        self.entries.contains_key(tile_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TileId, &SnapshotEntry<H>)> {
        self.entries.iter()
    }
}

impl<H> Default for PositionSnapshot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FromIterator<(TileId, H, Rect)> for PositionSnapshot<H> {
    fn from_iter<I: IntoIterator<Item = (TileId, H, Rect)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (tile_id, handle, rect) in iter {
            snapshot.insert(tile_id, handle, rect);
        }
        snapshot
    }
}
