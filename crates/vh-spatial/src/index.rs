//! Nearest-station spatial index.
//!
//! An R-tree (via `rstar`) maps a position to the closest station.  Used when
//! a vehicle first becomes active and needs an initial serving station.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use vh_core::{Point2, StationId};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct StationEntry {
    point: [f64; 2],
    id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── StationIndex ──────────────────────────────────────────────────────────────

/// Static index over station positions.  Stations never move, so it is built
/// once at model construction.
pub struct StationIndex {
    tree: RTree<StationEntry>,
}

impl StationIndex {
    /// Bulk-load the index from `(id, position)` pairs.
    pub fn build(stations: impl IntoIterator<Item = (StationId, Point2)>) -> Self {
        let entries: Vec<StationEntry> = stations
            .into_iter()
            .map(|(id, p)| StationEntry { point: [p.x, p.y], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The station closest to `pos` by Euclidean distance.
    ///
    /// The R-tree makes no promise about the order of equidistant entries,
    /// so every station tied at the minimum distance is inspected and the
    /// lowest `StationId` (the first in the station list) wins.
    ///
    /// Returns `None` only if the index is empty.
    pub fn nearest(&self, pos: Point2) -> Option<StationId> {
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&[pos.x, pos.y]);
        let (first, best_d2) = iter.next()?;
        let best = iter
            .take_while(|&(_, d2)| d2 == best_d2)
            .map(|(e, _)| e.id)
            .fold(first.id, StationId::min);
        Some(best)
    }
}
