//! Exit prediction and neighbor ranking.

use vh_core::{moving_toward, Heading, Point2, StationId};

use crate::{Station, StationStore};

/// True when the vehicle is beyond `station`'s exit radius and not heading
/// back toward it.
///
/// A vehicle that is far out but approaching is not exiting.
pub fn is_exiting(station: &Station, pos: Point2, heading: Heading) -> bool {
    station.position.distance(pos) > station.exit_radius()
        && !moving_toward(pos, heading, station.position)
}

/// A neighbor considered for handover.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub station: StationId,
    /// `distance / range`; values above 1 are out of useful range.
    pub ratio:   f64,
}

/// In-range neighbors of `serving`, best first.
///
/// Candidates are sorted ascending by `distance / range`.  The sort is
/// stable, so equal ratios keep neighbor-list order.  The list is cut at
/// the first candidate whose ratio exceeds 1.
pub fn rank_candidates(stations: &StationStore, serving: StationId, pos: Point2) -> Vec<Candidate> {
    let Some(station) = stations.get(serving) else {
        return Vec::new();
    };
    let mut ranked: Vec<Candidate> = station
        .neighbors
        .iter()
        .filter(|&&n| n != serving)
        .filter_map(|&n| stations.get(n))
        .map(|c| Candidate {
            station: c.id,
            ratio:   c.position.distance(pos) / c.range_m,
        })
        .collect();
    ranked.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
    let cut = ranked.iter().position(|c| c.ratio > 1.0).unwrap_or(ranked.len());
    ranked.truncate(cut);
    ranked
}
