//! Station topology derived from the road layout.
//!
//! Stations sit just inside the road's corner waypoints and are wired as a
//! ring: each one knows its successor and predecessor in waypoint order.

use vh_core::{Point2, StationId};

/// One station position per waypoint, shifted `offset` metres toward the
/// waypoints' centroid along each axis.
///
/// A waypoint that already shares a coordinate with the centroid is not
/// shifted along that axis.
pub fn ring_layout(waypoints: &[Point2], offset: f64) -> Vec<Point2> {
    if waypoints.is_empty() {
        return Vec::new();
    }
    let n = waypoints.len() as f64;
    let cx = waypoints.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = waypoints.iter().map(|p| p.y).sum::<f64>() / n;

    waypoints
        .iter()
        .map(|p| Point2::new(p.x + toward(p.x, cx) * offset, p.y + toward(p.y, cy) * offset))
        .collect()
}

fn toward(from: f64, to: f64) -> f64 {
    if to > from {
        1.0
    } else if to < from {
        -1.0
    } else {
        0.0
    }
}

/// Neighbour lists for `n` stations arranged in a ring.
///
/// Station `i` gets `[successor, predecessor]`, never itself and without
/// duplicates, so a two-station ring links each to the other exactly once
/// and a single station has no neighbours.
pub fn ring_neighbors(n: usize) -> Vec<Vec<StationId>> {
    (0..n)
        .map(|i| {
            let mut out = Vec::with_capacity(2);
            for j in [(i + 1) % n, (i + n - 1) % n] {
                let id = StationId(j as u32);
                if j != i && !out.contains(&id) {
                    out.push(id);
                }
            }
            out
        })
        .collect()
}
