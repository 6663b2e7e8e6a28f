//! Synthetic traces around a closed waypoint polygon.
//!
//! Used by the demo binary when no recorded trace CSV is supplied, and by
//! tests that need a vehicle to drive a known route.  A loop trace moves at
//! constant speed along the polygon edges, one sample per second, with the
//! heading set to the direction of the edge it is currently on.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use vh_core::{Heading, Point2};

use crate::{Trace, TraceError, TraceFeed, TraceResult, TraceSample};

/// A constant-speed drive around a closed polygon.
#[derive(Clone, Debug)]
pub struct LoopTrace {
    /// Polygon corners in driving order.  The last one connects back to the first.
    pub waypoints: Vec<Point2>,
    /// Metres per second.
    pub speed_mps: f64,
    /// Timestep of the first sample.
    pub start_ts:  i64,
    /// Number of full laps; the last sample is back on the first waypoint
    /// when the lap length is a whole multiple of `speed_mps`.
    pub laps:      u32,
}

impl LoopTrace {
    pub fn new(waypoints: Vec<Point2>, speed_mps: f64) -> Self {
        Self { waypoints, speed_mps, start_ts: 0, laps: 1 }
    }

    pub fn starting_at(mut self, ts: i64) -> Self {
        self.start_ts = ts;
        self
    }

    pub fn laps(mut self, laps: u32) -> Self {
        self.laps = laps;
        self
    }

    /// Total length of one lap in metres.
    pub fn lap_length(&self) -> f64 {
        let n = self.waypoints.len();
        (0..n).map(|i| self.waypoints[i].distance(self.waypoints[(i + 1) % n])).sum()
    }

    /// Sample the loop once per second and validate the result.
    pub fn build(&self, id: &str) -> TraceResult<Trace> {
        if self.waypoints.len() < 2 {
            return Err(TraceError::Params(format!("trace {id:?}: a loop needs at least 2 waypoints")));
        }
        if !(self.speed_mps.is_finite() && self.speed_mps > 0.0) {
            return Err(TraceError::Params(format!("trace {id:?}: speed must be positive")));
        }
        let lap = self.lap_length();
        if lap <= 0.0 {
            return Err(TraceError::Params(format!("trace {id:?}: degenerate loop")));
        }

        let total = lap * self.laps as f64;
        let steps = (total / self.speed_mps).floor() as i64;
        let samples = (0..=steps)
            .map(|t| {
                let (position, heading) = self.locate((self.speed_mps * t as f64) % lap);
                TraceSample { timestep: self.start_ts + t, position, heading }
            })
            .collect();
        Trace::new(id, samples)
    }

    /// Position and heading at arc length `s` (in `[0, lap)`) along the loop.
    fn locate(&self, s: f64) -> (Point2, Heading) {
        let n = self.waypoints.len();
        let mut remaining = s;
        for i in 0..n {
            let a = self.waypoints[i];
            let b = self.waypoints[(i + 1) % n];
            let len = a.distance(b);
            if remaining < len {
                let f = remaining / len;
                let p = Point2::new(a.x + (b.x - a.x) * f, a.y + (b.y - a.y) * f);
                return (p, Heading::between(a, b));
            }
            remaining -= len;
        }
        // Rounding left `s` a hair past the final edge: that is the start point.
        (self.waypoints[0], Heading::between(self.waypoints[0], self.waypoints[1 % n]))
    }
}

// ── Fleets ────────────────────────────────────────────────────────────────────

/// Parameters for a randomised population of loop traces.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetParams {
    pub count:           usize,
    pub seed:            u64,
    pub min_speed_mps:   f64,
    pub max_speed_mps:   f64,
    /// Start times are drawn uniformly from `0..=max_start_delay` seconds.
    pub max_start_delay: i64,
    pub laps:            u32,
}

impl Default for FleetParams {
    fn default() -> Self {
        Self {
            count:           20,
            seed:            42,
            min_speed_mps:   8.0,
            max_speed_mps:   17.0,
            max_start_delay: 60,
            laps:            1,
        }
    }
}

/// Generate `params.count` loop traces named `loop.000`, `loop.001`, …
///
/// Each vehicle starts at a randomly chosen corner, drives either direction
/// around the loop, and gets its own speed and start time.  The same seed
/// always produces the same feed.
pub fn synthesize_fleet(waypoints: &[Point2], params: &FleetParams) -> TraceResult<TraceFeed> {
    if waypoints.len() < 2 {
        return Err(TraceError::Params("a fleet loop needs at least 2 waypoints".into()));
    }
    if !(params.min_speed_mps > 0.0 && params.min_speed_mps <= params.max_speed_mps) {
        return Err(TraceError::Params(format!(
            "invalid speed range {}..={}",
            params.min_speed_mps, params.max_speed_mps
        )));
    }
    if params.max_start_delay < 0 {
        return Err(TraceError::Params("max_start_delay must not be negative".into()));
    }

    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut feed = TraceFeed::new();
    for i in 0..params.count {
        let mut route = waypoints.to_vec();
        route.rotate_left(rng.gen_range(0..waypoints.len()));
        if rng.gen_bool(0.5) {
            route[1..].reverse();
        }
        let speed = rng.gen_range(params.min_speed_mps..=params.max_speed_mps);
        let start = rng.gen_range(0..=params.max_start_delay);

        let id = format!("loop.{i:03}");
        let trace = LoopTrace::new(route, speed).starting_at(start).laps(params.laps).build(&id)?;
        feed.insert(id, trace);
    }
    Ok(feed)
}
