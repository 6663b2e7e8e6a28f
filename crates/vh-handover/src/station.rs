//! A single VEC station.

use vh_core::{Point2, StationId, VehicleId};

/// Fraction of the coverage range beyond which a departing vehicle is
/// predicted to be exiting.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.7;

/// Static description of a station, as read from a scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationSpec {
    pub position: Point2,
    /// Nominal coverage radius in metres.
    pub range_m:  f64,
    /// Nominal serving capacity.  Exceeding it is tolerated, never enforced
    /// by eviction.
    pub capacity: usize,
    /// Overrides the strategy's default exit threshold for this station.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_threshold: Option<f64>,
}

impl StationSpec {
    pub fn new(position: Point2, range_m: f64, capacity: usize) -> Self {
        Self { position, range_m, capacity, distance_threshold: None }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = Some(threshold);
        self
    }
}

/// A fixed edge-compute access point.
///
/// `served` is the authoritative serving relation: a vehicle's own station
/// field is only a handle kept in step with it.
#[derive(Clone, Debug)]
pub struct Station {
    pub id:                 StationId,
    pub position:           Point2,
    pub range_m:            f64,
    pub capacity:           usize,
    pub distance_threshold: f64,
    /// Candidate neighbors in configured order (never contains `id`).
    pub neighbors:          Vec<StationId>,
    pub(crate) served:      Vec<VehicleId>,
}

impl Station {
    pub fn from_spec(id: StationId, spec: &StationSpec, default_threshold: f64) -> Self {
        Self {
            id,
            position:           spec.position,
            range_m:            spec.range_m,
            capacity:           spec.capacity,
            distance_threshold: spec.distance_threshold.unwrap_or(default_threshold),
            neighbors:          Vec::new(),
            served:             Vec::new(),
        }
    }

    /// Vehicles served, in the order they joined.
    #[inline]
    pub fn served(&self) -> &[VehicleId] {
        &self.served
    }

    #[inline]
    pub fn serves(&self, vehicle: VehicleId) -> bool {
        self.served.contains(&vehicle)
    }

    #[inline]
    pub fn load(&self) -> usize {
        self.served.len()
    }

    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.load() < self.capacity
    }

    #[inline]
    pub fn is_overloaded(&self) -> bool {
        self.load() > self.capacity
    }

    /// `load / capacity`; infinite for a zero-capacity station.
    pub fn relative_load(&self) -> f64 {
        if self.capacity == 0 {
            f64::INFINITY
        } else {
            self.load() as f64 / self.capacity as f64
        }
    }

    /// Radius beyond which a departing vehicle counts as exiting.
    #[inline]
    pub fn exit_radius(&self) -> f64 {
        self.range_m * self.distance_threshold
    }
}
