//! The `HandoverStrategy` trait: the extension point for station logic.

use vh_core::{Heading, Point2, StationId, VehicleId};

use crate::{StationStore, DEFAULT_DISTANCE_THRESHOLD};

/// What a strategy sees of one served vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleView {
    pub id:              VehicleId,
    pub position:        Point2,
    pub heading:         Heading,
    /// Consecutive previous evaluations that ended `Deferred`.
    pub failed_attempts: u32,
}

/// Why a vehicle changed station.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandoverCause {
    /// Leaving coverage toward a neighbor with free capacity.
    Range,
    /// Moved off an overloaded station while still in its coverage.
    LoadBalancing,
    /// Accepted by a neighbor despite heading away from it, after repeated
    /// deferrals.
    Forced,
}

/// Outcome of evaluating one served vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Keep the current station.
    Stay,
    /// Hand the vehicle over to `to`.
    Transfer { to: StationId, cause: HandoverCause },
    /// The vehicle is exiting but no neighbor qualifies; retry next tick.
    Deferred,
}

/// Pluggable per-vehicle handover logic run by every station each tick.
///
/// Implementations only read the station arena.  Applying a
/// [`Decision::Transfer`] is the caller's job, so one strategy value can be
/// shared by all stations.
pub trait HandoverStrategy: Send + Sync + 'static {
    /// Decide what to do with `vehicle`, currently served by `serving`.
    fn decide(&self, stations: &StationStore, serving: StationId, vehicle: &VehicleView) -> Decision;

    /// Exit threshold applied to stations that do not set their own.
    fn default_distance_threshold(&self) -> f64 {
        DEFAULT_DISTANCE_THRESHOLD
    }
}
