//! Per-tick aggregate state handed to observers.

use vh_core::{StationId, Tick, VehicleId};
use vh_handover::{HandoverCause, HandoverCounters};

/// Load of one station at the end of a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationLoad {
    pub station:  StationId,
    pub load:     usize,
    pub capacity: usize,
}

/// Distance from an active vehicle to its serving station.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleDistance {
    pub vehicle:    VehicleId,
    pub station:    StationId,
    pub distance_m: f64,
}

/// One applied handover.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandoverEvent {
    pub tick:    Tick,
    pub vehicle: VehicleId,
    pub from:    StationId,
    pub to:      StationId,
    pub cause:   HandoverCause,
}

/// Aggregate state at the end of one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick:              Tick,
    /// External trace time the tick maps to.
    pub external_secs:     i64,
    /// Every station, in id order.
    pub station_loads:     Vec<StationLoad>,
    /// Every active vehicle, in id order.
    pub vehicle_distances: Vec<VehicleDistance>,
    pub active_vehicles:   usize,
    /// Handovers and deferrals during this tick.
    pub counters:          HandoverCounters,
    /// Handovers and deferrals since the model was built.
    pub totals:            HandoverCounters,
    /// Gini coefficient of the station loads.
    pub gini_load:         f64,
}

impl TickReport {
    pub fn load_of(&self, station: StationId) -> Option<usize> {
        self.station_loads.iter().find(|s| s.station == station).map(|s| s.load)
    }

    /// Stations serving more vehicles than their nominal capacity.
    pub fn overloaded(&self) -> impl Iterator<Item = &StationLoad> + '_ {
        self.station_loads.iter().filter(|s| s.load > s.capacity)
    }
}

/// Gini coefficient of `loads`: 0 for a perfectly even spread (or no load
/// at all), approaching 1 as load concentrates on one station.
pub fn gini(loads: &[usize]) -> f64 {
    let total: usize = loads.iter().sum();
    if loads.is_empty() || total == 0 {
        return 0.0;
    }
    let mut sorted = loads.to_vec();
    sorted.sort_unstable();
    let n = sorted.len() as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| (i + 1) as f64 * x as f64)
        .sum();
    2.0 * weighted / (n * total as f64) - (n + 1.0) / n
}
