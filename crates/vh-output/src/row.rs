//! Plain data row types written by output backends.

use vh_sim::TickReport;

/// Load of one station at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationLoadRow {
    pub tick:       u64,
    pub station_id: u32,
    pub load:       u64,
    pub capacity:   u64,
}

/// Distance from one active vehicle to its serving station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleDistanceRow {
    pub tick:       u64,
    pub vehicle_id: u32,
    pub station_id: u32,
    pub distance_m: f64,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub external_secs:     i64,
    pub active_vehicles:   u64,
    /// Handovers by cause during this tick.
    pub ho_range:          u64,
    pub ho_load_balancing: u64,
    pub ho_forced:         u64,
    /// Deferred handover attempts during this tick.
    pub ho_failed:         u64,
    pub gini_load:         f64,
}

impl From<&TickReport> for TickSummaryRow {
    fn from(report: &TickReport) -> Self {
        Self {
            tick:              report.tick.0,
            external_secs:     report.external_secs,
            active_vehicles:   report.active_vehicles as u64,
            ho_range:          report.counters.range,
            ho_load_balancing: report.counters.load_balancing,
            ho_forced:         report.counters.forced,
            ho_failed:         report.counters.failed,
            gini_load:         report.gini_load,
        }
    }
}

pub(crate) fn station_rows(report: &TickReport) -> Vec<StationLoadRow> {
    report
        .station_loads
        .iter()
        .map(|s| StationLoadRow {
            tick:       report.tick.0,
            station_id: s.station.0,
            load:       s.load as u64,
            capacity:   s.capacity as u64,
        })
        .collect()
}

pub(crate) fn vehicle_rows(report: &TickReport) -> Vec<VehicleDistanceRow> {
    report
        .vehicle_distances
        .iter()
        .map(|d| VehicleDistanceRow {
            tick:       report.tick.0,
            vehicle_id: d.vehicle.0,
            station_id: d.station.0,
            distance_m: d.distance_m,
        })
        .collect()
}
