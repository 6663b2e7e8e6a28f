//! `RangeHandover`: hand vehicles over as they leave coverage.

use vh_core::{moving_toward, StationId};

use crate::{
    is_exiting, rank_candidates, Decision, HandoverCause, HandoverStrategy, StationStore,
    VehicleView, DEFAULT_DISTANCE_THRESHOLD,
};

/// What to do with a vehicle that keeps exiting while every suitable
/// neighbor is full.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum OverloadPolicy {
    /// Stay with the current station and retry every tick, however long the
    /// overload lasts.
    #[default]
    Tolerate,
    /// After `attempts` consecutive deferrals, accept the best in-range
    /// neighbor with free capacity even when heading away from it.
    ForceAfter { attempts: u32 },
}

/// Range-driven handover.
///
/// 1. A vehicle is exiting when it is beyond `range × threshold` and not
///    moving toward its station.
/// 2. Exiting vehicles go to the first in-range neighbor (ranked by
///    `distance / range`) that has free capacity and that the vehicle is
///    moving toward.  Without one, the decision is `Deferred`.
/// 3. Optionally, a non-exiting vehicle on a station loaded to at least
///    `load_balance_threshold × capacity` moves to a less loaded in-range
///    neighbor it is moving toward.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangeHandover {
    pub distance_threshold:     f64,
    pub overload:               OverloadPolicy,
    pub load_balance_threshold: Option<f64>,
}

impl Default for RangeHandover {
    fn default() -> Self {
        Self {
            distance_threshold:     DEFAULT_DISTANCE_THRESHOLD,
            overload:               OverloadPolicy::Tolerate,
            load_balance_threshold: None,
        }
    }
}

impl RangeHandover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, distance_threshold: f64) -> Self {
        self.distance_threshold = distance_threshold;
        self
    }

    pub fn with_overload(mut self, overload: OverloadPolicy) -> Self {
        self.overload = overload;
        self
    }

    pub fn with_load_balancing(mut self, threshold: f64) -> Self {
        self.load_balance_threshold = Some(threshold);
        self
    }

    fn on_exit(&self, stations: &StationStore, serving: StationId, vehicle: &VehicleView) -> Decision {
        let ranked = rank_candidates(stations, serving, vehicle.position);
        let accepted = ranked.iter().filter_map(|c| stations.get(c.station)).find(|c| {
            c.has_capacity() && moving_toward(vehicle.position, vehicle.heading, c.position)
        });
        if let Some(target) = accepted {
            return Decision::Transfer { to: target.id, cause: HandoverCause::Range };
        }

        if let OverloadPolicy::ForceAfter { attempts } = self.overload {
            if vehicle.failed_attempts >= attempts {
                let forced = ranked
                    .iter()
                    .filter_map(|c| stations.get(c.station))
                    .find(|c| c.has_capacity());
                if let Some(target) = forced {
                    return Decision::Transfer { to: target.id, cause: HandoverCause::Forced };
                }
            }
        }
        Decision::Deferred
    }

    fn rebalance(&self, stations: &StationStore, serving: StationId, vehicle: &VehicleView) -> Decision {
        let (Some(threshold), Some(station)) = (self.load_balance_threshold, stations.get(serving)) else {
            return Decision::Stay;
        };
        if (station.load() as f64) < threshold * station.capacity as f64 {
            return Decision::Stay;
        }
        let own = station.relative_load();
        let target = rank_candidates(stations, serving, vehicle.position)
            .iter()
            .filter_map(|c| stations.get(c.station))
            .find(|c| {
                c.has_capacity()
                    && c.relative_load() < own
                    && moving_toward(vehicle.position, vehicle.heading, c.position)
            })
            .map(|c| c.id);
        match target {
            Some(to) => Decision::Transfer { to, cause: HandoverCause::LoadBalancing },
            None => Decision::Stay,
        }
    }
}

impl HandoverStrategy for RangeHandover {
    fn decide(&self, stations: &StationStore, serving: StationId, vehicle: &VehicleView) -> Decision {
        let Some(station) = stations.get(serving) else {
            return Decision::Stay;
        };
        if is_exiting(station, vehicle.position, vehicle.heading) {
            self.on_exit(stations, serving, vehicle)
        } else {
            self.rebalance(stations, serving, vehicle)
        }
    }

    fn default_distance_threshold(&self) -> f64 {
        self.distance_threshold
    }
}
