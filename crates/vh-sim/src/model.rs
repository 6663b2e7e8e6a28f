//! The `Model` struct and its tick loop.

use log::{debug, info, warn};

use vh_core::{AgentRef, SimClock, SimConfig, StationId, Tick, VehicleId};
use vh_handover::{Decision, HandoverCounters, HandoverStrategy, StationStore, VehicleView};
use vh_mobility::{MobilityError, ReplayEvent, VehicleStore};
use vh_spatial::{StationIndex, World};

use crate::{
    gini, HandoverEvent, Scheduler, SimError, SimObserver, SimResult, StationLoad, TickReport,
    VehicleDistance,
};

/// What to do when a vehicle's trace desynchronizes from simulated time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DesyncPolicy {
    /// Fail the step with the desync error.
    #[default]
    Abort,
    /// Retire the vehicle on the spot, release it from its station, and
    /// carry on.
    Quarantine,
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// The simulation: world, stations, vehicles and the scheduler that steps
/// them.
///
/// Stations own the serving relation; each vehicle carries a station handle
/// that is repointed in the same operation as every served-set change.
///
/// Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct Model<S: HandoverStrategy> {
    /// Run configuration (tick duration, total ticks, output interval).
    pub config: SimConfig,

    /// Current tick and its external trace time.
    pub clock: SimClock,

    /// Positions of every placed station and vehicle.
    pub world: World,

    /// Station arena; owns every served set.
    pub stations: StationStore,

    /// Vehicle arena; one vehicle per trace.
    pub vehicles: VehicleStore,

    pub(crate) index:           StationIndex,
    pub(crate) scheduler:       Scheduler,
    pub(crate) strategy:        S,
    pub(crate) desync_policy:   DesyncPolicy,
    /// Consecutive deferred handover attempts, indexed by `VehicleId`.
    pub(crate) failed_attempts: Vec<u32>,
    pub(crate) totals:          HandoverCounters,
}

impl<S: HandoverStrategy> Model<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick through `config.end_tick()`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            "run finished at {}: {} handovers ({} range, {} load balancing, {} forced), {} deferred",
            self.clock,
            self.totals.handovers(),
            self.totals.range,
            self.totals.load_balancing,
            self.totals.forced,
            self.totals.failed,
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current one (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Advance the clock one tick and step every agent once.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickReport> {
        self.clock.advance();
        let now = self.clock.current_tick;
        let mut counters = HandoverCounters::default();

        let scheduler = std::mem::take(&mut self.scheduler);
        let result = scheduler.advance(|agent| match agent {
            AgentRef::Station(id) => self.step_station(id, now, &mut counters, observer),
            AgentRef::Vehicle(id) => self.step_vehicle(id),
        });
        self.scheduler = scheduler;
        result?;

        self.totals += counters;
        if cfg!(debug_assertions) {
            self.check_invariants()?;
        }

        let report = self.report(now, counters);
        observer.on_tick_end(&report);
        Ok(report)
    }

    /// Cumulative handover counters since build.
    pub fn totals(&self) -> HandoverCounters {
        self.totals
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn desync_policy(&self) -> DesyncPolicy {
        self.desync_policy
    }

    /// Current serving station of `vehicle`, if it is active.
    pub fn serving_station(&self, vehicle: VehicleId) -> Option<StationId> {
        self.vehicles.get(vehicle).filter(|v| v.is_active()).and_then(|v| v.station())
    }

    /// Verify the serving relation.
    ///
    /// - every vehicle in a served set is active and points back at that
    ///   station;
    /// - every active vehicle is in the served set of the station it points
    ///   at;
    /// - total load equals the number of active vehicles.
    pub fn check_invariants(&self) -> SimResult<()> {
        for station in self.stations.iter() {
            for &v in station.served() {
                let vehicle = self
                    .vehicles
                    .get(v)
                    .ok_or_else(|| SimError::Inconsistent(format!("{} serves unknown {v}", station.id)))?;
                if !vehicle.is_active() {
                    return Err(SimError::Inconsistent(format!("{} serves inactive {v}", station.id)));
                }
                if vehicle.station() != Some(station.id) {
                    return Err(SimError::Inconsistent(format!(
                        "{} serves {v}, which points at {:?}",
                        station.id,
                        vehicle.station()
                    )));
                }
            }
        }
        for vehicle in self.vehicles.iter().filter(|v| v.is_active()) {
            let served = vehicle
                .station()
                .and_then(|s| self.stations.get(s))
                .is_some_and(|s| s.serves(vehicle.id));
            if !served {
                return Err(SimError::Inconsistent(format!(
                    "active {} is not served by its station {:?}",
                    vehicle.id,
                    vehicle.station()
                )));
            }
        }
        let load = self.stations.total_load();
        let active = self.vehicles.active_count();
        if load != active {
            return Err(SimError::Inconsistent(format!(
                "total load {load} != {active} active vehicles"
            )));
        }
        Ok(())
    }

    // ── Tick-0 replay ─────────────────────────────────────────────────────

    /// Apply the tick-0 sample of every vehicle.  Called once by the builder.
    pub(crate) fn initialize(&mut self) -> SimResult<()> {
        for id in self.vehicles.ids() {
            let replay = self.vehicles.initialize(id, &self.clock, &mut self.world);
            self.apply_replay(id, replay)?;
        }
        self.check_invariants()
    }

    // ── Agent steps ───────────────────────────────────────────────────────

    /// Evaluate every active vehicle the station serves, applying each
    /// handover before evaluating the next vehicle.
    fn step_station<O: SimObserver>(
        &mut self,
        id:       StationId,
        now:      Tick,
        counters: &mut HandoverCounters,
        observer: &mut O,
    ) -> SimResult<()> {
        let served: Vec<VehicleId> = self
            .stations
            .get(id)
            .ok_or_else(|| SimError::Inconsistent(format!("scheduled unknown {id}")))?
            .served()
            .to_vec();

        for vid in served {
            let Some(vehicle) = self.vehicles.get(vid).filter(|v| v.is_active()) else {
                continue;
            };
            let position = self
                .world
                .position(vehicle.agent_ref())
                .ok_or_else(|| SimError::Inconsistent(format!("active {vid} is not placed")))?;
            let view = VehicleView {
                id: vid,
                position,
                heading: vehicle.heading(),
                failed_attempts: self.failed_attempts[vid.index()],
            };

            match self.strategy.decide(&self.stations, id, &view) {
                Decision::Stay => self.failed_attempts[vid.index()] = 0,
                Decision::Deferred => {
                    counters.record_failed();
                    let attempts = &mut self.failed_attempts[vid.index()];
                    *attempts += 1;
                    if *attempts == 1 {
                        warn!("{now}: {vid} is leaving {id} but no neighbor can take it");
                    } else {
                        debug!("{now}: {vid} handover from {id} deferred ({} attempts)", *attempts);
                    }
                }
                Decision::Transfer { to, cause } => {
                    self.stations.transfer(vid, id, to)?;
                    self.vehicles.set_station(vid, Some(to))?;
                    self.failed_attempts[vid.index()] = 0;
                    counters.record(cause);
                    debug!("{now}: {vid} {id} -> {to} ({cause:?})");
                    observer.on_handover(&HandoverEvent { tick: now, vehicle: vid, from: id, to, cause });
                }
            }
        }
        Ok(())
    }

    fn step_vehicle(&mut self, id: VehicleId) -> SimResult<()> {
        let replay = self.vehicles.advance(id, &self.clock, &mut self.world);
        self.apply_replay(id, replay)
    }

    /// Keep the serving relation in step with a vehicle's replay outcome.
    fn apply_replay(&mut self, id: VehicleId, replay: Result<ReplayEvent, MobilityError>) -> SimResult<()> {
        match replay {
            Ok(ReplayEvent::Activated) => self.assign_nearest(id),
            Ok(ReplayEvent::Retired) => self.release(id),
            Ok(_) => Ok(()),
            Err(err @ MobilityError::Desync { .. }) if self.desync_policy == DesyncPolicy::Quarantine => {
                warn!("quarantining {id}: {err}");
                if let Some(vehicle) = self.vehicles.get_mut(id) {
                    vehicle.quarantine();
                }
                self.release(id)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Serve a newly active vehicle from its nearest station.
    fn assign_nearest(&mut self, id: VehicleId) -> SimResult<()> {
        let position = self
            .world
            .position(AgentRef::Vehicle(id))
            .ok_or_else(|| SimError::Inconsistent(format!("activated {id} is not placed")))?;
        let station = self
            .index
            .nearest(position)
            .ok_or_else(|| SimError::Config("no stations to serve vehicles".into()))?;
        self.stations.serve(station, id)?;
        self.vehicles.set_station(id, Some(station))?;
        debug!("{id} at {position} assigned to {station}");
        Ok(())
    }

    /// Drop an inactive vehicle from its station's served set.  The vehicle
    /// keeps its station handle as a record of where it was last served.
    fn release(&mut self, id: VehicleId) -> SimResult<()> {
        self.failed_attempts[id.index()] = 0;
        let station = self.vehicles.get(id).and_then(|v| v.station());
        if let Some(station) = station {
            if self.stations.get(station).is_some_and(|s| s.serves(id)) {
                self.stations.release(station, id)?;
                debug!("{id} left the run, released by {station}");
            }
        }
        Ok(())
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    fn report(&self, tick: Tick, counters: HandoverCounters) -> TickReport {
        let station_loads: Vec<StationLoad> = self
            .stations
            .iter()
            .map(|s| StationLoad { station: s.id, load: s.load(), capacity: s.capacity })
            .collect();
        let vehicle_distances: Vec<VehicleDistance> = self
            .vehicles
            .iter()
            .filter(|v| v.is_active())
            .filter_map(|v| {
                let station = self.stations.get(v.station()?)?;
                let position = self.world.position(v.agent_ref())?;
                Some(VehicleDistance {
                    vehicle:    v.id,
                    station:    station.id,
                    distance_m: position.distance(station.position),
                })
            })
            .collect();
        let loads: Vec<usize> = station_loads.iter().map(|s| s.load).collect();

        TickReport {
            tick,
            external_secs: self.clock.external_secs_at(tick),
            gini_load: gini(&loads),
            active_vehicles: self.vehicles.active_count(),
            station_loads,
            vehicle_distances,
            counters,
            totals: self.totals,
        }
    }
}
