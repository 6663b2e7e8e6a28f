//! A single trace-replaying vehicle.

use log::debug;

use vh_core::{AgentRef, Heading, SimClock, StationId, Tick, VehicleId};
use vh_spatial::World;
use vh_trace::Trace;

use crate::{MobilityError, MobilityResult};

/// What a replay step did to the vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayEvent {
    /// External time has not reached the trace's first sample yet.
    Pending,
    /// The vehicle was placed on its first sample and is now active.
    Activated,
    /// The vehicle advanced one sample.
    Moved,
    /// External time did not move forward this tick (ticks finer than 1 s).
    Held,
    /// External time passed the last sample: the vehicle just went inactive.
    Retired,
    /// The vehicle retired earlier and no longer changes.
    Frozen,
}

/// Replay state for one vehicle.
///
/// The vehicle's position lives in the [`World`]; everything else that
/// describes it lives here.  `station` is a lookup handle only: the station
/// arena owns the serving relation and this field mirrors it.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id:       VehicleId,
    pub trace_id: String,
    trace:        Trace,
    /// Index into `trace.samples()` of the sample currently applied.
    cursor:       Option<usize>,
    heading:      Heading,
    active:       bool,
    retired:      bool,
    station:      Option<StationId>,
    /// Ticks this vehicle has been stepped; drives its external time.
    steps:        Tick,
}

impl Vehicle {
    pub fn new(id: VehicleId, trace_id: impl Into<String>, trace: Trace) -> Self {
        Self {
            id,
            trace_id: trace_id.into(),
            trace,
            cursor:   None,
            heading:  Heading::default(),
            active:   false,
            retired:  false,
            station:  None,
            steps:    Tick::ZERO,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Serving station while active; the last serving station once retired.
    #[inline]
    pub fn station(&self) -> Option<StationId> {
        self.station
    }

    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[inline]
    pub fn steps(&self) -> Tick {
        self.steps
    }

    #[inline]
    pub fn agent_ref(&self) -> AgentRef {
        AgentRef::Vehicle(self.id)
    }

    /// Repoint the serving-station handle.  Callers must update the station
    /// arena in the same operation.
    #[inline]
    pub fn set_station(&mut self, station: Option<StationId>) {
        self.station = station;
    }

    // ── Replay ────────────────────────────────────────────────────────────

    /// Apply the sample for tick 0 without advancing the step counter.
    ///
    /// Called once at model construction; a trace starting at timestep 0 is
    /// placed and activated here.
    pub fn initialize(&mut self, clock: &SimClock, world: &mut World) -> MobilityResult<ReplayEvent> {
        self.replay(clock.external_secs_at(self.steps), world)
    }

    /// Step the vehicle's own tick counter and replay up to the matching
    /// external time.
    pub fn advance(&mut self, clock: &SimClock, world: &mut World) -> MobilityResult<ReplayEvent> {
        self.steps = self.steps + 1;
        self.replay(clock.external_secs_at(self.steps), world)
    }

    /// Retire immediately, freezing the vehicle where it is.
    pub fn quarantine(&mut self) {
        self.active = false;
        self.retired = true;
    }

    fn replay(&mut self, external: i64, world: &mut World) -> MobilityResult<ReplayEvent> {
        if self.retired {
            return Ok(ReplayEvent::Frozen);
        }
        if external > self.trace.last_ts() {
            self.quarantine();
            debug!("{} trace {} ended at t={}", self.id, self.trace_id, self.trace.last_ts());
            return Ok(ReplayEvent::Retired);
        }
        if external < self.trace.first_ts() {
            return Ok(ReplayEvent::Pending);
        }

        let (next_index, event) = match self.cursor {
            None => (0, ReplayEvent::Activated),
            Some(i) if self.trace.samples()[i].timestep == external => {
                return Ok(ReplayEvent::Held);
            }
            Some(i) => (i + 1, ReplayEvent::Moved),
        };

        let sample = match self.trace.get(next_index) {
            Some(s) if s.timestep == external => *s,
            other => {
                return Err(MobilityError::Desync {
                    vehicle:  self.id,
                    expected: external,
                    found:    other.map(|s| s.timestep),
                });
            }
        };

        match event {
            ReplayEvent::Activated => world.place(self.agent_ref(), sample.position)?,
            _ => world.move_agent(self.agent_ref(), sample.position)?,
        }
        self.cursor = Some(next_index);
        self.heading = sample.heading;
        self.active = true;
        if event == ReplayEvent::Activated {
            debug!("{} activated at {} heading {}", self.id, sample.position, sample.heading);
        }
        Ok(event)
    }
}
