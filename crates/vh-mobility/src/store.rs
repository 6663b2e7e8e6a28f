//! The `VehicleStore`: the flat vehicle arena.

use vh_core::{SimClock, StationId, VehicleId};
use vh_spatial::World;
use vh_trace::Trace;

use crate::{MobilityError, MobilityResult, ReplayEvent, Vehicle};

/// Every vehicle of the run, indexed by `VehicleId`.
///
/// Vehicles are appended at construction and never removed: a finished
/// trace leaves a retired vehicle in place.
#[derive(Clone, Debug, Default)]
pub struct VehicleStore {
    vehicles: Vec<Vehicle>,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vehicle for `trace` and return its id (sequential from 0).
    pub fn spawn(&mut self, trace_id: impl Into<String>, trace: Trace) -> VehicleId {
        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(Vehicle::new(id, trace_id, trace));
        id
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = VehicleId> + use<> {
        (0..self.vehicles.len() as u32).map(VehicleId)
    }

    /// Number of vehicles currently active.
    pub fn active_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_active()).count()
    }

    /// See [`Vehicle::advance`].
    pub fn advance(&mut self, id: VehicleId, clock: &SimClock, world: &mut World) -> MobilityResult<ReplayEvent> {
        self.get_mut(id).ok_or(MobilityError::NotFound(id))?.advance(clock, world)
    }

    /// See [`Vehicle::initialize`].
    pub fn initialize(&mut self, id: VehicleId, clock: &SimClock, world: &mut World) -> MobilityResult<ReplayEvent> {
        self.get_mut(id).ok_or(MobilityError::NotFound(id))?.initialize(clock, world)
    }

    /// See [`Vehicle::set_station`].
    pub fn set_station(&mut self, id: VehicleId, station: Option<StationId>) -> MobilityResult<()> {
        self.get_mut(id).ok_or(MobilityError::NotFound(id))?.set_station(station);
        Ok(())
    }
}
