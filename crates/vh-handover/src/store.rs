//! The `StationStore`: flat station arena indexed by `StationId`.

use log::debug;

use vh_core::{StationId, VehicleId};

use crate::{HandoverError, HandoverResult, Station, StationSpec};

/// Every station of the run.  Stations are created once and never removed.
#[derive(Clone, Debug, Default)]
pub struct StationStore {
    stations: Vec<Station>,
}

impl StationStore {
    /// Build stations from `specs`; ids follow list order.
    ///
    /// Specs without an explicit exit threshold get `default_threshold`.
    pub fn from_specs(specs: &[StationSpec], default_threshold: f64) -> HandoverResult<Self> {
        let mut stations = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let id = StationId(i as u32);
            if !(spec.range_m.is_finite() && spec.range_m > 0.0) {
                return Err(HandoverError::Config(format!(
                    "{id}: range must be positive, got {}",
                    spec.range_m
                )));
            }
            if !spec.position.is_finite() {
                return Err(HandoverError::Config(format!("{id}: non-finite position")));
            }
            let station = Station::from_spec(id, spec, default_threshold);
            if !(station.distance_threshold.is_finite() && station.distance_threshold > 0.0) {
                return Err(HandoverError::Config(format!(
                    "{id}: distance threshold must be positive, got {}",
                    station.distance_threshold
                )));
            }
            stations.push(station);
        }
        Ok(Self { stations })
    }

    /// Install neighbor lists, one per station in id order.
    ///
    /// Self-references and repeats are dropped; configured order is kept.
    pub fn wire_neighbors(&mut self, neighbors: Vec<Vec<StationId>>) -> HandoverResult<()> {
        if neighbors.len() != self.stations.len() {
            return Err(HandoverError::Config(format!(
                "{} neighbor lists for {} stations",
                neighbors.len(),
                self.stations.len()
            )));
        }
        for list in &neighbors {
            if let Some(bad) = list.iter().find(|n| n.index() >= self.stations.len()) {
                return Err(HandoverError::UnknownStation(*bad));
            }
        }
        for (station, list) in self.stations.iter_mut().zip(neighbors) {
            let mut wired: Vec<StationId> = Vec::with_capacity(list.len());
            for n in list {
                if n != station.id && !wired.contains(&n) {
                    wired.push(n);
                }
            }
            station.neighbors = wired;
        }
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    /// Load of `id`, or 0 for an unknown station.
    pub fn load(&self, id: StationId) -> usize {
        self.get(id).map_or(0, Station::load)
    }

    pub fn has_capacity(&self, id: StationId) -> bool {
        self.get(id).is_some_and(Station::has_capacity)
    }

    /// Per-station loads in id order.
    pub fn loads(&self) -> Vec<usize> {
        self.stations.iter().map(Station::load).collect()
    }

    /// Sum of loads over every station.
    pub fn total_load(&self) -> usize {
        self.stations.iter().map(Station::load).sum()
    }

    // ── Serving relation ──────────────────────────────────────────────────

    /// Add `vehicle` to the end of `station`'s served set.
    pub fn serve(&mut self, station: StationId, vehicle: VehicleId) -> HandoverResult<()> {
        let s = self.get_mut(station)?;
        if s.serves(vehicle) {
            return Err(HandoverError::AlreadyServed { station, vehicle });
        }
        s.served.push(vehicle);
        Ok(())
    }

    /// Remove `vehicle` from `station`'s served set.
    pub fn release(&mut self, station: StationId, vehicle: VehicleId) -> HandoverResult<()> {
        let s = self.get_mut(station)?;
        let pos = s
            .served
            .iter()
            .position(|&v| v == vehicle)
            .ok_or(HandoverError::NotServed { station, vehicle })?;
        s.served.remove(pos);
        Ok(())
    }

    /// Move `vehicle` from `from`'s served set to the end of `to`'s.
    ///
    /// All preconditions are checked first: on error neither set changed.
    pub fn transfer(&mut self, vehicle: VehicleId, from: StationId, to: StationId) -> HandoverResult<()> {
        if from == to {
            return Err(HandoverError::SelfTransfer { station: from, vehicle });
        }
        let target = self.get(to).ok_or(HandoverError::UnknownStation(to))?;
        if target.serves(vehicle) {
            return Err(HandoverError::AlreadyServed { station: to, vehicle });
        }
        let source = self.get(from).ok_or(HandoverError::UnknownStation(from))?;
        let pos = source
            .served
            .iter()
            .position(|&v| v == vehicle)
            .ok_or(HandoverError::NotServed { station: from, vehicle })?;

        self.stations[from.index()].served.remove(pos);
        self.stations[to.index()].served.push(vehicle);
        debug!("{vehicle} handed over {from} -> {to}");
        Ok(())
    }

    fn get_mut(&mut self, id: StationId) -> HandoverResult<&mut Station> {
        self.stations.get_mut(id.index()).ok_or(HandoverError::UnknownStation(id))
    }
}
