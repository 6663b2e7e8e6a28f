//! Fluent builder for constructing a [`Model`].

use log::info;

use vh_core::{AgentRef, SimConfig, StationId};
use vh_handover::{HandoverCounters, HandoverStrategy, RangeHandover, StationSpec, StationStore};
use vh_mobility::VehicleStore;
use vh_spatial::{ring_layout, ring_neighbors, StationIndex, World};
use vh_trace::TraceFeed;

use crate::{DesyncPolicy, Model, Scheduler, SimError, SimResult};

/// Default station offset from each road corner, toward the interior.
pub const DEFAULT_STATION_OFFSET_M: f64 = 5.0;
/// Default station coverage radius.
pub const DEFAULT_RANGE_M: f64 = 45.0;
/// Default station capacity.
pub const DEFAULT_CAPACITY: usize = 10;

/// Fluent builder for [`Model<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick duration, total ticks, output interval
/// - [`World`]: bounds and road waypoints
/// - [`TraceFeed`]: one vehicle is spawned per trace, in trace-id order
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                               |
/// |-----------------------|-------------------------------------------------------|
/// | `.stations(v)`        | One per waypoint, 5 m inward, range 45 m, capacity 10 |
/// | `.neighbors(v)`       | Ring: `[successor, predecessor]` in station order     |
/// | `.strategy(s)`        | `RangeHandover::default()`                            |
/// | `.desync_policy(p)`   | `DesyncPolicy::Abort`                                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(config, world, feed)
///     .strategy(RangeHandover::new().with_overload(OverloadPolicy::ForceAfter { attempts: 10 }))
///     .desync_policy(DesyncPolicy::Quarantine)
///     .build()?;
/// model.run(&mut NoopObserver)?;
/// ```
pub struct ModelBuilder<S: HandoverStrategy = RangeHandover> {
    config:        SimConfig,
    world:         World,
    feed:          TraceFeed,
    stations:      Option<Vec<StationSpec>>,
    neighbors:     Option<Vec<Vec<StationId>>>,
    strategy:      S,
    desync_policy: DesyncPolicy,
}

impl ModelBuilder<RangeHandover> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, world: World, feed: TraceFeed) -> Self {
        Self {
            config,
            world,
            feed,
            stations:      None,
            neighbors:     None,
            strategy:      RangeHandover::default(),
            desync_policy: DesyncPolicy::default(),
        }
    }
}

impl<S: HandoverStrategy> ModelBuilder<S> {
    /// Supply explicit stations.  Ids follow list order.
    pub fn stations(mut self, stations: Vec<StationSpec>) -> Self {
        self.stations = Some(stations);
        self
    }

    /// Supply explicit neighbor lists (one per station, in id order).
    pub fn neighbors(mut self, neighbors: Vec<Vec<StationId>>) -> Self {
        self.neighbors = Some(neighbors);
        self
    }

    /// Replace the handover strategy.
    pub fn strategy<T: HandoverStrategy>(self, strategy: T) -> ModelBuilder<T> {
        ModelBuilder {
            config:        self.config,
            world:         self.world,
            feed:          self.feed,
            stations:      self.stations,
            neighbors:     self.neighbors,
            strategy,
            desync_policy: self.desync_policy,
        }
    }

    pub fn desync_policy(mut self, policy: DesyncPolicy) -> Self {
        self.desync_policy = policy;
        self
    }

    /// Validate inputs, create and place every agent, apply the tick-0
    /// replay, and return a ready-to-run [`Model`].
    pub fn build(self) -> SimResult<Model<S>> {
        self.config.validate()?;
        let mut world = self.world;

        // ── Stations ──────────────────────────────────────────────────────
        let specs = match self.stations {
            Some(specs) => specs,
            None => ring_layout(world.waypoints(), DEFAULT_STATION_OFFSET_M)
                .into_iter()
                .map(|p| StationSpec::new(p, DEFAULT_RANGE_M, DEFAULT_CAPACITY))
                .collect(),
        };
        if specs.is_empty() {
            return Err(SimError::Config("no stations: supply stations or world waypoints".into()));
        }
        let mut stations = StationStore::from_specs(&specs, self.strategy.default_distance_threshold())?;
        let neighbors = self.neighbors.unwrap_or_else(|| ring_neighbors(stations.len()));
        stations.wire_neighbors(neighbors)?;

        let mut scheduler = Scheduler::new();
        for station in stations.iter() {
            world.place(AgentRef::Station(station.id), station.position)?;
            scheduler.register(station.id);
        }
        let index = StationIndex::build(stations.iter().map(|s| (s.id, s.position)));

        // ── Vehicles ──────────────────────────────────────────────────────
        let mut vehicles = VehicleStore::new();
        for (trace_id, trace) in self.feed {
            let id = vehicles.spawn(trace_id, trace);
            scheduler.register(id);
        }

        info!(
            "model: {}x{} m world, {} stations, {} vehicles, {} ms/tick",
            world.width(),
            world.height(),
            stations.len(),
            vehicles.len(),
            self.config.tick_duration_ms,
        );

        let mut model = Model {
            clock:           self.config.make_clock(),
            config:          self.config,
            failed_attempts: vec![0; vehicles.len()],
            world,
            stations,
            vehicles,
            index,
            scheduler,
            strategy:        self.strategy,
            desync_policy:   self.desync_policy,
            totals:          HandoverCounters::default(),
        };
        model.initialize()?;
        Ok(model)
    }
}
