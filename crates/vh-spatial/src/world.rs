//! The bounded, non-wrapping simulation plane.
//!
//! # Data layout
//!
//! Positions are stored in two dense vectors indexed by `StationId` and
//! `VehicleId` respectively.  `None` means the agent exists but has not been
//! placed yet (a vehicle whose trace starts later than tick 0).
//!
//! The world only validates; it never resolves collisions.  Any number of
//! agents may share a coordinate.

use vh_core::{AgentRef, Point2};

use crate::{SpatialError, SpatialResult};

/// A `[0, width] × [0, height]` continuous space holding agent positions.
#[derive(Clone, Debug)]
pub struct World {
    width:     f64,
    height:    f64,
    /// Road-layout corner points.  Only used to derive station placement.
    waypoints: Vec<Point2>,
    stations:  Vec<Option<Point2>>,
    vehicles:  Vec<Option<Point2>>,
}

impl World {
    /// Create an empty world with the given bounds (metres).
    pub fn new(width: f64, height: f64) -> SpatialResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SpatialError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            waypoints: Vec::new(),
            stations:  Vec::new(),
            vehicles:  Vec::new(),
        })
    }

    /// A world whose road is a rectangle inset `inset` metres from every edge.
    ///
    /// Waypoints run counter-clockwise from the bottom-left corner.
    pub fn rectangular_loop(width: f64, height: f64, inset: f64) -> SpatialResult<Self> {
        let world = Self::new(width, height)?;
        world.with_waypoints(vec![
            Point2::new(inset, inset),
            Point2::new(width - inset, inset),
            Point2::new(width - inset, height - inset),
            Point2::new(inset, height - inset),
        ])
    }

    /// Replace the layout waypoints.  Every waypoint must lie inside the bounds.
    pub fn with_waypoints(mut self, waypoints: Vec<Point2>) -> SpatialResult<Self> {
        if let Some(&pos) = waypoints.iter().find(|&&p| !self.contains(p)) {
            return Err(SpatialError::WaypointOutOfBounds {
                pos,
                width:  self.width,
                height: self.height,
            });
        }
        self.waypoints = waypoints;
        Ok(self)
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn waypoints(&self) -> &[Point2] {
        &self.waypoints
    }

    /// `true` if `pos` lies in the closed rectangle `[0,width] × [0,height]`.
    #[inline]
    pub fn contains(&self, pos: Point2) -> bool {
        pos.is_finite()
            && (0.0..=self.width).contains(&pos.x)
            && (0.0..=self.height).contains(&pos.y)
    }

    fn check(&self, agent: AgentRef, pos: Point2) -> SpatialResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds {
                agent,
                pos,
                width:  self.width,
                height: self.height,
            })
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Put `agent` at `pos`, whether or not it was placed before.
    pub fn place(&mut self, agent: AgentRef, pos: Point2) -> SpatialResult<()> {
        self.check(agent, pos)?;
        *self.slot_mut(agent) = Some(pos);
        Ok(())
    }

    /// Move an already placed `agent` to `pos`.
    pub fn move_agent(&mut self, agent: AgentRef, pos: Point2) -> SpatialResult<()> {
        self.check(agent, pos)?;
        let slot = self.slot_mut(agent);
        match slot {
            Some(current) => {
                *current = pos;
                Ok(())
            }
            None => Err(SpatialError::NotPlaced(agent)),
        }
    }

    /// Current position of `agent`, or `None` if it was never placed.
    #[inline]
    pub fn position(&self, agent: AgentRef) -> Option<Point2> {
        let slots = match agent {
            AgentRef::Station(id) => self.stations.get(id.index()),
            AgentRef::Vehicle(id) => self.vehicles.get(id.index()),
        };
        slots.copied().flatten()
    }

    /// Number of agents of either kind currently placed.
    pub fn placed_count(&self) -> usize {
        self.stations.iter().chain(&self.vehicles).filter(|p| p.is_some()).count()
    }

    fn slot_mut(&mut self, agent: AgentRef) -> &mut Option<Point2> {
        let (slots, i) = match agent {
            AgentRef::Station(id) => (&mut self.stations, id.index()),
            AgentRef::Vehicle(id) => (&mut self.vehicles, id.index()),
        };
        if slots.len() <= i {
            slots.resize(i + 1, None);
        }
        &mut slots[i]
    }
}
