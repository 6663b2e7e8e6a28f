//! `vh-sim`: the tick loop for the vehicular handover simulator.
//!
//! # Tick loop
//!
//! ```text
//! build (tick 0):
//!   stations created, wired as a ring, placed, registered
//!   one vehicle per trace spawned and registered
//!   tick-0 replay; active vehicles assigned to their nearest station
//!
//! step (tick n ≥ 1):
//!   ① Clock  : advance to tick n.
//!   ② Agents : the scheduler steps every agent once, in registration order:
//!                 stations (creation order) → evaluate served vehicles,
//!                                             apply handovers immediately
//!                 vehicles (creation order) → replay one trace step
//!   ③ Check  : served-set invariants (debug builds).
//!   ④ Report : TickReport to the observer.
//! ```
//!
//! Stations are registered before vehicles, so handover decisions for tick
//! `n` see vehicle positions from the end of tick `n − 1`.  Changing the
//! registration order changes results.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vh_core::SimConfig;
//! use vh_sim::{ModelBuilder, NoopObserver};
//! use vh_spatial::World;
//!
//! let world = World::rectangular_loop(200.0, 200.0, 5.0)?;
//! let mut model = ModelBuilder::new(SimConfig::default(), world, feed).build()?;
//! model.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod report;
pub mod scheduler;


pub use builder::ModelBuilder;
pub use error::{SimError, SimResult};
pub use model::{DesyncPolicy, Model};
pub use observer::{NoopObserver, SimObserver};
pub use report::{gini, HandoverEvent, StationLoad, TickReport, VehicleDistance};
pub use scheduler::Scheduler;
