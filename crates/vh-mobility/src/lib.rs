//! `vh-mobility`: vehicles that replay recorded traces.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! | ----------- | -------------------------------------------------------------- |
//! | [`vehicle`] | `Vehicle`: trace cursor, heading, activity, serving station    |
//! | [`store`]   | `VehicleStore`: the flat vehicle arena, indexed by `VehicleId` |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                           |
//!
//! # Replay model
//!
//! Each vehicle keeps its own tick counter and converts it to external trace
//! time through the run's [`SimClock`][vh_core::SimClock].  On every step:
//!
//! 1. Before `first_ts` the vehicle is pending: unplaced and inactive.
//! 2. At `first_ts` it is placed on its first sample and becomes active.
//! 3. Within the window it advances exactly one sample whenever external
//!    time moves forward; the sample's timestep must match exactly.
//! 4. Once external time passes `last_ts` it retires: inactive, frozen at
//!    its last position, and ignored by every station from then on.

pub mod error;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{MobilityError, MobilityResult};
pub use store::VehicleStore;
pub use vehicle::{ReplayEvent, Vehicle};
