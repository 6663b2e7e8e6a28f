//! `vh-handover`: VEC stations and the handover decision.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                             |
//! | ------------ | -------------------------------------------------------------------- |
//! | [`station`]  | `Station`, `StationSpec`                                             |
//! | [`store`]    | `StationStore`: station arena owning every served set                |
//! | [`predict`]  | `is_exiting`, `rank_candidates`, `Candidate`                         |
//! | [`strategy`] | `HandoverStrategy` trait, `VehicleView`, `Decision`, `HandoverCause` |
//! | [`range`]    | `RangeHandover`, `OverloadPolicy`: the range-driven strategy         |
//! | [`counters`] | `HandoverCounters`: per-cause handover tallies                       |
//! | [`error`]    | `HandoverError`, `HandoverResult<T>`                                 |
//!
//! # Design notes
//!
//! Deciding and applying are split.  A [`HandoverStrategy`] only reads the
//! [`StationStore`] and returns a [`Decision`]; the simulation loop (vh-sim)
//! applies a `Transfer` through [`StationStore::transfer`] and repoints the
//! vehicle's station handle in the same step.  `transfer` validates every
//! precondition before touching either served set, so a failed transfer
//! leaves both stations untouched.

pub mod counters;
pub mod error;
pub mod predict;
pub mod range;
pub mod station;
pub mod store;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use counters::HandoverCounters;
pub use error::{HandoverError, HandoverResult};
pub use predict::{is_exiting, rank_candidates, Candidate};
pub use range::{OverloadPolicy, RangeHandover};
pub use station::{Station, StationSpec, DEFAULT_DISTANCE_THRESHOLD};
pub use store::StationStore;
pub use strategy::{Decision, HandoverCause, HandoverStrategy, VehicleView};
