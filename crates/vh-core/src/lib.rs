//! `vh-core`: foundational types for the vehicular handover simulator.
//!
//! This crate is a dependency of every other `vh-*` crate.  It intentionally
//! has no `vh-*` dependencies and a single required external one
//! (`thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                            |
//! | --------- | --------------------------------------------------- |
//! | [`ids`]   | `VehicleId`, `StationId`, `AgentRef`                |
//! | [`geo`]   | `Point2`, `Heading`, `moving_toward`                |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                     |
//! | [`error`] | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                              |
//! | --------- | --------------------------------------------------- |
//! | `serde`   | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{moving_toward, Heading, Point2};
pub use ids::{AgentRef, StationId, VehicleId};
pub use time::{SimClock, SimConfig, Tick};
