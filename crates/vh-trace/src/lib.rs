//! `vh-trace`: recorded vehicle trajectories (the trace feed).
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! | ---------- | -------------------------------------------------------------- |
//! | [`trace`]  | `TraceSample`, `Trace` (validated), `TraceFeed`                |
//! | [`loader`] | `load_feed_csv`, `load_feed_reader`, `HeadingConvention`       |
//! | [`synth`]  | `LoopTrace`, `synthesize_fleet`: traces around a waypoint loop |
//! | [`error`]  | `TraceError`, `TraceResult<T>`                                 |
//!
//! Traces are loaded completely before a run starts and are read-only from
//! then on; nothing in the simulation performs I/O.

pub mod error;
pub mod loader;
pub mod synth;
pub mod trace;


pub use error::{TraceError, TraceResult};
pub use loader::{load_feed_csv, load_feed_reader, HeadingConvention};
pub use synth::{synthesize_fleet, FleetParams, LoopTrace};
pub use trace::{Trace, TraceFeed, TraceSample};
