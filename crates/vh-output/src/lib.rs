//! `vh-output`: per-tick output writers for the vehicular handover simulator.
//!
//! | Writer        | Files created                                                      |
//! | ------------- | ------------------------------------------------------------------ |
//! | [`CsvWriter`] | `station_loads.csv`, `vehicle_distances.csv`, `tick_summaries.csv` |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `vh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vh_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! model.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StationLoadRow, TickSummaryRow, VehicleDistanceRow};
pub use writer::OutputWriter;
