//! CSV trace loader.
//!
//! # CSV format
//!
//! One row per sample.  Rows for different traces may be interleaved (the
//! usual layout of a floating-car-data export sorted by time); they are
//! grouped and sorted by timestep before validation.
//!
//! ```csv
//! trace_id,timestep,x,y,heading
//! flow_east.0,0,5.0,5.0,0.0
//! flow_east.1,0,5.0,5.0,0.0
//! flow_east.0,1,13.3,5.0,0.0
//! flow_east.1,1,12.1,5.0,0.0
//! ```
//!
//! **`heading`** is interpreted according to [`HeadingConvention`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use vh_core::Heading;

use crate::{Trace, TraceError, TraceFeed, TraceResult, TraceSample};

/// How the `heading` column is measured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeadingConvention {
    /// 0° = +x, counter-clockwise positive.  Stored as-is.
    #[default]
    Math,
    /// 0° = north, clockwise positive (SUMO, GPS).  Converted on load.
    Compass,
}

impl HeadingConvention {
    fn convert(self, degrees: f64) -> Heading {
        match self {
            HeadingConvention::Math    => Heading(degrees),
            HeadingConvention::Compass => Heading::from_compass(degrees),
        }
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TraceRecord {
    trace_id: String,
    timestep: i64,
    x:        f64,
    y:        f64,
    heading:  f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`TraceFeed`] from a CSV file.
pub fn load_feed_csv(path: &Path, convention: HeadingConvention) -> TraceResult<TraceFeed> {
    let file = std::fs::File::open(path).map_err(TraceError::Io)?;
    debug!("Reading traces from {}", path.display());
    load_feed_reader(file, convention)
}

/// Like [`load_feed_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for traces embedded in
/// the binary.
pub fn load_feed_reader<R: Read>(reader: R, convention: HeadingConvention) -> TraceResult<TraceFeed> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_trace: BTreeMap<String, Vec<TraceSample>> = BTreeMap::new();

    for result in csv_reader.deserialize::<TraceRecord>() {
        let row = result.map_err(|e| TraceError::Parse(e.to_string()))?;
        by_trace.entry(row.trace_id).or_default().push(TraceSample {
            timestep: row.timestep,
            position: vh_core::Point2::new(row.x, row.y),
            heading:  convention.convert(row.heading),
        });
    }

    let mut feed = TraceFeed::new();
    for (id, mut samples) in by_trace {
        samples.sort_by_key(|s| s.timestep);
        let trace = Trace::new(&id, samples)?;
        debug!("Loaded trace {id} covering t={}..={}", trace.first_ts(), trace.last_ts());
        feed.insert(id, trace);
    }
    Ok(feed)
}
