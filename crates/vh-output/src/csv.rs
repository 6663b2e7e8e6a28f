//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `station_loads.csv`
//! - `vehicle_distances.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StationLoadRow, TickSummaryRow, VehicleDistanceRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    stations:  Writer<File>,
    vehicles:  Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut stations = Writer::from_path(dir.join("station_loads.csv"))?;
        stations.write_record(["tick", "station_id", "load", "capacity"])?;

        let mut vehicles = Writer::from_path(dir.join("vehicle_distances.csv"))?;
        vehicles.write_record(["tick", "vehicle_id", "station_id", "distance_m"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "external_secs",
            "active_vehicles",
            "ho_range",
            "ho_load_balancing",
            "ho_forced",
            "ho_failed",
            "gini_load",
        ])?;

        Ok(Self {
            stations,
            vehicles,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_station_loads(&mut self, rows: &[StationLoadRow]) -> OutputResult<()> {
        for row in rows {
            self.stations.write_record(&[
                row.tick.to_string(),
                row.station_id.to_string(),
                row.load.to_string(),
                row.capacity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_vehicle_distances(&mut self, rows: &[VehicleDistanceRow]) -> OutputResult<()> {
        for row in rows {
            self.vehicles.write_record(&[
                row.tick.to_string(),
                row.vehicle_id.to_string(),
                row.station_id.to_string(),
                format!("{:.3}", row.distance_m),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.external_secs.to_string(),
            row.active_vehicles.to_string(),
            row.ho_range.to_string(),
            row.ho_load_balancing.to_string(),
            row.ho_forced.to_string(),
            row.ho_failed.to_string(),
            format!("{:.6}", row.gini_load),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stations.flush()?;
        self.vehicles.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
