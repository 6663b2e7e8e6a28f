//! TOML scenario file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use vh_core::SimConfig;
use vh_handover::{RangeHandover, StationSpec};
use vh_sim::DesyncPolicy;
use vh_spatial::{ring_layout, World};
use vh_trace::{FleetParams, HeadingConvention};

/// Everything one run needs, as read from the scenario file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    pub sim:       SimConfig,
    pub world:     WorldSection,
    pub handover:  HandoverSection,
    /// Explicit stations.  Empty: one per road corner.
    pub stations:  Vec<StationSpec>,
    pub traces:    TraceSection,
    pub output:    OutputSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WorldSection {
    pub width:          f64,
    pub height:         f64,
    /// Distance from the world edge to the rectangular road.
    pub road_inset:     f64,
    /// Distance from each road corner to its station, toward the interior.
    pub station_offset: f64,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self { width: 200.0, height: 200.0, road_inset: 5.0, station_offset: 5.0 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HandoverSection {
    #[serde(flatten)]
    pub strategy:      RangeHandover,
    pub desync_policy: DesyncPolicy,
    /// Range of derived corner stations.
    pub range_m:       f64,
    /// Capacity of derived corner stations.
    pub capacity:      usize,
}

impl Default for HandoverSection {
    fn default() -> Self {
        Self {
            strategy:      RangeHandover::default(),
            desync_policy: DesyncPolicy::default(),
            range_m:       45.0,
            capacity:      10,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TraceSection {
    /// Recorded traces.  Without one, a synthetic fleet is generated.
    pub csv:       Option<PathBuf>,
    pub heading:   HeadingConvention,
    pub synthetic: FleetParams,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { dir: PathBuf::from("output/ring") }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn world(&self) -> Result<World> {
        let w = &self.world;
        Ok(World::rectangular_loop(w.width, w.height, w.road_inset)?)
    }

    /// Explicit stations, or one per road corner of `world`.
    pub fn station_specs(&self, world: &World) -> Vec<StationSpec> {
        if !self.stations.is_empty() {
            return self.stations.clone();
        }
        ring_layout(world.waypoints(), self.world.station_offset)
            .into_iter()
            .map(|p| StationSpec::new(p, self.handover.range_m, self.handover.capacity))
            .collect()
    }
}
