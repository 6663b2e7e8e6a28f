//! ring: four VEC stations around a closed rectangular road.
//!
//! Loads a TOML scenario, replays recorded traces from CSV (or synthesizes
//! a fleet of loop traces), runs the handover model and writes per-tick CSV
//! output.
//!
//! ```text
//! ring --config demos/ring/ring.toml [--traces traces.csv] [--output dir] [--ticks n]
//! ```

mod scenario;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use vh_output::{CsvWriter, SimOutputObserver};
use vh_sim::{HandoverEvent, ModelBuilder, SimObserver, TickReport};
use vh_trace::{load_feed_csv, synthesize_fleet, TraceFeed};

use scenario::Scenario;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Scenario file (TOML).
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Trace CSV; overrides `[traces] csv`.
    #[arg(short = 't', long, value_name = "TRACE_CSV")]
    traces: Option<PathBuf>,

    /// Output directory; overrides `[output] dir`.
    #[arg(short = 'o', long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Number of ticks to run; overrides `[sim] total_ticks`.
    #[arg(short = 'n', long)]
    ticks: Option<u64>,
}

// ── Observer wrapper to collect run statistics ────────────────────────────────

struct RunStats<O: SimObserver> {
    inner:        O,
    peak_load:    usize,
    overloaded:   u64,
    gini_sum:     f64,
    ticks:        u64,
    handovers:    u64,
}

impl<O: SimObserver> RunStats<O> {
    fn new(inner: O) -> Self {
        Self { inner, peak_load: 0, overloaded: 0, gini_sum: 0.0, ticks: 0, handovers: 0 }
    }
}

impl<O: SimObserver> SimObserver for RunStats<O> {
    fn on_handover(&mut self, event: &HandoverEvent) {
        self.handovers += 1;
        self.inner.on_handover(event);
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.gini_sum += report.gini_load;
        self.overloaded += report.overloaded().count() as u64;
        let peak = report.station_loads.iter().map(|s| s.load).max().unwrap_or(0);
        self.peak_load = self.peak_load.max(peak);
        self.inner.on_tick_end(report);
    }

    fn on_sim_end(&mut self, final_tick: vh_core::Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

fn init_logging(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    env_logger::Builder::from_env(env).format_timestamp_millis().init();
}

fn load_traces(scenario: &Scenario, override_csv: Option<PathBuf>, world: &vh_spatial::World) -> Result<TraceFeed> {
    match override_csv.or_else(|| scenario.traces.csv.clone()) {
        Some(path) => {
            let feed = load_feed_csv(&path, scenario.traces.heading)
                .with_context(|| format!("loading traces from {}", path.display()))?;
            info!("loaded {} traces from {}", feed.len(), path.display());
            Ok(feed)
        }
        None => {
            let feed = synthesize_fleet(world.waypoints(), &scenario.traces.synthetic)?;
            info!(
                "synthesized {} loop traces (seed {})",
                feed.len(),
                scenario.traces.synthetic.seed
            );
            Ok(feed)
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let mut scenario = Scenario::load(&args.config)?;
    init_logging(scenario.log_level.as_deref());

    if let Some(ticks) = args.ticks {
        scenario.sim.total_ticks = ticks;
    }
    let output_dir = args.output.clone().unwrap_or_else(|| scenario.output.dir.clone());

    // 1. World, stations, traces.
    let world = scenario.world()?;
    let stations = scenario.station_specs(&world);
    let feed = load_traces(&scenario, args.traces.clone(), &world)?;
    if feed.is_empty() {
        warn!("no traces: stations will stay idle");
    }

    // 2. Model.
    let config = scenario.sim.clone();
    let mut model = ModelBuilder::new(config.clone(), world, feed)
        .stations(stations)
        .strategy(scenario.handover.strategy.clone())
        .desync_policy(scenario.handover.desync_policy)
        .build()?;

    // 3. Output.
    let writer = CsvWriter::new(&output_dir)
        .with_context(|| format!("creating output in {}", output_dir.display()))?;
    let mut obs = RunStats::new(SimOutputObserver::new(writer, &config));

    // 4. Run.
    let t0 = Instant::now();
    model.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let totals = model.totals();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  ticks: {}  |  vehicles: {}  |  stations: {}",
        obs.ticks,
        model.vehicles.len(),
        model.stations.len()
    );
    println!(
        "  handovers: {} (range {}, load balancing {}, forced {})  |  deferred: {}",
        obs.handovers, totals.range, totals.load_balancing, totals.forced, totals.failed
    );
    println!(
        "  peak load: {}  |  overloaded station-ticks: {}  |  mean gini: {:.3}",
        obs.peak_load,
        obs.overloaded,
        if obs.ticks > 0 { obs.gini_sum / obs.ticks as f64 } else { 0.0 }
    );
    println!("  output: {}", output_dir.display());
    println!();

    println!("{:<10} {:>10} {:>6} {:>9}", "Station", "Position", "Load", "Capacity");
    println!("{}", "-".repeat(38));
    for s in model.stations.iter() {
        println!(
            "{:<10} {:>10} {:>6} {:>9}",
            s.id.0,
            format!("{:.0},{:.0}", s.position.x, s.position.y),
            s.load(),
            s.capacity
        );
    }

    Ok(())
}
