//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to trace ("external") time is held in `SimClock`:
//!
//!   external_secs = floor(tick * tick_duration_ms / 1000)
//!
//! Trace samples are recorded once per integer second, so a tick duration of
//! at most 1000 ms visits every recorded timestep.  With the default 500 ms
//! two consecutive ticks map onto the same trace second.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and external (trace) seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated milliseconds represented by one tick.
    pub tick_duration_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// External trace time (whole seconds) corresponding to `tick`.
    #[inline]
    pub fn external_secs_at(&self, tick: Tick) -> i64 {
        (tick.0 * self.tick_duration_ms as u64 / 1_000) as i64
    }

    /// External trace time at `current_tick`.
    #[inline]
    pub fn external_secs(&self) -> i64 {
        self.external_secs_at(self.current_tick)
    }

    /// Simulated milliseconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// How many ticks cover `secs` external seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        (secs * 1_000).div_ceil(self.tick_duration_ms as u64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={}s)", self.current_tick, self.external_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from the scenario TOML by the application crate and
/// passed to the model builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated milliseconds per tick.  Must be in `1..=1000`.  Default: 500.
    pub tick_duration_ms: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Write per-station / per-vehicle rows every N ticks.  Tick summaries
    /// are written every tick regardless.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:      500,
            total_ticks:           400,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (inclusive: the last processed tick).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject tick durations that would skip recorded trace seconds.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 || self.tick_duration_ms > 1_000 {
            return Err(CoreError::Config(format!(
                "tick_duration_ms must be in 1..=1000, got {}",
                self.tick_duration_ms
            )));
        }
        Ok(())
    }
}
