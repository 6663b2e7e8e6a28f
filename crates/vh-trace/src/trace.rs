//! Trace and trace-feed types.

use std::collections::BTreeMap;

use vh_core::{Heading, Point2};

use crate::{TraceError, TraceResult};

/// One recorded observation of a vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceSample {
    /// Trace time in whole seconds.
    pub timestep: i64,
    pub position: Point2,
    pub heading:  Heading,
}

impl TraceSample {
    pub fn new(timestep: i64, x: f64, y: f64, heading_degrees: f64) -> Self {
        Self {
            timestep,
            position: Point2::new(x, y),
            heading:  Heading(heading_degrees),
        }
    }
}

// ── Trace ─────────────────────────────────────────────────────────────────────

/// An immutable, contiguous sequence of samples: exactly one per integer
/// timestep from `first_ts` to `last_ts` inclusive.
///
/// Construction is the only place the contiguity rule is checked; the
/// replay engine relies on it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    samples: Vec<TraceSample>,
}

impl Trace {
    /// Validate and wrap `samples`, which must already be in timestep order.
    ///
    /// `id` is only used for error messages.
    pub fn new(id: &str, samples: Vec<TraceSample>) -> TraceResult<Self> {
        let Some(first) = samples.first() else {
            return Err(TraceError::Empty(id.to_owned()));
        };
        let mut expected = first.timestep;
        for s in &samples {
            if s.timestep != expected {
                return Err(TraceError::Gap {
                    trace:    id.to_owned(),
                    expected,
                    found:    s.timestep,
                });
            }
            if !(s.position.is_finite() && s.heading.0.is_finite()) {
                return Err(TraceError::NonFinite {
                    trace:    id.to_owned(),
                    timestep: s.timestep,
                });
            }
            expected += 1;
        }
        Ok(Self { samples })
    }

    /// Timestep of the first sample.
    #[inline]
    pub fn first_ts(&self) -> i64 {
        self.samples[0].timestep
    }

    /// Timestep of the last sample.
    #[inline]
    pub fn last_ts(&self) -> i64 {
        self.samples[self.samples.len() - 1].timestep
    }

    /// `true` if `ts` lies within `[first_ts, last_ts]`.
    #[inline]
    pub fn covers(&self, ts: i64) -> bool {
        (self.first_ts()..=self.last_ts()).contains(&ts)
    }

    #[inline]
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Sample at position `i` in the sequence (not a timestep lookup).
    #[inline]
    pub fn get(&self, i: usize) -> Option<&TraceSample> {
        self.samples.get(i)
    }

    /// Sample recorded at timestep `ts`.
    pub fn sample_at(&self, ts: i64) -> Option<&TraceSample> {
        if !self.covers(ts) {
            return None;
        }
        self.samples.get((ts - self.first_ts()) as usize)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: an empty trace cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ── TraceFeed ─────────────────────────────────────────────────────────────────

/// All traces available to a run, keyed by trace id.
///
/// Iteration is in ascending id order, which fixes the vehicle spawn order
/// independently of how the traces were loaded.
#[derive(Clone, Debug, Default)]
pub struct TraceFeed {
    traces: BTreeMap<String, Trace>,
}

impl TraceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the trace stored under `id`.
    pub fn insert(&mut self, id: impl Into<String>, trace: Trace) -> Option<Trace> {
        self.traces.insert(id.into(), trace)
    }

    pub fn get(&self, id: &str) -> Option<&Trace> {
        self.traces.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trace)> + '_ {
        self.traces.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Last timestep across all traces, or `None` for an empty feed.
    pub fn last_ts(&self) -> Option<i64> {
        self.traces.values().map(Trace::last_ts).max()
    }
}

impl IntoIterator for TraceFeed {
    type Item     = (String, Trace);
    type IntoIter = std::collections::btree_map::IntoIter<String, Trace>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.into_iter()
    }
}

impl FromIterator<(String, Trace)> for TraceFeed {
    fn from_iter<I: IntoIterator<Item = (String, Trace)>>(iter: I) -> Self {
        Self { traces: iter.into_iter().collect() }
    }
}
