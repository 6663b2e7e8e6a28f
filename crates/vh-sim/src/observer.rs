//! Simulation observer trait for progress reporting and data collection.

use vh_core::Tick;

use crate::{HandoverEvent, TickReport};

/// Callbacks invoked by [`Model::step`][crate::Model::step] and
/// [`Model::run`][crate::Model::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: handover log
///
/// ```rust,ignore
/// struct HandoverLog(Vec<HandoverEvent>);
///
/// impl SimObserver for HandoverLog {
///     fn on_handover(&mut self, event: &HandoverEvent) {
///         self.0.push(*event);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for every applied handover, as soon as it is applied.
    fn on_handover(&mut self, _event: &HandoverEvent) {}

    /// Called at the end of each tick with the tick's aggregate state.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once by `run` after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
