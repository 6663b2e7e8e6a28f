use std::ops::AddAssign;

use crate::HandoverCause;

/// Handover tallies by cause, plus deferred (failed) attempts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandoverCounters {
    pub range:          u64,
    pub load_balancing: u64,
    pub forced:         u64,
    pub failed:         u64,
}

impl HandoverCounters {
    pub fn record(&mut self, cause: HandoverCause) {
        match cause {
            HandoverCause::Range => self.range += 1,
            HandoverCause::LoadBalancing => self.load_balancing += 1,
            HandoverCause::Forced => self.forced += 1,
        }
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Successful handovers of any cause.
    pub fn handovers(&self) -> u64 {
        self.range + self.load_balancing + self.forced
    }
}

impl AddAssign for HandoverCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.range += rhs.range;
        self.load_balancing += rhs.load_balancing;
        self.forced += rhs.forced;
        self.failed += rhs.failed;
    }
}
