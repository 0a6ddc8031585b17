//! Rolling equity history.
//!
//! Samples are kept in append order in a `VecDeque`; every append evicts
//! whatever fell out of the retention window relative to the new sample, so
//! the buffer never needs a separate cleanup timer.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tracing::debug;

/// Default retention window in days.
const RETENTION_DAYS: i64 = 7;

/// Account value observed at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquitySample {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}

/// Summary statistics over a run of samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquityStats {
    pub samples: usize,
    pub first: Decimal,
    pub latest: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    /// Change from first to latest in percent, rounded to 2 dp.
    /// `None` when the first value is zero or the ratio is out of range.
    pub percent_change: Option<Decimal>,
}

impl EquityStats {
    /// Compute stats over `samples`, or `None` if there are none.
    pub fn from_samples(samples: &[EquitySample]) -> Option<Self> {
        let first = samples.first()?.value;
        let latest = samples.last()?.value;

        let (min, max) = samples
            .iter()
            .fold((first, first), |(lo, hi), s| (lo.min(s.value), hi.max(s.value)));

        // Extreme ratios overflow Decimal; report no change figure then.
        let percent_change = latest
            .checked_sub(first)
            .and_then(|delta| delta.checked_div(first))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp(2));

        Some(Self {
            samples: samples.len(),
            first,
            latest,
            min,
            max,
            percent_change,
        })
    }
}

/// Time-windowed equity samples owned by one monitor session.
#[derive(Debug, Clone)]
pub struct EquityHistory {
    samples: VecDeque<EquitySample>,
    retention: TimeDelta,
}

impl Default for EquityHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EquityHistory {
    /// Empty history with the default 7-day retention.
    pub fn new() -> Self {
        Self::with_retention(TimeDelta::days(RETENTION_DAYS))
    }

    /// Empty history with a custom retention window.
    pub fn with_retention(retention: TimeDelta) -> Self {
        Self {
            samples: VecDeque::new(),
            retention,
        }
    }

    /// Append a sample at the tail, then evict everything older than
    /// `sample.timestamp - retention`.
    ///
    /// A sample stamped earlier than the current tail is moved forward to the
    /// tail's timestamp so the history stays ordered.
    pub fn append(&mut self, mut sample: EquitySample) {
        if let Some(tail) = self.samples.back() {
            if sample.timestamp < tail.timestamp {
                debug!(
                    sample = %sample.timestamp,
                    tail = %tail.timestamp,
                    "equity sample older than tail, clamping"
                );
                sample.timestamp = tail.timestamp;
            }
        }
        self.samples.push_back(sample);

        let cutoff = sample.timestamp - self.retention;
        while self.samples.front().is_some_and(|s| s.timestamp < cutoff) {
            self.samples.pop_front();
        }
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<EquitySample> {
        self.samples.back().copied()
    }

    /// Owned copy of the retained samples, oldest first.
    pub fn snapshot(&self) -> Vec<EquitySample> {
        self.samples.iter().copied().collect()
    }

    /// Stats over the retained samples.
    pub fn stats(&self) -> Option<EquityStats> {
        let (front, back) = self.samples.as_slices();
        if back.is_empty() {
            EquityStats::from_samples(front)
        } else {
            EquityStats::from_samples(&self.snapshot())
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
