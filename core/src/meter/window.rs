use crate::combat_log::CombatEvent;
use chrono::{Duration, NaiveDateTime};
use std::collections::VecDeque;

/// One stored hit, derived 1:1 from an accepted event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub amount: i64,
}

impl From<&CombatEvent> for Sample {
    fn from(event: &CombatEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            amount: event.amount,
        }
    }
}

/// Ordered sample buffer with an age-based eviction policy.
///
/// Insertion order is timestamp order; the log is assumed to arrive with
/// non-decreasing timestamps. Owned by exactly one subscriber.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    retention: Duration,
}

impl SampleWindow {
    pub fn new(retention: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            retention,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
    }

    /// Evict at most one stale sample.
    ///
    /// Removes the oldest sample iff it is strictly older than
    /// `now - retention` and returns whether anything was evicted. This is
    /// a single-step operation, one eviction per call; callers that need
    /// the window strictly bounded must call [`trim_expired`] instead.
    ///
    /// [`trim_expired`]: SampleWindow::trim_expired
    pub fn trim(&mut self, now: NaiveDateTime) -> bool {
        let Some(oldest) = self.samples.front() else {
            return false;
        };
        if oldest.timestamp < now - self.retention {
            self.samples.pop_front();
            true
        } else {
            false
        }
    }

    /// Evict every stale sample, returning how many were removed.
    pub fn trim_expired(&mut self, now: NaiveDateTime) -> usize {
        let mut evicted = 0;
        while self.trim(now) {
            evicted += 1;
        }
        evicted
    }

    pub fn sum(&self) -> i64 {
        self.samples.iter().map(|s| s.amount).sum()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
