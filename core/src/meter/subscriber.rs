use super::window::{Sample, SampleWindow};
use crate::combat_log::CombatEvent;
use chrono::{Duration, NaiveDateTime};

/// A freshly recomputed statistic value, returned by every `update` call.
///
/// Subscribers publish by returning one of these; the analyzer applies it
/// to its own snapshot fields after each dispatch. No callbacks, no shared
/// mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatUpdate {
    TotalDamage(i64),
    DamagePerSecond(f64),
    AverageHit(f64),
    MinimumHit(i64),
    MaximumHit(i64),
}

/// One self-contained unit of aggregation logic.
///
/// A closed set of variants behind a uniform two-operation surface:
/// [`can_handle`](Subscriber::can_handle) decides eligibility for a tick,
/// [`update`](Subscriber::update) is the sole state mutator and always
/// returns the recomputed value. Subscribers never see each other.
#[derive(Debug, Clone)]
pub enum Subscriber {
    TotalDamage(TotalDamage),
    DamagePerSecond(DamagePerSecond),
    AverageHit(AverageHit),
    MinimumHit(MinimumHit),
    MaximumHit(MaximumHit),
}

impl Subscriber {
    pub fn total_damage() -> Self {
        Self::TotalDamage(TotalDamage::default())
    }

    pub fn damage_per_second(retention: Duration) -> Self {
        Self::DamagePerSecond(DamagePerSecond::new(retention))
    }

    pub fn average_hit() -> Self {
        Self::AverageHit(AverageHit::default())
    }

    pub fn minimum_hit() -> Self {
        Self::MinimumHit(MinimumHit::default())
    }

    pub fn maximum_hit() -> Self {
        Self::MaximumHit(MaximumHit::default())
    }

    /// Pure eligibility predicate, no side effects.
    ///
    /// Only the damage-per-second subscriber accepts `None`: the heartbeat
    /// is what ages its window out during quiet stretches. Every other
    /// statistic ignores empty ticks entirely.
    pub fn can_handle(&self, event: Option<&CombatEvent>) -> bool {
        match self {
            Self::DamagePerSecond(_) => true,
            Self::TotalDamage(_)
            | Self::AverageHit(_)
            | Self::MinimumHit(_)
            | Self::MaximumHit(_) => event.is_some(),
        }
    }

    /// Apply one tick and return the recomputed value.
    pub fn update(&mut self, event: Option<&CombatEvent>, now: NaiveDateTime) -> StatUpdate {
        match self {
            Self::TotalDamage(s) => StatUpdate::TotalDamage(s.update(event)),
            Self::DamagePerSecond(s) => StatUpdate::DamagePerSecond(s.update(event, now)),
            Self::AverageHit(s) => StatUpdate::AverageHit(s.update(event)),
            Self::MinimumHit(s) => StatUpdate::MinimumHit(s.update(event)),
            Self::MaximumHit(s) => StatUpdate::MaximumHit(s.update(event)),
        }
    }
}

/// Running sum of every accepted amount, never trimmed.
#[derive(Debug, Clone, Default)]
pub struct TotalDamage {
    total: i64,
}

impl TotalDamage {
    fn update(&mut self, event: Option<&CombatEvent>) -> i64 {
        if let Some(event) = event {
            self.total += event.amount;
        }
        self.total
    }
}

/// Damage over the retention window divided by the window's span.
///
/// Events land in the window as they arrive; heartbeats trim it. Trimming
/// is single-step, at most one stale sample leaves per heartbeat, matching
/// the original meter's behavior (see [`SampleWindow::trim`]).
#[derive(Debug, Clone)]
pub struct DamagePerSecond {
    window: SampleWindow,
}

impl DamagePerSecond {
    fn new(retention: Duration) -> Self {
        Self {
            window: SampleWindow::new(retention),
        }
    }

    fn update(&mut self, event: Option<&CombatEvent>, now: NaiveDateTime) -> f64 {
        match event {
            Some(event) => self.window.push(Sample::from(event)),
            None => {
                self.window.trim(now);
            }
        }
        // rate against the event's own clock when one arrived, the caller's
        // clock on heartbeats
        let now = event.map(|e| e.timestamp).unwrap_or(now);
        self.current(now)
    }

    fn current(&self, now: NaiveDateTime) -> f64 {
        let Some(oldest) = self.window.oldest() else {
            return 0.0;
        };
        let span_ms = (now - oldest.timestamp).num_milliseconds();
        // a single fresh sample has no span yet; report 0 rather than a
        // division by zero
        if span_ms <= 0 {
            return 0.0;
        }
        self.window.sum() as f64 / (span_ms as f64 / 1000.0)
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }
}

/// Mean hit size over every accepted amount.
#[derive(Debug, Clone, Default)]
pub struct AverageHit {
    sum: i64,
    count: u64,
}

impl AverageHit {
    fn update(&mut self, event: Option<&CombatEvent>) -> f64 {
        if let Some(event) = event {
            self.sum += event.amount;
            self.count += 1;
        }
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Smallest amount seen so far; 0 until the first hit lands.
#[derive(Debug, Clone, Default)]
pub struct MinimumHit {
    min: Option<i64>,
}

impl MinimumHit {
    fn update(&mut self, event: Option<&CombatEvent>) -> i64 {
        if let Some(event) = event {
            self.min = Some(self.min.map_or(event.amount, |m| m.min(event.amount)));
        }
        self.min.unwrap_or(0)
    }
}

/// Largest amount seen so far; 0 until the first hit lands.
#[derive(Debug, Clone, Default)]
pub struct MaximumHit {
    max: Option<i64>,
}

impl MaximumHit {
    fn update(&mut self, event: Option<&CombatEvent>) -> i64 {
        if let Some(event) = event {
            self.max = Some(self.max.map_or(event.amount, |m| m.max(event.amount)));
        }
        self.max.unwrap_or(0)
    }
}
