use super::dispatcher::Dispatcher;
use super::subscriber::{StatUpdate, Subscriber};
use crate::combat_log::CombatEvent;
use chrono::{Duration, NaiveDateTime};

/// Latest published value from each subscriber.
///
/// A snapshot is valid for external read between ticks; each field is
/// overwritten whenever its subscriber runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeterSnapshot {
    pub dps: f64,
    pub total_damage: i64,
    pub average_hit: f64,
    pub minimum_hit: i64,
    pub maximum_hit: i64,
}

/// Composition root for the statistics core.
///
/// Wires one subscriber of each kind to the dispatcher and owns the
/// published snapshot. The caller drives it with [`tick`](Analyzer::tick)
/// once per poll of its event source and reads the snapshot whenever it
/// wants to render; rendering cadence is the caller's business.
#[derive(Debug)]
pub struct Analyzer {
    dispatcher: Dispatcher,
    snapshot: MeterSnapshot,
}

impl Analyzer {
    /// Build an analyzer whose damage-per-second window looks back
    /// `retention` from the current tick.
    pub fn new(retention: Duration) -> Self {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Subscriber::total_damage());
        dispatcher.register(Subscriber::damage_per_second(retention));
        dispatcher.register(Subscriber::average_hit());
        dispatcher.register(Subscriber::minimum_hit());
        dispatcher.register(Subscriber::maximum_hit());
        Self {
            dispatcher,
            snapshot: MeterSnapshot::default(),
        }
    }

    /// Run one tick: dispatch the polled result and fold every emitted
    /// value into the snapshot.
    pub fn tick(&mut self, event: Option<&CombatEvent>, now: NaiveDateTime) {
        for update in self.dispatcher.notify(event, now) {
            match update {
                StatUpdate::TotalDamage(v) => self.snapshot.total_damage = v,
                StatUpdate::DamagePerSecond(v) => self.snapshot.dps = v,
                StatUpdate::AverageHit(v) => self.snapshot.average_hit = v,
                StatUpdate::MinimumHit(v) => self.snapshot.minimum_hit = v,
                StatUpdate::MaximumHit(v) => self.snapshot.maximum_hit = v,
            }
        }
    }

    pub fn snapshot(&self) -> &MeterSnapshot {
        &self.snapshot
    }
}
