use super::subscriber::{StatUpdate, Subscriber};
use crate::combat_log::CombatEvent;
use chrono::NaiveDateTime;

/// Fans one tick out to every registered subscriber.
///
/// Invocation order is registration order, and subscribers carry no
/// coupling to their siblings, so order never changes a result.
#[derive(Debug, Default)]
pub struct Dispatcher {
    subscribers: Vec<Subscriber>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Deliver one event-or-heartbeat to every eligible subscriber and
    /// collect their recomputed values.
    pub fn notify(&mut self, event: Option<&CombatEvent>, now: NaiveDateTime) -> Vec<StatUpdate> {
        self.subscribers
            .iter_mut()
            .filter(|s| s.can_handle(event))
            .map(|s| s.update(event, now))
            .collect()
    }
}
