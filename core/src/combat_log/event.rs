use chrono::NaiveDateTime;

/// One observed hit, derived from a single log line.
///
/// Immutable once constructed; the parser is the only producer and the
/// amount is guaranteed non-negative by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatEvent {
    pub line_number: u64,
    pub timestamp: NaiveDateTime,
    pub source: String,
    pub target: String,
    pub ability: String,
    pub amount: i64,
}
