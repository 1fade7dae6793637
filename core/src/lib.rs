pub mod combat_log;
pub mod config;
pub mod meter;

// Re-exports for convenience
pub use combat_log::{CombatEvent, LogParser, LogTail, read_log_file};
pub use config::AppConfig;
pub use meter::{Analyzer, MeterSnapshot, Sample, SampleWindow, StatUpdate, Subscriber};
