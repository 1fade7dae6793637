//! Windowed damage statistics
//!
//! This module provides:
//! - **Sample window**: ordered (timestamp, amount) buffer with age-based
//!   eviction
//! - **Subscribers**: one self-contained aggregation unit per statistic
//! - **Dispatcher**: fans each tick out to every eligible subscriber
//! - **Analyzer**: composition root owning the published snapshot values
//!
//! # Tick model
//!
//! The caller polls its event source once per tick and hands the result,
//! an event or `None`, to [`Analyzer::tick`]. `None` is a heartbeat: it
//! carries no damage but still drives age-out of stale samples in
//! time-based statistics. Everything here is single-threaded and
//! synchronous; one tick runs to completion before the next.

mod analyzer;
mod dispatcher;
mod subscriber;
mod window;


pub use analyzer::{Analyzer, MeterSnapshot};
pub use dispatcher::Dispatcher;
pub use subscriber::{StatUpdate, Subscriber};
pub use window::{Sample, SampleWindow};
