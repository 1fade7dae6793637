//! Combat log ingestion
//!
//! This module provides:
//! - **Event model**: one typed, immutable event per log line
//! - **Parser**: hand-rolled bracket-segment parser, no regex
//! - **Reader**: live file tailing plus parallel bulk catch-up

mod error;
mod event;
mod parser;
mod reader;

pub use error::{ParseError, ReaderError};
pub use event::CombatEvent;
pub use parser::LogParser;
pub use reader::{LogTail, read_log_file};
