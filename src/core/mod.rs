//! Core resampling logic.
//!
//! This module contains:
//! - The time-weighted accumulator for one open interval
//! - The interval scheduler that splits weight at boundaries and emits averages

pub mod accumulator;
pub mod scheduler;

// Re-export commonly used types
pub use accumulator::Accumulator;
pub use scheduler::{Ingest, IntervalScheduler, SchedulerError, SchedulerPhase, SchedulerState};
