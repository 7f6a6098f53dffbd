//! Raw sample sources.
//!
//! The resampler only needs something that pushes `(x, y, z, timestamp)`
//! samples. This module provides the shared types plus two stand-ins for a
//! hardware listener: a jittered synthetic accelerometer and a replay
//! reader for recorded sample files.

pub mod replay;
pub mod synthetic;
pub mod types;

use thiserror::Error;

// Re-export commonly used types
pub use replay::{read_samples, read_samples_from};
pub use synthetic::{SyntheticAccelerometer, SyntheticConfig};
pub use types::{AveragedReading, Sample, SensorEvent, SensorKind};

/// Errors raised by sample sources.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("no sensor available")]
    NoSensor,
    #[error("collector is already running")]
    AlreadyRunning,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}
