//! Accelerometer resampler.
//!
//! Converts an irregular stream of timestamped 3-axis accelerometer samples
//! into a steady stream of fixed-interval, time-weighted averages.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────────────────────┐   ┌────────┐
//! │  Collector │──▶│        AccelerometerStream       │──▶│  Sink  │
//! │ (samples)  │   │  IntervalScheduler ─▶ Accumulator │   │        │
//! └────────────┘   └──────────────────────────────────┘   └────────┘
//! ```
//!
//! Each sample's value is held from the previous sample's timestamp until
//! its own (zero-order hold). When an interval boundary falls inside that
//! span, the sample's value weighted up to the boundary closes the old
//! interval and the same value weighted from the boundary opens the new one.
//!
//! # Example
//!
//! ```
//! use accel_resampler::{AccelerometerStream, AveragedReading};
//!
//! let mut stream = AccelerometerStream::new(Vec::<AveragedReading>::new());
//! stream.set_interval(100).unwrap();
//! stream.start_at(0).unwrap();
//!
//! stream.on_sample(1.0, 0.0, 0.0, 50);
//! stream.on_sample(3.0, 0.0, 0.0, 150);
//!
//! let readings = stream.into_sink();
//! assert_eq!(readings.len(), 1);
//! assert_eq!(readings[0].timestamp, 100);
//! // 1.0 held for 50 ms, then the incoming 3.0 up to the boundary
//! assert!((readings[0].x - 2.0).abs() < 1e-9);
//! ```

pub mod collector;
pub mod config;
pub mod core;
pub mod sink;
pub mod stats;
pub mod stream;

// Re-export key types at crate root for convenience
pub use collector::{AveragedReading, CollectorError, Sample, SensorEvent, SensorKind};
pub use config::{Config, ConfigError, OutputFormat, SourceConfig};
pub use core::{Accumulator, Ingest, IntervalScheduler, SchedulerError, SchedulerPhase};
pub use sink::{ChannelSink, EmitError, ReadingSink};
pub use stats::{SharedStreamStats, StatsSnapshot, StreamStats};
pub use stream::AccelerometerStream;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
