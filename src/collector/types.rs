//! Sample and reading types shared by sources, the scheduler and sinks.

use serde::{Deserialize, Serialize};

/// A raw accelerometer sample.
///
/// Axis values are in sensor-native units; the timestamp is milliseconds
/// since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub timestamp: i64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64, timestamp: i64) -> Self {
        Self { x, y, z, timestamp }
    }
}

/// One fixed-interval, time-weighted average.
///
/// `timestamp` is the boundary that closed the interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragedReading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub timestamp: i64,
}

/// Which physical sensor produced a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
}

/// A raw event as delivered by a platform sensor listener.
///
/// Listeners may be registered for more than one sensor, so the stream
/// filters on `kind` before handing the sample to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub sample: Sample,
}

impl SensorEvent {
    pub fn accelerometer(sample: Sample) -> Self {
        Self {
            kind: SensorKind::Accelerometer,
            sample,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.sample.timestamp
    }
}
