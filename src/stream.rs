//! Control surface for one accelerometer stream.
//!
//! An [`AccelerometerStream`] binds a sample source to an
//! [`IntervalScheduler`] and a [`ReadingSink`]. The source calls
//! [`AccelerometerStream::on_sample`] (or `on_event`) for every raw event;
//! closed intervals go to the sink. Each active stream owns its own
//! scheduler, so several streams can run side by side.

use crate::collector::types::{AveragedReading, Sample, SensorEvent, SensorKind};
use crate::collector::CollectorError;
use crate::core::scheduler::{Ingest, IntervalScheduler, SchedulerError};
use crate::sink::ReadingSink;
use crate::stats::{SharedStreamStats, StreamStats};
use chrono::Utc;
use std::sync::Arc;

/// An accelerometer stream resampled to a fixed interval.
pub struct AccelerometerStream<S> {
    scheduler: IntervalScheduler,
    sink: S,
    stats: SharedStreamStats,
    sensor_present: bool,
}

impl<S: ReadingSink> AccelerometerStream<S> {
    /// Create a stream backed by a present sensor.
    pub fn new(sink: S) -> Self {
        Self {
            scheduler: IntervalScheduler::new(),
            sink,
            stats: Arc::new(StreamStats::new()),
            sensor_present: true,
        }
    }

    /// Create a stream for a device that has no accelerometer.
    ///
    /// Such a stream can still be driven by hand, but `is_available`
    /// reports the missing sensor.
    pub fn without_sensor(sink: S) -> Self {
        Self {
            sensor_present: false,
            ..Self::new(sink)
        }
    }

    /// Report whether a sensor backs this stream.
    pub fn is_available(&self) -> Result<(), CollectorError> {
        if self.sensor_present {
            Ok(())
        } else {
            Err(CollectorError::NoSensor)
        }
    }

    /// Set the output interval in milliseconds.
    pub fn set_interval(&mut self, interval_ms: i64) -> Result<(), SchedulerError> {
        self.scheduler.configure(interval_ms)
    }

    /// Start resampling, aligning boundaries to the current wall clock.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        self.start_at(Utc::now().timestamp_millis())
    }

    /// Start resampling with boundaries aligned to `now_ms`.
    pub fn start_at(&mut self, now_ms: i64) -> Result<(), SchedulerError> {
        self.scheduler.start(now_ms)?;
        if let Some(state) = self.scheduler.state() {
            tracing::info!(
                interval_ms = state.interval_ms,
                first_boundary = state.next_boundary_time,
                "accelerometer stream started"
            );
        }
        Ok(())
    }

    /// Stop resampling. The open interval is discarded.
    pub fn stop(&mut self) {
        if self.scheduler.is_running() {
            tracing::info!("accelerometer stream stopped");
        }
        self.scheduler.stop();
    }

    /// Handle a raw event from a sensor listener.
    pub fn on_event(&mut self, event: &SensorEvent) {
        if event.kind != SensorKind::Accelerometer {
            self.stats.record_foreign_event();
            return;
        }
        self.ingest(&event.sample);
    }

    /// Handle one raw accelerometer sample.
    pub fn on_sample(&mut self, x: f64, y: f64, z: f64, timestamp: i64) {
        self.ingest(&Sample::new(x, y, z, timestamp));
    }

    fn ingest(&mut self, sample: &Sample) {
        let sink = &mut self.sink;
        let stats = &self.stats;
        let outcome = self.scheduler.ingest(sample, |reading| {
            deliver(sink, stats, reading);
        });

        match outcome {
            Ingest::Accepted { .. } => stats.record_sample_ingested(),
            Ingest::Ignored => stats.record_sample_ignored(),
            Ingest::OutOfOrder => {
                tracing::debug!(timestamp = sample.timestamp, "dropping out-of-order sample");
                stats.record_sample_out_of_order();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    /// Shared handle to this stream's counters.
    pub fn stats(&self) -> SharedStreamStats {
        Arc::clone(&self.stats)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the stream and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Hand a reading to the sink, logging and dropping it on failure.
fn deliver<S: ReadingSink>(sink: &mut S, stats: &StreamStats, reading: AveragedReading) {
    match sink.emit(reading) {
        Ok(()) => {
            tracing::debug!(timestamp = reading.timestamp, "interval emitted");
            stats.record_interval_emitted();
        }
        Err(e) => {
            tracing::warn!(timestamp = reading.timestamp, "dropping averaged reading: {e}");
            stats.record_emission_dropped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::EmitError;

    #[test]
    fn test_start_without_interval_fails() {
        let mut stream = AccelerometerStream::new(Vec::<AveragedReading>::new());
        assert_eq!(stream.start_at(0), Err(SchedulerError::IntervalNotConfigured));
        assert!(!stream.is_running());
    }

    #[test]
    fn test_availability() {
        let present = AccelerometerStream::new(Vec::<AveragedReading>::new());
        assert!(present.is_available().is_ok());

        let absent = AccelerometerStream::without_sensor(Vec::<AveragedReading>::new());
        let err = absent.is_available().unwrap_err();
        assert_eq!(err.to_string(), "no sensor available");
    }

    #[test]
    fn test_samples_flow_to_sink() {
        let mut stream = AccelerometerStream::new(Vec::<AveragedReading>::new());
        stream.set_interval(100).unwrap();
        stream.start_at(0).unwrap();

        stream.on_sample(1.0, 2.0, 3.0, 50);
        stream.on_sample(3.0, 2.0, 1.0, 150);
        stream.on_sample(3.0, 2.0, 1.0, 210);

        let readings = stream.sink();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].timestamp, 100);
        assert!((readings[0].x - 2.0).abs() < 1e-9);
        assert!((readings[0].y - 2.0).abs() < 1e-9);
        assert!((readings[0].z - 2.0).abs() < 1e-9);
        assert_eq!(readings[1].timestamp, 200);
        assert!((readings[1].x - 3.0).abs() < 1e-9);
        assert!((readings[1].z - 1.0).abs() < 1e-9);
        assert_eq!(stream.stats().snapshot().intervals_emitted, 2);
    }

    #[test]
    fn test_foreign_events_are_skipped() {
        let mut stream = AccelerometerStream::new(Vec::<AveragedReading>::new());
        stream.set_interval(10).unwrap();
        stream.start_at(0).unwrap();

        let gyro = SensorEvent {
            kind: SensorKind::Gyroscope,
            sample: Sample::new(5.0, 5.0, 5.0, 500),
        };
        stream.on_event(&gyro);

        assert!(stream.sink().is_empty());
        assert_eq!(stream.scheduler().state().unwrap().last_reading_time, 0);
        assert_eq!(stream.stats().snapshot().foreign_events, 1);
    }

    #[test]
    fn test_late_samples_after_stop_are_ignored() {
        let mut stream = AccelerometerStream::new(Vec::<AveragedReading>::new());
        stream.set_interval(100).unwrap();
        stream.start_at(0).unwrap();
        stream.on_sample(1.0, 1.0, 1.0, 90);
        stream.stop();

        stream.on_sample(1.0, 1.0, 1.0, 400);
        assert!(stream.sink().is_empty());
        assert_eq!(stream.stats().snapshot().samples_ignored, 1);
    }

    #[test]
    fn test_sink_failure_does_not_stall_scheduler() {
        let mut calls = 0;
        let sink = |_: AveragedReading| {
            calls += 1;
            if calls == 1 {
                Err(EmitError::Rejected("not ready".to_string()))
            } else {
                Ok(())
            }
        };
        let mut stream = AccelerometerStream::new(sink);
        stream.set_interval(100).unwrap();
        stream.start_at(0).unwrap();

        stream.on_sample(1.0, 0.0, 0.0, 250);

        let state = *stream.scheduler().state().unwrap();
        assert_eq!(state.last_reading_time, 250);
        assert_eq!(state.next_boundary_time, 300);

        let snap = stream.stats().snapshot();
        assert_eq!(snap.emissions_dropped, 1);
        assert_eq!(snap.intervals_emitted, 1);
    }
}
