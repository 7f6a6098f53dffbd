//! Interval scheduling for the resampler.
//!
//! Raw samples arrive at whatever rate the hardware chooses. The scheduler
//! keeps one open interval at a time, splits each sample's weight across
//! interval boundaries by elapsed time, and emits one averaged reading per
//! closed interval. Boundaries are aligned to multiples of the interval
//! duration on the wall clock.

use crate::collector::types::{AveragedReading, Sample};
use crate::core::accumulator::Accumulator;
use thiserror::Error;

/// Errors raised when arming the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("sampling interval has not been configured")]
    IntervalNotConfigured,
    #[error("sampling interval must be positive, got {0} ms")]
    InvalidInterval(i64),
}

/// Lifecycle phase of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Unconfigured,
    Configured,
    Running,
}

/// Bookkeeping for the open interval while running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerState {
    /// Time up to which weight has already been assigned
    pub last_reading_time: i64,
    /// End of the open interval
    pub next_boundary_time: i64,
    /// Duration the boundaries were armed with
    pub interval_ms: i64,
    accumulator: Accumulator,
}

impl SchedulerState {
    fn aligned(now_ms: i64, interval_ms: i64) -> Self {
        let last_reading_time = now_ms.div_euclid(interval_ms) * interval_ms;
        Self {
            last_reading_time,
            next_boundary_time: last_reading_time + interval_ms,
            interval_ms,
            accumulator: Accumulator::new(),
        }
    }

    /// Weighted sums collected so far for the open interval.
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }
}

/// What happened to an ingested sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The scheduler is not running; nothing changed.
    Ignored,
    /// The sample is older than the last reading and was dropped.
    OutOfOrder,
    /// The sample was accumulated after closing `closed` intervals.
    Accepted { closed: usize },
}

/// Fixed-interval, time-weighted resampler for one sensor stream.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    interval_ms: Option<i64>,
    state: Option<SchedulerState>,
}

impl IntervalScheduler {
    /// Create an unconfigured scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler with the interval already set.
    pub fn with_interval(interval_ms: i64) -> Result<Self, SchedulerError> {
        let mut scheduler = Self::new();
        scheduler.configure(interval_ms)?;
        Ok(scheduler)
    }

    /// Set the interval duration in milliseconds.
    ///
    /// While running, the open interval keeps the old boundaries; the new
    /// duration is used from the next `start`.
    pub fn configure(&mut self, interval_ms: i64) -> Result<(), SchedulerError> {
        if interval_ms <= 0 {
            return Err(SchedulerError::InvalidInterval(interval_ms));
        }
        self.interval_ms = Some(interval_ms);
        Ok(())
    }

    /// Arm the scheduler at `now_ms`.
    ///
    /// The first interval starts at the largest multiple of the interval
    /// duration not after `now_ms`. Calling this while running restarts
    /// with a fresh accumulator.
    pub fn start(&mut self, now_ms: i64) -> Result<(), SchedulerError> {
        let interval_ms = self
            .interval_ms
            .ok_or(SchedulerError::IntervalNotConfigured)?;
        self.state = Some(SchedulerState::aligned(now_ms, interval_ms));
        Ok(())
    }

    /// Disarm the scheduler, discarding the partially filled interval.
    pub fn stop(&mut self) {
        self.state = None;
    }

    /// Feed one raw sample, calling `emit` once per interval it closes.
    ///
    /// The sample value is held constant from the previous reading up to
    /// its own timestamp, so when boundaries fall in between, each closed
    /// interval receives the portion of that span that lies inside it.
    pub fn ingest<F>(&mut self, sample: &Sample, mut emit: F) -> Ingest
    where
        F: FnMut(AveragedReading),
    {
        let Some(state) = self.state.as_mut() else {
            return Ingest::Ignored;
        };

        let t = sample.timestamp;
        if t < state.last_reading_time {
            return Ingest::OutOfOrder;
        }

        let step = state.interval_ms;
        let mut closed = 0;
        while t > state.next_boundary_time {
            state.accumulator.add(
                sample.x,
                sample.y,
                sample.z,
                state.next_boundary_time - state.last_reading_time,
            );
            let (x, y, z) = state.accumulator.average(step);
            emit(AveragedReading {
                x,
                y,
                z,
                timestamp: state.next_boundary_time,
            });
            closed += 1;

            state.accumulator.reset();
            state.last_reading_time = state.next_boundary_time;
            state.next_boundary_time += step;
        }

        state
            .accumulator
            .add(sample.x, sample.y, sample.z, t - state.last_reading_time);
        state.last_reading_time = t;

        Ingest::Accepted { closed }
    }

    /// Configured interval in milliseconds, if any.
    pub fn interval_ms(&self) -> Option<i64> {
        self.interval_ms
    }

    /// Whether samples are currently being accumulated.
    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    pub fn phase(&self) -> SchedulerPhase {
        match (self.interval_ms, self.state) {
            (_, Some(_)) => SchedulerPhase::Running,
            (Some(_), None) => SchedulerPhase::Configured,
            (None, None) => SchedulerPhase::Unconfigured,
        }
    }

    /// Bookkeeping for the open interval, if running.
    pub fn state(&self) -> Option<&SchedulerState> {
        self.state.as_ref()
    }
}
