//! Synthetic accelerometer for hosts without sensor hardware.
//!
//! A background thread emits samples at a jittered period so the stream
//! sees the same irregular arrival pattern a phone sensor produces.

use crate::collector::types::{Sample, SensorEvent};
use crate::collector::CollectorError;
use chrono::Utc;
use crossbeam_channel::{bounded, Receiver, Sender};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const GRAVITY: f64 = 9.81;

/// Timing and shape of the synthetic signal.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Average spacing between samples in milliseconds
    pub mean_period_ms: u64,
    /// Maximum deviation from the mean spacing in milliseconds
    pub jitter_ms: u64,
    /// Peak amplitude of the simulated motion on x and y
    pub amplitude: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            mean_period_ms: 20,
            jitter_ms: 15,
            amplitude: 1.5,
        }
    }
}

impl SyntheticConfig {
    /// Draw the delay before the next sample.
    fn next_delay(&self, rng: &mut impl Rng) -> Duration {
        let low = self.mean_period_ms.saturating_sub(self.jitter_ms).max(1);
        let high = (self.mean_period_ms + self.jitter_ms).max(low);
        Duration::from_millis(rng.random_range(low..=high))
    }
}

/// Produces jittered accelerometer events on a background thread.
pub struct SyntheticAccelerometer {
    config: SyntheticConfig,
    sender: Sender<SensorEvent>,
    receiver: Receiver<SensorEvent>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SyntheticAccelerometer {
    /// Create a new synthetic accelerometer.
    pub fn new(config: SyntheticConfig) -> Self {
        let (sender, receiver) = bounded(10_000);
        Self {
            config,
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Start producing samples.
    pub fn start(&mut self) -> Result<(), CollectorError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(CollectorError::AlreadyRunning);
        }

        let config = self.config.clone();
        let sender = self.sender.clone();
        let running = Arc::clone(&self.running);

        self.worker = Some(thread::spawn(move || {
            let mut rng = rand::rng();
            let origin = Utc::now().timestamp_millis();

            while running.load(Ordering::SeqCst) {
                thread::sleep(config.next_delay(&mut rng));

                let now = Utc::now().timestamp_millis();
                let phase = (now - origin) as f64 / 1000.0 * std::f64::consts::TAU;
                let sample = Sample::new(
                    config.amplitude * phase.sin(),
                    config.amplitude * 0.5 * phase.cos(),
                    GRAVITY + rng.random_range(-0.05..0.05),
                    now,
                );

                // A full queue means the consumer is behind; drop like hardware would.
                if sender.try_send(SensorEvent::accelerometer(sample)).is_err() {
                    tracing::trace!("synthetic sample dropped");
                }
            }
        }));

        Ok(())
    }

    /// Stop producing samples and wait for the worker to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("synthetic accelerometer worker panicked");
            }
        }
    }

    /// Check if the collector is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for sensor events.
    pub fn receiver(&self) -> &Receiver<SensorEvent> {
        &self.receiver
    }
}

impl Drop for SyntheticAccelerometer {
    fn drop(&mut self) {
        self.stop();
    }
}
