//! Demonstration of resampling a jittery accelerometer.
//!
//! This example shows how to:
//! 1. Check sensor availability
//! 2. Start a synthetic accelerometer with irregular sample spacing
//! 3. Resample it to a steady 100 ms interval
//! 4. Print each averaged reading and the final statistics
//!
//! Run with: cargo run --example stream_demo

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use accel_resampler::{
    collector::{SyntheticAccelerometer, SyntheticConfig},
    AccelerometerStream, AveragedReading, EmitError,
};

fn main() {
    println!("Accelerometer Resampler - Stream Demo");
    println!("=====================================");
    println!();

    let print_reading = |r: AveragedReading| -> Result<(), EmitError> {
        println!(
            "  [{}] x={:+.3} y={:+.3} z={:+.3}",
            r.timestamp, r.x, r.y, r.z
        );
        Ok(())
    };
    let mut stream = AccelerometerStream::new(print_reading);

    print!("Checking accelerometer... ");
    if let Err(e) = stream.is_available() {
        println!("FAILED ({e})");
        return;
    }
    println!("OK");

    if let Err(e) = stream.set_interval(100) {
        eprintln!("Error configuring interval: {e}");
        return;
    }

    let mut source = SyntheticAccelerometer::new(SyntheticConfig {
        mean_period_ms: 15,
        jitter_ms: 12,
        ..SyntheticConfig::default()
    });

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    println!("Resampling for 5 seconds...");
    println!();

    if let Err(e) = stream.start() {
        eprintln!("Error starting stream: {e}");
        return;
    }
    if let Err(e) = source.start() {
        eprintln!("Error starting source: {e}");
        return;
    }

    let start = Instant::now();
    let receiver = source.receiver().clone();
    while running.load(Ordering::SeqCst) && start.elapsed() < Duration::from_secs(5) {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => stream.on_event(&event),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }

    println!();
    println!("Stopping...");
    source.stop();
    stream.stop();

    println!();
    println!("{}", stream.stats().summary());
    println!();
    println!("Demo complete!");
}
