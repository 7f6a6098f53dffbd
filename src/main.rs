//! Accelerometer resampler CLI
//!
//! Readings go to stdout as JSON lines; logs and summaries go to stderr.

use accel_resampler::{
    collector::{read_samples, SyntheticAccelerometer, SyntheticConfig},
    AccelerometerStream, AveragedReading, ChannelSink, Config, OutputFormat, VERSION,
};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "accel-resampler")]
#[command(version = VERSION)]
#[command(about = "Resample irregular accelerometer samples to a fixed interval", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample a live (synthetic) accelerometer until Ctrl+C
    Run {
        /// Output interval in milliseconds (defaults to the configured value)
        #[arg(long)]
        interval_ms: Option<i64>,

        /// Stop after this many seconds
        #[arg(long)]
        duration_secs: Option<u64>,

        /// Session export format (json or jsonl)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Directory for the exported session
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Resample a recorded JSON-lines sample file
    Replay {
        /// File with one sample per line
        file: PathBuf,

        /// Output interval in milliseconds (defaults to the configured value)
        #[arg(long)]
        interval_ms: Option<i64>,

        /// Alignment time in ms (defaults to the first sample's timestamp)
        #[arg(long)]
        start_ms: Option<i64>,
    },

    /// Persist the default output interval
    SetInterval {
        /// Interval in milliseconds
        ms: i64,
    },

    /// Show configuration
    Config,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            interval_ms,
            duration_secs,
            format,
            output,
        } => cmd_run(interval_ms, duration_secs, format, output),
        Commands::Replay {
            file,
            interval_ms,
            start_ms,
        } => cmd_replay(&file, interval_ms, start_ms),
        Commands::SetInterval { ms } => cmd_set_interval(ms),
        Commands::Config => cmd_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn cmd_run(
    interval_ms: Option<i64>,
    duration_secs: Option<u64>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load().context("loading configuration")?;
    if let Some(dir) = output {
        config.export_path = dir;
    }
    if let Err(e) = config.ensure_directories() {
        tracing::warn!("could not create export directory: {e}");
    }
    let interval_ms = interval_ms.unwrap_or(config.interval_ms);
    let format = format.unwrap_or(config.output_format);

    let mut source = SyntheticAccelerometer::new(SyntheticConfig {
        mean_period_ms: config.source.mean_period_ms,
        jitter_ms: config.source.jitter_ms,
        ..SyntheticConfig::default()
    });

    let (reading_tx, reading_rx) = crossbeam_channel::bounded(1_024);
    let mut stream = AccelerometerStream::new(ChannelSink::new(reading_tx));
    stream.is_available()?;
    stream.set_interval(interval_ms)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .context("installing Ctrl+C handler")?;

    eprintln!("Accelerometer resampler v{VERSION}");
    eprintln!("  Interval: {interval_ms} ms");
    eprintln!("Press Ctrl+C to stop");

    stream.start()?;
    source.start()?;

    let deadline = duration_secs.map(|secs| Instant::now() + Duration::from_secs(secs));
    let events = source.receiver().clone();
    let mut readings: Vec<AveragedReading> = Vec::new();

    while running.load(Ordering::SeqCst) {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }

        match events.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => stream.on_event(&event),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                tracing::error!("sample source disconnected unexpectedly");
                break;
            }
        }

        for reading in reading_rx.try_iter() {
            println!("{}", serde_json::to_string(&reading)?);
            readings.push(reading);
        }
    }

    source.stop();
    stream.stop();

    if !readings.is_empty() {
        let path = export_session(&config.export_path, &readings, format)?;
        eprintln!("Exported {} readings to {:?}", readings.len(), path);
    }

    eprintln!();
    eprintln!("{}", stream.stats().summary());
    Ok(())
}

fn cmd_replay(file: &Path, interval_ms: Option<i64>, start_ms: Option<i64>) -> Result<()> {
    let samples = read_samples(file).with_context(|| format!("reading {file:?}"))?;
    let Some(first) = samples.first() else {
        bail!("{file:?} contains no samples");
    };

    let interval_ms = match interval_ms {
        Some(ms) => ms,
        None => Config::load().context("loading configuration")?.interval_ms,
    };

    let mut stream = AccelerometerStream::new(Vec::<AveragedReading>::new());
    stream.set_interval(interval_ms)?;
    stream.start_at(start_ms.unwrap_or(first.timestamp))?;

    for sample in &samples {
        stream.on_sample(sample.x, sample.y, sample.z, sample.timestamp);
    }
    stream.stop();

    for reading in stream.sink() {
        println!("{}", serde_json::to_string(reading)?);
    }

    eprintln!("{}", stream.stats().summary());
    Ok(())
}

fn cmd_set_interval(ms: i64) -> Result<()> {
    let mut config = Config::load_or_default();
    config.interval_ms = ms;
    config.save().context("saving configuration")?;
    println!("Output interval set to {ms} ms.");
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Write a session's readings to `dir` and return the file path.
fn export_session(
    dir: &Path,
    readings: &[AveragedReading],
    format: OutputFormat,
) -> Result<PathBuf> {
    let path = dir.join(format!(
        "session_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    ));

    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(readings)?,
        OutputFormat::Jsonl => readings
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
    };

    std::fs::write(&path, body).with_context(|| format!("writing {path:?}"))?;
    Ok(path)
}
