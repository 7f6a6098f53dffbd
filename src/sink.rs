//! Destinations for averaged readings.
//!
//! Delivery is best effort. A sink that cannot accept a reading returns an
//! [`EmitError`]; the stream logs it and moves on without retrying.

use crate::collector::types::AveragedReading;
use crossbeam_channel::{Sender, TrySendError};
use thiserror::Error;

/// Reasons a sink could not accept a reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("sink receiver has been dropped")]
    Disconnected,
    #[error("sink rejected reading: {0}")]
    Rejected(String),
}

/// Receives one reading per closed interval, in increasing timestamp order.
pub trait ReadingSink {
    fn emit(&mut self, reading: AveragedReading) -> Result<(), EmitError>;
}

impl<F> ReadingSink for F
where
    F: FnMut(AveragedReading) -> Result<(), EmitError>,
{
    fn emit(&mut self, reading: AveragedReading) -> Result<(), EmitError> {
        self(reading)
    }
}

impl ReadingSink for Vec<AveragedReading> {
    fn emit(&mut self, reading: AveragedReading) -> Result<(), EmitError> {
        self.push(reading);
        Ok(())
    }
}

/// Forwards readings over a crossbeam channel without blocking.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<AveragedReading>,
}

impl ChannelSink {
    pub fn new(sender: Sender<AveragedReading>) -> Self {
        Self { sender }
    }
}

impl ReadingSink for ChannelSink {
    fn emit(&mut self, reading: AveragedReading) -> Result<(), EmitError> {
        self.sender.try_send(reading).map_err(|e| match e {
            TrySendError::Full(_) => EmitError::Rejected("channel full".to_string()),
            TrySendError::Disconnected(_) => EmitError::Disconnected,
        })
    }
}
