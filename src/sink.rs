//! Virtual-stick sink: where transformed deltas leave the core.

use crate::error::Result;
use log::info;
use parking_lot::Mutex;
use std::sync::Arc;

/// Consumer of scaled deltas, typically the game's touch/stick injection layer.
pub trait VirtualStickSink: Send {
    fn push_delta(&mut self, dx: f64, dy: f64) -> Result<()>;
}

/// Sink that writes each delta to the log at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

impl VirtualStickSink for LoggingSink {
    fn push_delta(&mut self, dx: f64, dy: f64) -> Result<()> {
        info!("stick delta ({:.4}, {:.4})", dx, dy);
        Ok(())
    }
}

/// Sink that collects deltas into a shared buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    deltas: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deltas(&self) -> Vec<(f64, f64)> {
        self.deltas.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.deltas.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VirtualStickSink for RecordingSink {
    fn push_delta(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.deltas.lock().push((dx, dy));
        Ok(())
    }
}
