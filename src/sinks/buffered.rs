//! Buffering sink decorator
//!
//! Accumulates formatted lines up to a capacity before forwarding them
//! to the wrapped sink, with a policy for what happens on overflow.

use super::Sink;
use crate::core::{LogLevel, Result};
use std::fmt;

/// Policy for handling a full buffer
///
/// # Example
///
/// ```
/// use log_pipeline::sinks::OverflowPolicy;
///
/// // Default behavior: drop the newest line
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::Discard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Default)]
pub enum OverflowPolicy {
    /// Drop the newest line when the buffer is at capacity
    ///
    /// Dropped lines are counted but never reach the sink.
    #[default]
    Discard,

    /// Forward the buffered lines to the wrapped sink to make room
    FlushToSink,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Discard => write!(f, "Discard"),
            OverflowPolicy::FlushToSink => write!(f, "FlushToSink"),
        }
    }
}

/// Sink decorator that buffers lines before forwarding them.
///
/// A capacity of 0 means the buffer is unbounded: lines accumulate
/// until an explicit `flush` (or drop). An optional trigger level makes
/// any line at or above it flush the buffer immediately.
pub struct BufferedSink {
    inner: Box<dyn Sink>,
    capacity: usize,
    overflow: OverflowPolicy,
    trigger_level: Option<LogLevel>,
    buffer: Vec<(LogLevel, String)>,
    discarded: u64,
}

impl BufferedSink {
    pub fn new(inner: Box<dyn Sink>, capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            inner,
            capacity,
            overflow,
            trigger_level: None,
            buffer: Vec::new(),
            discarded: 0,
        }
    }

    /// Flush the buffer as soon as a line at or above `level` arrives
    #[must_use]
    pub fn with_trigger_level(mut self, level: LogLevel) -> Self {
        self.trigger_level = Some(level);
        self
    }

    /// Number of lines currently held in the buffer
    pub fn buffered_lines(&self) -> usize {
        self.buffer.len()
    }

    /// Number of lines dropped due to overflow
    pub fn discarded_lines(&self) -> u64 {
        self.discarded
    }

    fn forward_buffer(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.buffer);
        for (level, line) in pending {
            self.inner.write(level, &line)?;
        }
        Ok(())
    }
}

impl Sink for BufferedSink {
    fn write(&mut self, level: LogLevel, line: &str) -> Result<()> {
        if self.capacity > 0 && self.buffer.len() >= self.capacity {
            match self.overflow {
                OverflowPolicy::FlushToSink => self.forward_buffer()?,
                OverflowPolicy::Discard => {
                    self.discarded += 1;
                    return Ok(());
                }
            }
        }

        self.buffer.push((level, line.to_string()));

        if self.trigger_level.is_some_and(|trigger| level >= trigger) {
            self.forward_buffer()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.forward_buffer()?;
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "buffered"
    }
}

impl Drop for BufferedSink {
    fn drop(&mut self) {
        // Forward whatever is still buffered before the sink goes away
        let _ = self.flush();
    }
}
