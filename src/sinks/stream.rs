//! Stream sink implementation

use super::Sink;
use crate::core::{LogLevel, LoggerError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Sink writing formatted lines to a byte stream: a log file or one of
/// the standard streams.
pub struct StreamSink {
    writer: Box<dyn Write + Send>,
    name: &'static str,
}

impl StreamSink {
    /// Open a file sink at `path`.
    ///
    /// Parent directories are created as needed (log files live under a
    /// date-named directory tree). The file is opened once, in append
    /// mode, and held for the lifetime of the sink.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        parent.display().to_string(),
                        e,
                    )
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            name: "file",
        })
    }

    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout()),
            name: "stdout",
        }
    }

    /// Sink writing to standard error
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            name: "stderr",
        }
    }
}

impl Sink for StreamSink {
    fn write(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl Drop for StreamSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to the stream
        let _ = self.flush();
    }
}
