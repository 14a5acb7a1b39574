//! Shared environment sink.
//!
//! Env files and the git credential configuration line are appended to the
//! same destination. Every write holds the lock for the whole payload, so
//! lines from different handlers never interleave whatever order they run in.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Append-only destination for environment lines.
///
/// Cloning yields another handle to the same underlying writer.
#[derive(Clone)]
pub struct EnvSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl std::fmt::Debug for EnvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSink").finish_non_exhaustive()
    }
}

impl EnvSink {
    /// Wrap any writer.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Sink writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write the whole payload and flush.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or `ErrorKind::Other` if a previous
    /// writer panicked while holding the lock.
    pub fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("env sink lock poisoned"))?;
        writer.write_all(bytes)?;
        writer.flush()
    }
}
