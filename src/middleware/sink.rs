//! Destinations for rendered access-log lines.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// An append-only destination for access-log lines.
///
/// Receives exactly one `write_line` call per request, holding the complete
/// newline-terminated line. Concurrent requests call it concurrently; an
/// implementation must keep lines from interleaving.
pub trait LogSink: Send + Sync + 'static {
    fn write_line(&self, line: &[u8]) -> io::Result<()>;
}

impl LogSink for io::Stdout {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(line)?;
        out.flush()
    }
}

impl LogSink for io::Stderr {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(line)?;
        out.flush()
    }
}

/// Any writer (a `File`, a `Vec<u8>`, a `BufWriter`) behind a mutex.
///
/// A panic while the lock was held does not disable logging: the writer is
/// taken back from the poisoned mutex.
impl<W: Write + Send + 'static> LogSink for Mutex<W> {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut w = self.lock().unwrap_or_else(PoisonError::into_inner);
        w.write_all(line)?;
        w.flush()
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }
}
