// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output sinks shared by the emitters.

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/**
Guarantees one-at-a-time access to an inner writer.

Each record is handed over as one complete buffer and written with a single
`write_all` while the lock is held, so concurrent records never interleave.
Build the record before calling [`write_record`](Self::write_record); the lock
only covers the write itself.

A writer that panicked on another thread poisons the mutex; later records are
still written.
*/
pub struct SerializedWriter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Debug for SerializedWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedWriter").finish_non_exhaustive()
    }
}

impl SerializedWriter {
    pub fn new(w: impl Write + Send + 'static) -> Self {
        Self::from_boxed(Box::new(w))
    }

    pub fn from_boxed(w: Box<dyn Write + Send>) -> Self {
        SerializedWriter { out: Mutex::new(w) }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes one whole record.
    pub fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.lock().write_all(record)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// A clonable in-memory writer.
///
/// All clones append to the same buffer, so a test can hand one clone to an
/// emitter and read the output back through another.
///
/// ```
/// use std::io::Write;
/// use tagwise::sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.write_all(b"hello\n").unwrap();
/// assert_eq!(sink.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything written so far, as (lossy) UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the contents and clears the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// The contents split into lines, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
