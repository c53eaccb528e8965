//! Shared output stream.
//!
//! Command frames, event frames and raw debugger output are all written into the same stream.
//! The stream may be temporarily redirected into a capture buffer, the way a debugger runs a
//! command "to string": everything written while a capture is active, including event frames,
//! lands in the innermost buffer instead of the real sink.

use std::io::{self, Write};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};

struct Inner {
    sink: Box<dyn Write + Send>,
    captures: Vec<String>,
}

/// Cloneable handle to the shared stream.
#[derive(Clone)]
pub struct Output {
    inner: Arc<Mutex<Inner>>,
}

impl Output {
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                sink: Box::new(sink),
                captures: vec![],
            })),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a panic inside a writer doesn't make buffered text invalid
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write text and flush it immediately.
    pub fn write(&self, text: &str) -> io::Result<()> {
        let mut inner = self.lock();
        match inner.captures.last_mut() {
            Some(buffer) => {
                buffer.push_str(text);
                Ok(())
            }
            None => {
                inner.sink.write_all(text.as_bytes())?;
                inner.sink.flush()
            }
        }
    }

    /// Return true if some capture is active now.
    pub fn is_capturing(&self) -> bool {
        !self.lock().captures.is_empty()
    }

    /// Run `f` with the stream redirected into a buffer, return `f` result and captured text.
    /// Captures are nested, the stream lock isn't held while `f` is running.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> (T, String) {
        self.lock().captures.push(String::new());
        let _guard = CaptureGuard(self);
        let result = f();
        let captured = self
            .lock()
            .captures
            .last_mut()
            .map(mem::take)
            .unwrap_or_default();
        (result, captured)
    }
}

/// Ends a capture even if a captured closure panics.
struct CaptureGuard<'a>(&'a Output);

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().captures.pop();
    }
}

/// In-memory sink that can be shared between an [`Output`] and a reader.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Return everything written so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Return everything written so far and clear the buffer.
    pub fn take(&self) -> String {
        let mut buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        let contents = String::from_utf8_lossy(&buffer).into_owned();
        buffer.clear();
        contents
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
