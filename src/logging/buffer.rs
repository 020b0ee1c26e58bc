//! In-memory output sink
//!
//! A thread-safe, bounded line buffer that stream handlers can write to in
//! place of standard output.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, RwLock};

use tracing_subscriber::fmt::MakeWriter;

/// Thread-safe ring buffer of emitted lines
#[derive(Debug)]
pub struct CaptureBuffer {
    lines: RwLock<VecDeque<String>>,
    /// Maximum lines to keep; the oldest line is dropped first
    max_lines: usize,
}

impl CaptureBuffer {
    /// Create a new buffer holding at most `max_lines` lines
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: RwLock::new(VecDeque::with_capacity(max_lines.min(1024))),
            max_lines,
        }
    }

    /// Append a line, evicting the oldest one when full
    pub fn push(&self, line: impl Into<String>) {
        if self.max_lines == 0 {
            return;
        }
        if let Ok(mut lines) = self.lines.write() {
            if lines.len() >= self.max_lines {
                lines.pop_front();
            }
            lines.push_back(line.into());
        }
    }

    /// All buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }

    /// Writer factory feeding this buffer, for use as a handler sink
    pub fn writer(self: &Arc<Self>) -> CaptureWriterMaker {
        CaptureWriterMaker {
            buffer: Arc::clone(self),
        }
    }
}

/// Writer that splits incoming bytes into lines and stores them
pub struct CaptureWriter {
    buffer: Arc<CaptureBuffer>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines() {
            self.buffer.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer factory for [`CaptureBuffer`]
#[derive(Clone)]
pub struct CaptureWriterMaker {
    buffer: Arc<CaptureBuffer>,
}

impl<'a> MakeWriter<'a> for CaptureWriterMaker {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}
