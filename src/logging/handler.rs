//! Stream handlers

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use super::format::Formatter;
use super::record::LogRecord;

/// Writes one formatted line per record to a stream
pub struct StreamHandler {
    formatter: Arc<Formatter>,
    writer: BoxMakeWriter,
}

impl StreamHandler {
    /// Create a handler writing to the streams produced by `make_writer`
    pub fn new<M>(make_writer: M, formatter: Arc<Formatter>) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            formatter,
            writer: BoxMakeWriter::new(make_writer),
        }
    }

    /// Create a handler writing to standard output
    pub fn stdout(formatter: Arc<Formatter>) -> Self {
        Self::new(io::stdout, formatter)
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Format `record` and write it as a single line
    pub fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let mut line = self.formatter.format(record);
        line.push('\n');

        let mut writer = self.writer.make_writer();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for StreamHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandler")
            .field("format", &self.formatter.template())
            .finish_non_exhaustive()
    }
}
