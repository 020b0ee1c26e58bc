//! Logging for the example programs
//!
//! A small hierarchical logger registry with %-style formatting, the
//! bootstrap routine that attaches console handlers to named loggers, and a
//! `tracing` bridge so ordinary `tracing` macros end up in the same handlers.

mod bridge;
mod buffer;
mod format;
mod handler;
mod record;
mod registry;

use std::io;
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

pub use bridge::{init_tracing, logger_name, RegistryLayer};
pub use buffer::{CaptureBuffer, CaptureWriter, CaptureWriterMaker};
pub use format::{FormatError, Formatter, TIME_FORMAT};
pub use handler::StreamHandler;
pub use record::{LogLevel, LogRecord};
pub use registry::{Logger, LoggerRegistry, DEFAULT_ROOT_LEVEL, ROOT_LOGGER_NAME};

/// Line layout for every handler attached by [`setup_loggers`]
pub const LOG_FORMAT: &str = "%(asctime)-15s [%(name)5s:%(levelname)s] %(message)s";

/// Logger used by the example programs
pub const EXAMPLE_LOGGER: &str = "ophyd_examples";

/// Attach a standard-output handler to each named logger and open it up to
/// `DEBUG`
///
/// Handlers always use [`LOG_FORMAT`]; `_fmt` is accepted but not consulted.
/// Calling this twice for the same name attaches a second handler, so every
/// record is then printed twice.
pub fn setup_loggers<I, S>(
    registry: &LoggerRegistry,
    logger_names: I,
    _fmt: Option<&str>,
) -> Result<(), FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    setup_loggers_with_writer(registry, logger_names, io::stdout)
}

/// [`setup_loggers`] with the output stream supplied by `make_writer`
pub fn setup_loggers_with_writer<I, S, M>(
    registry: &LoggerRegistry,
    logger_names: I,
    make_writer: M,
) -> Result<(), FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    M: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
{
    let formatter = Arc::new(Formatter::parse(LOG_FORMAT)?);

    for name in logger_names {
        let logger = registry.get_logger(name.as_ref());
        logger.set_level(LogLevel::Debug);

        let handler = StreamHandler::new(make_writer.clone(), Arc::clone(&formatter));
        logger.add_handler(Arc::new(handler));
    }

    Ok(())
}
