//! Hierarchical logger registry
//!
//! Loggers are addressed by dotted names (`ophyd_examples.motors`). Each logger
//! has an optional threshold and a list of handlers; unset thresholds are
//! inherited from the nearest ancestor, and records propagate up the hierarchy
//! to every ancestor's handlers until a logger with propagation disabled is
//! reached.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::handler::StreamHandler;
use super::record::{LogLevel, LogRecord};

/// Name reported by the root logger
pub const ROOT_LOGGER_NAME: &str = "root";

/// Threshold of the root logger in a fresh registry
pub const DEFAULT_ROOT_LEVEL: LogLevel = LogLevel::Warning;

/// A named logger
pub struct Logger {
    name: String,
    level: RwLock<Option<LogLevel>>,
    handlers: RwLock<Vec<Arc<StreamHandler>>>,
    propagate: AtomicBool,
    parent: RwLock<Option<Arc<Logger>>>,
}

impl Logger {
    fn new(name: impl Into<String>, level: Option<LogLevel>, parent: Option<Arc<Logger>>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            handlers: RwLock::new(Vec::new()),
            propagate: AtomicBool::new(true),
            parent: RwLock::new(parent),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// This logger's own threshold, `None` when inherited
    pub fn level(&self) -> Option<LogLevel> {
        self.level.read().map(|l| *l).unwrap_or(None)
    }

    pub fn set_level(&self, level: LogLevel) {
        if let Ok(mut current) = self.level.write() {
            *current = Some(level);
        }
    }

    /// Clear the threshold so it is inherited again
    pub fn reset_level(&self) {
        if let Ok(mut current) = self.level.write() {
            *current = None;
        }
    }

    /// Threshold in force: own level, else the nearest ancestor's
    pub fn effective_level(&self) -> LogLevel {
        if let Some(level) = self.level() {
            return level;
        }
        let mut current = self.parent();
        while let Some(logger) = current {
            if let Some(level) = logger.level() {
                return level;
            }
            current = logger.parent();
        }
        DEFAULT_ROOT_LEVEL
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    /// Attach a handler. Handlers are not deduplicated.
    pub fn add_handler(&self, handler: Arc<StreamHandler>) {
        if let Ok(mut handlers) = self.handlers.write() {
            handlers.push(handler);
        }
    }

    /// Detach a previously attached handler, compared by identity
    pub fn remove_handler(&self, handler: &Arc<StreamHandler>) -> bool {
        if let Ok(mut handlers) = self.handlers.write() {
            if let Some(pos) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
                handlers.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn handlers(&self) -> Vec<Arc<StreamHandler>> {
        self.handlers
            .read()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }

    pub fn propagates(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.read().map(|p| p.clone()).unwrap_or(None)
    }

    fn set_parent(&self, parent: Arc<Logger>) {
        if let Ok(mut current) = self.parent.write() {
            *current = Some(parent);
        }
    }

    fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Log `message` at `level`
    ///
    /// Every handler on this logger and its propagating ancestors is tried;
    /// the first write error is returned.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> io::Result<()> {
        if !self.is_enabled_for(level) {
            return Ok(());
        }
        let record = LogRecord::new(self.name.clone(), level, message);
        self.handle(&record)
    }

    fn handle(&self, record: &LogRecord) -> io::Result<()> {
        let mut result = Ok(());
        emit_all(&self.handlers(), record, &mut result);
        if !self.propagates() {
            return result;
        }

        let mut current = self.parent();
        while let Some(logger) = current {
            emit_all(&logger.handlers(), record, &mut result);
            if !logger.propagates() {
                break;
            }
            current = logger.parent();
        }
        result
    }

    pub fn trace(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn critical(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(LogLevel::Critical, message)
    }
}

fn emit_all(handlers: &[Arc<StreamHandler>], record: &LogRecord, result: &mut io::Result<()>) {
    for handler in handlers {
        if let Err(e) = handler.emit(record) {
            if result.is_ok() {
                *result = Err(e);
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .field("propagate", &self.propagates())
            .finish()
    }
}

struct RegistryInner {
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

/// Registry of named loggers
///
/// Cloning is cheap and clones share the same loggers. Pass a registry to
/// whatever needs to log instead of reaching for a global.
#[derive(Clone)]
pub struct LoggerRegistry {
    inner: Arc<RegistryInner>,
}

impl LoggerRegistry {
    /// Create a registry holding only the root logger
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                root: Arc::new(Logger::new(
                    ROOT_LOGGER_NAME,
                    Some(DEFAULT_ROOT_LEVEL),
                    None,
                )),
                loggers: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.inner.root)
    }

    /// Get the logger called `name`, creating it on first use
    ///
    /// The empty name returns the root logger.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if name.is_empty() {
            return self.root();
        }
        if let Ok(loggers) = self.inner.loggers.read() {
            if let Some(logger) = loggers.get(name) {
                return Arc::clone(logger);
            }
        }

        let mut loggers = self
            .inner
            .loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let parent = nearest_ancestor(&loggers, name).unwrap_or_else(|| self.root());
        let logger = Arc::new(Logger::new(name, None, Some(parent)));

        // Descendants created earlier may be attached above this logger
        let prefix = format!("{}.", name);
        for existing in loggers.values() {
            if !existing.name.starts_with(&prefix) {
                continue;
            }
            let attached_above = existing
                .parent()
                .map_or(true, |p| p.is_root() || p.name.len() < name.len());
            if attached_above {
                existing.set_parent(Arc::clone(&logger));
            }
        }

        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    /// Check whether a logger called `name` has been created
    pub fn contains(&self, name: &str) -> bool {
        name.is_empty()
            || self
                .inner
                .loggers
                .read()
                .map(|l| l.contains_key(name))
                .unwrap_or(false)
    }

    /// Names of all non-root loggers, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .loggers
            .read()
            .map(|l| l.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.logger_names())
            .finish()
    }
}

fn nearest_ancestor(loggers: &HashMap<String, Arc<Logger>>, name: &str) -> Option<Arc<Logger>> {
    let mut candidate = name;
    while let Some(pos) = candidate.rfind('.') {
        candidate = &candidate[..pos];
        if let Some(logger) = loggers.get(candidate) {
            return Some(Arc::clone(logger));
        }
    }
    None
}
