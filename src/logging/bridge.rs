//! Routes `tracing` events into a [`LoggerRegistry`]
//!
//! The event target names the logger (`::` becomes `.`, so
//! `ophyd_examples::inventory` logs through `ophyd_examples.inventory` and
//! propagates to `ophyd_examples`).

use std::fmt;

use anyhow::{Context as _, Result};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use super::record::LogLevel;
use super::registry::LoggerRegistry;

/// Map a `tracing` target to a dotted logger name
pub fn logger_name(target: &str) -> String {
    target.replace("::", ".")
}

/// Collects the `message` field and renders other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// `tracing-subscriber` layer that hands events to registry loggers
pub struct RegistryLayer {
    registry: LoggerRegistry,
}

impl RegistryLayer {
    pub fn new(registry: LoggerRegistry) -> Self {
        Self { registry }
    }
}

impl<S: Subscriber> Layer<S> for RegistryLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let logger = self.registry.get_logger(&logger_name(metadata.target()));
        // No caller to report a failed write to
        let _ = logger.log(LogLevel::from(*metadata.level()), visitor.finish());
    }
}

/// Install the registry as the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_tracing(registry: LoggerRegistry, default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(RegistryLayer::new(registry))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::logging::buffer::CaptureBuffer;
    use crate::logging::format::Formatter;
    use crate::logging::handler::StreamHandler;

    fn capture(registry: &LoggerRegistry, name: &str) -> Arc<CaptureBuffer> {
        let buffer = Arc::new(CaptureBuffer::new(10));
        let formatter = Arc::new(Formatter::parse("%(name)s:%(levelname)s:%(message)s").unwrap());
        let logger = registry.get_logger(name);
        logger.set_level(LogLevel::Debug);
        logger.add_handler(Arc::new(StreamHandler::new(buffer.writer(), formatter)));
        buffer
    }

    #[test]
    fn test_logger_name_mapping() {
        assert_eq!(logger_name("ophyd_examples"), "ophyd_examples");
        assert_eq!(
            logger_name("ophyd_examples::inventory::tables"),
            "ophyd_examples.inventory.tables"
        );
    }

    #[test]
    fn test_events_reach_registry_logger() {
        let registry = LoggerRegistry::new();
        let buffer = capture(&registry, "ophyd_examples");
        let subscriber = tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "ophyd_examples", "scan started");
            tracing::warn!(target: "ophyd_examples", motor = "X1", "limit reached");
        });

        assert_eq!(
            buffer.lines(),
            [
                "ophyd_examples:DEBUG:scan started",
                "ophyd_examples:WARNING:limit reached motor=X1",
            ]
        );
    }

    #[test]
    fn test_module_targets_propagate_to_parent() {
        let registry = LoggerRegistry::new();
        let buffer = capture(&registry, "ophyd_examples");
        let subscriber = tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "ophyd_examples::inventory", count = 6, "loaded motors");
        });

        assert_eq!(
            buffer.lines(),
            ["ophyd_examples.inventory:INFO:loaded motors count=6"]
        );
    }

    #[test]
    fn test_unconfigured_targets_use_root_threshold() {
        let registry = LoggerRegistry::new();
        let buffer = capture(&registry, "");
        registry.root().set_level(LogLevel::Warning);
        let subscriber = tracing_subscriber::registry().with(RegistryLayer::new(registry.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "other_crate", "chatter");
            tracing::error!(target: "other_crate", "failure");
        });

        assert_eq!(buffer.lines(), ["other_crate:ERROR:failure"]);
    }
}
