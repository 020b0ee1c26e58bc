//! Shared state handed to every example program
//!
//! Bootstrapping configures the console loggers once and keeps a handle to
//! the example logger alongside the channel tables.

use std::sync::Arc;

use crate::config::Config;
use crate::inventory::Inventory;
use crate::logging::{self, FormatError, Logger, LoggerRegistry, EXAMPLE_LOGGER};

#[derive(Debug, Clone)]
pub struct ExampleContext {
    registry: LoggerRegistry,
    logger: Arc<Logger>,
    inventory: Inventory,
}

impl ExampleContext {
    /// Attach the console handler to [`EXAMPLE_LOGGER`] and keep its handle
    pub fn bootstrap(registry: LoggerRegistry) -> Result<Self, FormatError> {
        Self::with_loggers(registry, [EXAMPLE_LOGGER], Inventory::builtin())
    }

    /// Bootstrap the loggers and tables named in `config`
    pub fn from_config(registry: LoggerRegistry, config: &Config) -> Result<Self, FormatError> {
        Self::with_loggers(registry, &config.logger_names, config.inventory.clone())
    }

    fn with_loggers<I, S>(
        registry: LoggerRegistry,
        logger_names: I,
        inventory: Inventory,
    ) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        logging::setup_loggers(&registry, logger_names, None)?;
        let logger = registry.get_logger(EXAMPLE_LOGGER);
        Ok(Self {
            registry,
            logger,
            inventory,
        })
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    /// Handle to the example logger
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, LOG_FORMAT};

    #[test]
    fn test_bootstrap_configures_example_logger() {
        let registry = LoggerRegistry::new();
        let context = ExampleContext::bootstrap(registry.clone()).unwrap();

        assert_eq!(context.logger().name(), EXAMPLE_LOGGER);
        assert_eq!(context.logger().effective_level(), LogLevel::Debug);
        assert_eq!(context.logger().handler_count(), 1);
        assert_eq!(
            context.logger().handlers()[0].formatter().template(),
            LOG_FORMAT
        );
        assert!(Arc::ptr_eq(
            context.logger(),
            &registry.get_logger(EXAMPLE_LOGGER)
        ));
        assert_eq!(context.inventory(), &Inventory::builtin());
    }

    #[test]
    fn test_from_config_sets_up_every_configured_logger() {
        let mut config = Config::default();
        config.logger_names.push("ophyd".to_string());
        config.inventory.scalers.clear();

        let context = ExampleContext::from_config(LoggerRegistry::new(), &config).unwrap();

        assert_eq!(
            context.registry().get_logger("ophyd").effective_level(),
            LogLevel::Debug
        );
        assert_eq!(context.logger().handler_count(), 1);
        assert!(context.inventory().scalers.is_empty());
    }

    #[test]
    fn test_from_config_without_example_logger() {
        let config = Config {
            logger_names: vec!["ophyd".to_string()],
            ..Config::default()
        };

        let context = ExampleContext::from_config(LoggerRegistry::new(), &config).unwrap();

        // The handle is still retained, just without a console handler
        assert_eq!(context.logger().name(), EXAMPLE_LOGGER);
        assert_eq!(context.logger().handler_count(), 0);
    }
}
