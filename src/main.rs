use anyhow::Result;

use ophyd_examples::config::Config;
use ophyd_examples::context::ExampleContext;
use ophyd_examples::logging::{self, LoggerRegistry, EXAMPLE_LOGGER};

fn main() -> Result<()> {
    let config = Config::load()?;

    let registry = LoggerRegistry::new();
    let context = ExampleContext::from_config(registry.clone(), &config)?;

    // Route tracing events through the same console handlers
    logging::init_tracing(registry, &config.env_filter)?;

    let inventory = context.inventory();
    tracing::info!(
        target: EXAMPLE_LOGGER,
        "Loaded {} motor records, {} fake motors, {} sensors, {} detector plugins",
        inventory.motor_recs.len(),
        inventory.fake_motors.len(),
        inventory.fake_sensors.len(),
        inventory.plugin_count()
    );

    for motor in &inventory.motor_recs {
        tracing::debug!(target: EXAMPLE_LOGGER, "motor record {}", motor);
    }
    for motor in &inventory.fake_motors {
        for (field, pv) in motor.channels() {
            tracing::debug!(target: EXAMPLE_LOGGER, "fake motor {}: {}", field, pv);
        }
    }
    for sensor in &inventory.fake_sensors {
        tracing::debug!(target: EXAMPLE_LOGGER, "sensor {}", sensor);
    }
    for group in &inventory.ad_plugins {
        let prefixes: Vec<&str> = group.entries.iter().map(|e| e.prefix()).collect();
        tracing::debug!(
            target: EXAMPLE_LOGGER,
            "{} plugins: {}",
            group.category,
            prefixes.join(", ")
        );
    }
    for detector in &inventory.sim_areadetector {
        tracing::debug!(target: EXAMPLE_LOGGER, "area detector {}", detector.cam_prefix());
    }

    context.logger().debug(format!(
        "server channels: {}; scalers: {}",
        inventory.server_pvnames.join(", "),
        inventory.scalers.join(", ")
    ))?;

    Ok(())
}
