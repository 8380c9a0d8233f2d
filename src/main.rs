//! ==============================================================================
//! main.rs - sensor dashboard entry point
//! ==============================================================================
//!
//! responsibilities:
//!     - load configuration and initialise logging
//!     - build the state store and simulation engine
//!     - optionally start the generator loop right away
//!     - serve the dashboard until ctrl-c, then stop the loop
//!
//! ==============================================================================

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sensor_dashboard::{server, DashboardConfig, SimulationEngine, StateStore, UniformSource};

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration
    // the log level comes from the file, so report where it came from afterwards
    let (config, origin) = DashboardConfig::discover();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("===========================================================");
    info!("  Temperature Sensor Dashboard (simulated)");
    info!("===========================================================");
    origin.log();
    config.log_summary();

    // step 2: state + engine
    let store = StateStore::new();
    let source = UniformSource::new(
        config.simulation.min_temperature,
        config.simulation.max_temperature,
    )?;
    let engine = SimulationEngine::new(store, Arc::new(source), config.simulation.interval());
    engine.set_reading_logs(config.logging.show_readings);

    // step 3: autostart
    if config.simulation.autostart {
        engine.start();
    } else {
        info!("[RUNTIME] Simulation idle - toggle it from the dashboard");
    }

    // step 4: serve until ctrl-c
    let shutdown = server::wait_for_shutdown(tokio::signal::ctrl_c());
    let result = server::run_server(&config.server.bind, engine.clone(), shutdown).await;

    engine.stop();
    result
}
