/*!
 * OS Scheduler Simulator - Main Entry Point
 *
 * Serves the simulator over newline-delimited JSON on TCP.
 */

use std::error::Error;
use tracing::info;

use os_scheduler_sim::{init_tracing, start_server, SimulatorConfig, SimulatorService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("OS scheduler simulator starting...");

    let config = SimulatorConfig::from_env()?;
    info!(
        processors = config.processor_count,
        max_processes = config.max_processes,
        total_memory = config.total_memory,
        os_reserved = config.os_reserved,
        listen_addr = %config.listen_addr,
        "Configuration loaded"
    );

    let service = SimulatorService::new(config)?;
    start_server(service).await?;

    info!("OS scheduler simulator stopped");
    Ok(())
}
