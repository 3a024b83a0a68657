/*!
 * Simulator Service
 * Request layer: turns requests into allocator and scheduler calls
 */

use super::types::{ProcessorStatusResponse, StatsResponse, StatusResponse};
use crate::core::config::SimulatorConfig;
use crate::core::errors::{KernelError, SchedulerError};
use crate::core::types::{KernelResult, Pid};
use crate::memory::MemoryManager;
use crate::process::{NewProcess, Process, ProcessQueue};
use crate::scheduler::{Scheduler, TickReport};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Allocator and scheduler built from one configuration
#[derive(Debug, Clone)]
pub struct Engine {
    pub memory: MemoryManager,
    pub scheduler: Scheduler,
}

impl Engine {
    pub fn new(config: &SimulatorConfig) -> KernelResult<Self> {
        config.validate()?;
        let memory = MemoryManager::new(config.total_memory, config.os_reserved)?;
        let scheduler = Scheduler::new(config.processor_count, config.max_processes)
            .with_memory_manager(memory.clone());
        Ok(Self { memory, scheduler })
    }
}

/// Owns the live engine; `reset` swaps in a fresh one built from the same configuration
#[derive(Clone)]
pub struct SimulatorService {
    engine: Arc<RwLock<Engine>>,
    config: Arc<SimulatorConfig>,
}

impl SimulatorService {
    pub fn new(config: SimulatorConfig) -> KernelResult<Self> {
        let engine = Engine::new(&config)?;
        info!(
            processors = config.processor_count,
            max_processes = config.max_processes,
            total_memory = config.total_memory,
            os_reserved = config.os_reserved,
            "Simulator service ready"
        );
        Ok(Self {
            engine: Arc::new(RwLock::new(engine)),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Handle to the current engine (stale after a reset)
    pub fn engine(&self) -> Engine {
        self.engine.read().clone()
    }

    /// Allocate memory for the process, then admit it.
    ///
    /// Nothing is admitted when allocation fails.
    pub fn create_process(&self, request: NewProcess) -> KernelResult<Process> {
        let engine = self.engine.read();

        let start = engine.memory.allocate(request.memory_size).map_err(|e| {
            warn!(name = %request.name, size = request.memory_size, error = %e, "Process rejected");
            KernelError::from(e)
        })?;

        Ok(engine.scheduler.add_process(request.into_process(start)))
    }

    /// Queues and memory as one consistent snapshot
    pub fn status(&self) -> StatusResponse {
        let engine = self.engine.read();
        let (queue, memory) = engine.scheduler.queue_with_memory(&engine.memory);
        StatusResponse { queue, memory }
    }

    /// Run one tick, returning the queues afterwards
    pub fn schedule(&self) -> (TickReport, ProcessQueue) {
        let engine = self.engine.read();
        let report = engine.scheduler.schedule();
        (report, engine.scheduler.queue())
    }

    pub fn suspend(&self, pid: Pid) -> Result<(), SchedulerError> {
        self.engine.read().scheduler.suspend_process(pid)
    }

    pub fn resume(&self, pid: Pid) -> Result<(), SchedulerError> {
        self.engine.read().scheduler.resume_process(pid)
    }

    pub fn processor_status(&self) -> ProcessorStatusResponse {
        ProcessorStatusResponse {
            processors: self.engine.read().scheduler.processor_status(),
        }
    }

    pub fn stats(&self) -> StatsResponse {
        let engine = self.engine.read();
        let memory = engine.memory.stats();
        StatsResponse {
            scheduler: engine.scheduler.stats(),
            pressure: memory.memory_pressure(),
            memory,
        }
    }

    /// Discard every process and all memory state
    pub fn reset(&self) -> KernelResult<()> {
        let fresh = Engine::new(&self.config)?;
        *self.engine.write() = fresh;
        info!("Simulator reset");
        Ok(())
    }
}
