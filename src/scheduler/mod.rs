/*!
 * Process Scheduler
 *
 * Tick-driven multi-processor scheduler with admission control and
 * dependency-gated readiness.
 *
 * Each `schedule()` call is one tick: running processes age (priority and
 * remaining time both drop by one), finished ones release their memory and
 * wake dependents, Ready is re-sorted by priority, every processor takes the
 * head of Ready, and Backup refills Ready up to the admission cap.
 */

use crate::core::limits::{DEFAULT_MAX_PROCESSES, DEFAULT_PROCESSOR_COUNT};
use crate::memory::MemoryManager;
use atomic_stats::AtomicSchedulerStats;
use parking_lot::Mutex;
use state::SchedulerState;
use std::sync::Arc;
use tracing::info;

mod atomic_stats;
mod dependencies;
mod operations;
mod state;
mod stats;
pub mod types;

pub use types::{SchedulerStats, TickReport};

/// CPU Scheduler
///
/// Clones share the same queues. Every mutating operation holds the single
/// queue lock for its whole body; memory is released through the attached
/// `MemoryManager` while that lock is held. A scheduler with no attached
/// allocator releases nothing when a process finishes.
pub struct Scheduler {
    state: Arc<Mutex<SchedulerState>>,
    memory: Option<MemoryManager>,
    stats: Arc<AtomicSchedulerStats>,
    processor_count: usize,
    max_processes: usize,
}

impl Scheduler {
    /// Create a scheduler with `processor_count` processors and an admission
    /// cap of `max_processes` on |Ready| + |Running|
    pub fn new(processor_count: usize, max_processes: usize) -> Self {
        info!(processor_count, max_processes, "Scheduler initialized");

        Self {
            state: Arc::new(Mutex::new(SchedulerState::new())),
            memory: None,
            stats: Arc::new(AtomicSchedulerStats::new()),
            processor_count,
            max_processes,
        }
    }

    /// Release finished processes' memory into `memory`
    pub fn with_memory_manager(mut self, memory: MemoryManager) -> Self {
        self.memory = Some(memory);
        self
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            memory: self.memory.clone(),
            stats: Arc::clone(&self.stats),
            processor_count: self.processor_count,
            max_processes: self.max_processes,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSOR_COUNT, DEFAULT_MAX_PROCESSES)
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("processor_count", &self.processor_count)
            .field("max_processes", &self.max_processes)
            .field("memory", &self.memory)
            .field("live", &self.len())
            .finish()
    }
}
