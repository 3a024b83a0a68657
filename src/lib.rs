/*!
 * OS Scheduler Simulator Library
 * Multi-processor process scheduling over a first-fit memory allocator
 */

pub mod api;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use api::{start_server, SimulatorService};
pub use core::{KernelError, SchedulerError, SimulatorConfig};
pub use memory::{MemoryError, MemoryManager, MemoryStats};
pub use monitoring::init_tracing;
pub use process::{NewProcess, Process, ProcessQueue, ProcessState};
pub use scheduler::{Scheduler, SchedulerStats, TickReport};
