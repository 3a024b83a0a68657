/*!
 * Process Module
 * Process control blocks and the queues that hold them
 */

pub mod queue;
pub mod types;

pub use queue::{ProcessQueue, QueueKind};
pub use types::{NewProcess, Process, ProcessState};
