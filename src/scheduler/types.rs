/*!
 * Scheduler Types
 * Reports and statistics produced by the scheduler
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// What one call to `Scheduler::schedule` did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Processes that ran out of time this tick, in completion order
    pub finished: Vec<Pid>,
    /// Waiting processes whose predecessors all finished
    pub released: Vec<Pid>,
    /// Processes placed on processors; index is the processor id
    pub dispatched: Vec<Pid>,
    /// Processes pulled from Backup into Ready
    pub admitted: Vec<Pid>,
}

impl TickReport {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }
}

/// Scheduler statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStats {
    pub ticks: u64,
    pub total_admitted: u64,
    pub total_finished: u64,
    pub dispatches: u64,
    pub suspensions: u64,
    pub resumes: u64,
    pub live_processes: usize,
    pub processor_count: usize,
    pub max_processes: usize,
}
